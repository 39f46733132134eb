//! Application configuration loaded from environment variables.

use std::env;

use blogly_infra::DatabaseConfig;

use crate::telemetry::TelemetryConfig;

const DEFAULT_DATABASE_URL: &str = "postgres://localhost/blogly";

/// Application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub database: DatabaseConfig,
    /// Apply pending migrations before serving.
    pub run_migrations: bool,
    /// Insert demo users, posts and tags into an empty database.
    pub seed_demo_data: bool,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let mut database = DatabaseConfig::new(
            env::var("DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()),
        );
        if let Some(max) = parsed("DB_MAX_CONNECTIONS") {
            database.max_connections = max;
        }
        if let Some(min) = parsed("DB_MIN_CONNECTIONS") {
            database.min_connections = min;
        }
        database.sqlx_logging = flag("DB_SQL_LOGGING", false);

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "127.0.0.1".to_string()),
            port: parsed("PORT").unwrap_or(5000),
            database,
            run_migrations: flag("RUN_MIGRATIONS", true),
            seed_demo_data: flag("SEED_DEMO_DATA", false),
            telemetry: TelemetryConfig::from_env(),
        }
    }
}

fn parsed<T: std::str::FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

/// Boolean flag: "0", "false", "no" and "off" are false, anything else true.
fn flag(name: &str, default: bool) -> bool {
    env::var(name)
        .map(|v| !matches!(v.to_lowercase().as_str(), "0" | "false" | "no" | "off"))
        .unwrap_or(default)
}
