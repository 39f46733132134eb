//! Application state - shared across all handlers.

use std::sync::Arc;

use anyhow::Context;
use migration::{Migrator, MigratorTrait};
use sea_orm::DbConn;

use blogly_core::ports::{PostRepository, TagRepository, UserRepository};
use blogly_infra::database;
use blogly_infra::{SeaOrmPostRepository, SeaOrmTagRepository, SeaOrmUserRepository};

use crate::config::AppConfig;
use crate::templates::Templates;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub db: DbConn,
    pub users: Arc<dyn UserRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub tags: Arc<dyn TagRepository>,
    pub templates: Arc<Templates>,
}

impl AppState {
    /// Connect to the database, migrate it if configured, and build the state.
    pub async fn new(config: &AppConfig) -> anyhow::Result<Self> {
        let db = database::connect(&config.database)
            .await
            .context("failed to connect to the database")?;

        if config.run_migrations {
            Migrator::up(&db, None)
                .await
                .context("failed to apply migrations")?;
            tracing::info!("Database migrations applied");
        }

        let state = Self::from_connection(db)?;
        tracing::info!("Application state initialized");
        Ok(state)
    }

    /// Build the state around an existing connection.
    pub fn from_connection(db: DbConn) -> anyhow::Result<Self> {
        let templates = Templates::new().context("failed to load page templates")?;

        Ok(Self {
            users: Arc::new(SeaOrmUserRepository::new(db.clone())),
            posts: Arc::new(SeaOrmPostRepository::new(db.clone())),
            tags: Arc::new(SeaOrmTagRepository::new(db.clone())),
            templates: Arc::new(templates),
            db,
        })
    }
}
