//! # Blogly Infrastructure
//!
//! Concrete implementations of the ports defined in `blogly-core`,
//! backed by SeaORM.
//!
//! ## Feature Flags
//!
//! - `postgres` (default) - PostgreSQL via SQLx
//! - `sqlite` - SQLite via SQLx, used by the test suites

pub mod database;

pub use database::{
    DatabaseConfig, SeaOrmPostRepository, SeaOrmTagRepository, SeaOrmUserRepository, UnitOfWork,
};
