//! Database connection management and SeaORM-backed repositories.

mod connections;
mod repository;
mod sea_orm_base;
mod unit_of_work;

pub mod entity;

pub use connections::{DatabaseConfig, connect};
pub use repository::{SeaOrmPostRepository, SeaOrmTagRepository, SeaOrmUserRepository};
pub use sea_orm_base::SeaOrmRepository;
pub use unit_of_work::UnitOfWork;

#[cfg(test)]
mod tests;
