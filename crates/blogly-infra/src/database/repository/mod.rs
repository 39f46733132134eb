//! SeaORM implementations of the repository ports.
//!
//! Reads go straight to the pool. Every write that touches more than one
//! row runs inside a single [`UnitOfWork`](super::UnitOfWork).

mod associations;
mod post;
mod tag;
mod user;

pub use post::SeaOrmPostRepository;
#[cfg(test)]
pub(crate) use post::insert_post;
pub use tag::SeaOrmTagRepository;
pub use user::SeaOrmUserRepository;
