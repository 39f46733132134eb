//! # Blogly Core
//!
//! The domain layer of Blogly: users, their posts, and the tags attached to posts.
//! This crate contains pure business logic with zero infrastructure dependencies.

pub mod domain;
pub mod error;
pub mod ports;

pub use error::DomainError;
