//! # Blogly Shared
//!
//! Types exchanged between the HTTP layer and the page templates:
//! view models, the error page, and the urlencoded form reader.

pub mod dto;
pub mod form;
pub mod response;

pub use form::FormData;
pub use response::ErrorPage;
