use serde::{Deserialize, Serialize};

use super::{Post, require_text};
use crate::error::DomainError;

/// Maximum length of a first or last name.
pub const NAME_MAX_LEN: usize = 50;

/// User entity - an author of posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub image_url: Option<String>,
}

impl User {
    /// "{first_name} {last_name}", computed on demand.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// The full set of mutable user fields, used for both create and replace.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserInput {
    pub first_name: String,
    pub last_name: String,
    pub image_url: Option<String>,
}

impl UserInput {
    /// Builds an input record. Values are kept as submitted, except that a
    /// blank image URL is treated as absent.
    pub fn new(
        first_name: impl Into<String>,
        last_name: impl Into<String>,
        image_url: Option<String>,
    ) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            image_url: image_url.filter(|url| !url.trim().is_empty()),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("first_name", &self.first_name, NAME_MAX_LEN)?;
        require_text("last_name", &self.last_name, NAME_MAX_LEN)
    }
}

/// A user together with the posts they own.
#[derive(Debug, Clone)]
pub struct UserDetail {
    pub user: User,
    pub posts: Vec<Post>,
}
