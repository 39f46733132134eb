use serde::{Deserialize, Serialize};

use super::{Post, dedup_ids, require_text};
use crate::error::DomainError;

/// Maximum length of a tag name.
pub const TAG_NAME_MAX_LEN: usize = 50;

/// Tag entity - a globally unique label attached to posts.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    pub id: i32,
    pub name: String,
}

/// Name and the complete post set of a tag.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagInput {
    pub name: String,
    pub post_ids: Vec<i32>,
}

impl TagInput {
    pub fn new(name: impl Into<String>, post_ids: Vec<i32>) -> Self {
        Self {
            name: name.into(),
            post_ids: dedup_ids(post_ids),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("name", &self.name, TAG_NAME_MAX_LEN)
    }
}

/// A tag with the posts it is attached to.
#[derive(Debug, Clone)]
pub struct TagDetail {
    pub tag: Tag,
    pub posts: Vec<Post>,
}

impl TagDetail {
    pub fn post_ids(&self) -> Vec<i32> {
        self.posts.iter().map(|p| p.id).collect()
    }
}
