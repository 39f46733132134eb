use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Tag, User, dedup_ids, require_text};
use crate::error::DomainError;

/// Maximum length of a post title.
pub const TITLE_MAX_LEN: usize = 50;

/// Maximum length of a post body.
pub const CONTENT_MAX_LEN: usize = 4000;

/// strftime pattern for [`Post::pretty_datetime`], e.g. "Mar 04, 2024 09:15 PM".
pub const PRETTY_DATETIME_FORMAT: &str = "%b %d, %Y %I:%M %p";

/// Post entity - a blog post owned by exactly one user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Post {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn pretty_datetime(&self) -> String {
        self.created_at.format(PRETTY_DATETIME_FORMAT).to_string()
    }
}

/// Title, content and the complete tag set of a post.
///
/// On update the tag set replaces the existing associations wholesale;
/// an empty list clears them.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostInput {
    pub title: String,
    pub content: String,
    pub tag_ids: Vec<i32>,
}

impl PostInput {
    pub fn new(title: impl Into<String>, content: impl Into<String>, tag_ids: Vec<i32>) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            tag_ids: dedup_ids(tag_ids),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        require_text("title", &self.title, TITLE_MAX_LEN)?;
        require_text("content", &self.content, CONTENT_MAX_LEN)
    }
}

/// A post with its author and tags.
#[derive(Debug, Clone)]
pub struct PostDetail {
    pub post: Post,
    pub author: User,
    pub tags: Vec<Tag>,
}

impl PostDetail {
    pub fn tag_ids(&self) -> Vec<i32> {
        self.tags.iter().map(|t| t.id).collect()
    }
}
