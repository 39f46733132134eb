//! Domain entities - the core business objects.

mod post;
mod tag;
mod user;

pub use post::{CONTENT_MAX_LEN, PRETTY_DATETIME_FORMAT, Post, PostDetail, PostInput, TITLE_MAX_LEN};
pub use tag::{TAG_NAME_MAX_LEN, Tag, TagDetail, TagInput};
pub use user::{NAME_MAX_LEN, User, UserDetail, UserInput};

use crate::error::DomainError;

/// Checks that a required text field is present and within `max_len` characters.
fn require_text(field: &str, value: &str, max_len: usize) -> Result<(), DomainError> {
    if value.trim().is_empty() {
        return Err(DomainError::Validation(format!("{field} is required")));
    }
    if value.chars().count() > max_len {
        return Err(DomainError::Validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(())
}

/// Removes repeated ids while keeping the order of first appearance.
fn dedup_ids(ids: Vec<i32>) -> Vec<i32> {
    let mut seen = std::collections::HashSet::new();
    ids.into_iter().filter(|id| seen.insert(*id)).collect()
}
