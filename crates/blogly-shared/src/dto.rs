//! View models - the shapes the page templates render.

use serde::Serialize;

/// A user as shown on listing and detail pages.
#[derive(Debug, Clone, Serialize)]
pub struct UserView {
    pub id: i32,
    pub first_name: String,
    pub last_name: String,
    pub full_name: String,
    pub image_url: Option<String>,
}

/// A post with its display timestamp.
#[derive(Debug, Clone, Serialize)]
pub struct PostView {
    pub id: i32,
    pub user_id: i32,
    pub title: String,
    pub content: String,
    /// Formatted as "Mon DD, YYYY HH:MM AM/PM".
    pub created_at: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TagView {
    pub id: i32,
    pub name: String,
}

/// One checkbox of a multi-select on an edit form.
#[derive(Debug, Clone, Serialize)]
pub struct ChoiceView {
    pub id: i32,
    pub label: String,
    pub checked: bool,
}

impl ChoiceView {
    pub fn new(id: i32, label: impl Into<String>, selected: &[i32]) -> Self {
        Self {
            id,
            label: label.into(),
            checked: selected.contains(&id),
        }
    }
}
