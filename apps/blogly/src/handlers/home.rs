//! Homepage.

use actix_web::{HttpResponse, web};
use tera::Context;

use super::{render, views};
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// Number of posts shown on the homepage.
pub const RECENT_POSTS_LIMIT: u64 = 5;

/// GET / - the most recent posts.
pub async fn homepage(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state
        .posts
        .list_with_authors(Some(RECENT_POSTS_LIMIT))
        .await?;

    let mut context = Context::new();
    context.insert("posts", &views::posts_with_authors(&posts));
    render(&state, "index.html", &context)
}
