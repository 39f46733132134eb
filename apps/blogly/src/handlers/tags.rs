//! Tag pages.

use actix_web::{HttpResponse, web};
use tera::Context;

use blogly_core::domain::TagInput;
use blogly_shared::FormData;

use super::{redirect, render, views};
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn tag_input(form: &FormData) -> TagInput {
    TagInput::new(form.text("name"), form.ids("posts"))
}

/// GET /tags
pub async fn list_tags(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let tags = state.tags.list().await?;

    let mut context = Context::new();
    context.insert("tags", &views::tags(&tags));
    render(&state, "tags/list.html", &context)
}

/// GET /tags/new
pub async fn new_tag_form(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list(None).await?;

    let mut context = Context::new();
    context.insert("posts", &views::post_choices(&posts, &[]));
    render(&state, "tags/new.html", &context)
}

/// POST /tags/new
pub async fn create_tag(state: web::Data<AppState>, body: web::Bytes) -> AppResult<HttpResponse> {
    let form = FormData::parse(&body);
    state.tags.create(tag_input(&form)).await?;

    Ok(redirect("/tags".to_string()))
}

/// GET /tags/{tag_id}
pub async fn show_tag(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let detail = state.tags.get(path.into_inner()).await?;

    let mut context = Context::new();
    context.insert("tag", &views::tag(&detail.tag));
    context.insert("posts", &views::posts(&detail.posts));
    render(&state, "tags/detail.html", &context)
}

/// GET /tags/{tag_id}/edit
pub async fn edit_tag_form(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let detail = state.tags.get(path.into_inner()).await?;
    let posts = state.posts.list(None).await?;

    let mut context = Context::new();
    context.insert("tag", &views::tag(&detail.tag));
    context.insert("posts", &views::post_choices(&posts, &detail.post_ids()));
    render(&state, "tags/edit.html", &context)
}

/// POST /tags/{tag_id}/edit
pub async fn update_tag(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let form = FormData::parse(&body);
    state.tags.update(path.into_inner(), tag_input(&form)).await?;

    Ok(redirect("/tags".to_string()))
}

/// POST /tags/{tag_id}/delete
pub async fn delete_tag(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    state.tags.delete(path.into_inner()).await?;

    Ok(redirect("/tags".to_string()))
}
