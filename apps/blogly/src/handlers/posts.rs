//! Post pages.

use actix_web::{HttpResponse, web};
use tera::Context;

use blogly_core::DomainError;
use blogly_core::domain::{Post, PostInput};
use blogly_shared::FormData;

use super::{redirect, render, views};
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn post_input(form: &FormData) -> PostInput {
    PostInput::new(form.text("title"), form.text("content"), form.ids("tags"))
}

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_with_authors(None).await?;

    let mut context = Context::new();
    context.insert("posts", &views::posts_with_authors(&posts));
    render(&state, "posts/list.html", &context)
}

/// GET /users/{user_id}/posts/new
pub async fn new_post_form(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let detail = state.users.get(path.into_inner()).await?;
    let tags = state.tags.list().await?;

    let mut context = Context::new();
    context.insert("user", &views::user(&detail.user));
    context.insert("tags", &views::tag_choices(&tags, &[]));
    render(&state, "posts/new.html", &context)
}

/// POST /users/{user_id}/posts/new
pub async fn create_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let user_id = path.into_inner();
    let form = FormData::parse(&body);
    state.posts.create(user_id, post_input(&form)).await?;

    Ok(redirect(format!("/users/{user_id}")))
}

/// GET /posts/{post_id}
pub async fn show_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let detail = state.posts.get(path.into_inner()).await?;

    let mut context = Context::new();
    context.insert("post", &views::post(&detail.post));
    context.insert("user", &views::user(&detail.author));
    context.insert("tags", &views::tags(&detail.tags));
    render(&state, "posts/detail.html", &context)
}

/// GET /posts/{post_id}/edit
pub async fn edit_post_form(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let detail = state.posts.get(path.into_inner()).await?;
    let tags = state.tags.list().await?;

    let mut context = Context::new();
    context.insert("post", &views::post(&detail.post));
    context.insert("user", &views::user(&detail.author));
    context.insert("tags", &views::tag_choices(&tags, &detail.tag_ids()));
    render(&state, "posts/edit.html", &context)
}

/// POST /posts/{post_id}/edit
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let form = FormData::parse(&body);
    let post = state.posts.update(path.into_inner(), post_input(&form)).await?;

    Ok(redirect(format!("/users/{}", post.user_id)))
}

/// POST /posts/{post_id}/delete
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let post_id = path.into_inner();
    let post: Post = state
        .posts
        .find_by_id(post_id)
        .await?
        .ok_or_else(|| DomainError::not_found("Post", post_id))?;

    state.posts.delete(post_id).await?;

    Ok(redirect(format!("/users/{}", post.user_id)))
}
