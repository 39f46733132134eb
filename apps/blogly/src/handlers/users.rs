//! User pages.

use actix_web::{HttpResponse, web};
use tera::Context;

use blogly_core::domain::UserInput;
use blogly_shared::FormData;

use super::{redirect, render, views};
use crate::middleware::error::AppResult;
use crate::state::AppState;

fn user_input(form: &FormData) -> UserInput {
    UserInput::new(
        form.text("first_name"),
        form.text("last_name"),
        form.get("image_url").map(str::to_string),
    )
}

/// GET /users
pub async fn list_users(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let users = state.users.list().await?;

    let mut context = Context::new();
    context.insert("users", &views::users(&users));
    render(&state, "users/list.html", &context)
}

/// GET /users/new
pub async fn new_user_form(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    render(&state, "users/new.html", &Context::new())
}

/// POST /users/new
pub async fn create_user(
    state: web::Data<AppState>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let form = FormData::parse(&body);
    let user = state.users.create(user_input(&form)).await?;

    Ok(redirect(format!("/users/{}", user.id)))
}

/// GET /users/{user_id}
pub async fn show_user(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let detail = state.users.get(path.into_inner()).await?;

    let mut context = Context::new();
    context.insert("user", &views::user(&detail.user));
    context.insert("posts", &views::posts(&detail.posts));
    render(&state, "users/detail.html", &context)
}

/// GET /users/{user_id}/edit
pub async fn edit_user_form(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    let detail = state.users.get(path.into_inner()).await?;

    let mut context = Context::new();
    context.insert("user", &views::user(&detail.user));
    render(&state, "users/edit.html", &context)
}

/// POST /users/{user_id}/edit
pub async fn update_user(
    state: web::Data<AppState>,
    path: web::Path<i32>,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let form = FormData::parse(&body);
    state
        .users
        .update(path.into_inner(), user_input(&form))
        .await?;

    Ok(redirect("/users".to_string()))
}

/// POST /users/{user_id}/delete
pub async fn delete_user(
    state: web::Data<AppState>,
    path: web::Path<i32>,
) -> AppResult<HttpResponse> {
    state.users.delete(path.into_inner()).await?;

    Ok(redirect("/users".to_string()))
}
