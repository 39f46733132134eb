//! HTTP handlers and route configuration.

mod health;
mod home;
mod posts;
mod tags;
mod users;
mod views;


use actix_web::{HttpResponse, http::header, web};
use tera::Context;

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(home::homepage))
        .route("/health", web::get().to(health::health_check))
        .service(
            web::scope("/users")
                .route("", web::get().to(users::list_users))
                .service(
                    web::resource("/new")
                        .route(web::get().to(users::new_user_form))
                        .route(web::post().to(users::create_user)),
                )
                .route("/{user_id}", web::get().to(users::show_user))
                .service(
                    web::resource("/{user_id}/edit")
                        .route(web::get().to(users::edit_user_form))
                        .route(web::post().to(users::update_user)),
                )
                .route("/{user_id}/delete", web::post().to(users::delete_user))
                .service(
                    web::resource("/{user_id}/posts/new")
                        .route(web::get().to(posts::new_post_form))
                        .route(web::post().to(posts::create_post)),
                ),
        )
        .service(
            web::scope("/posts")
                .route("", web::get().to(posts::list_posts))
                .route("/{post_id}", web::get().to(posts::show_post))
                .service(
                    web::resource("/{post_id}/edit")
                        .route(web::get().to(posts::edit_post_form))
                        .route(web::post().to(posts::update_post)),
                )
                .route("/{post_id}/delete", web::post().to(posts::delete_post)),
        )
        .service(
            web::scope("/tags")
                .route("", web::get().to(tags::list_tags))
                .service(
                    web::resource("/new")
                        .route(web::get().to(tags::new_tag_form))
                        .route(web::post().to(tags::create_tag)),
                )
                .route("/{tag_id}", web::get().to(tags::show_tag))
                .service(
                    web::resource("/{tag_id}/edit")
                        .route(web::get().to(tags::edit_tag_form))
                        .route(web::post().to(tags::update_tag)),
                )
                .route("/{tag_id}/delete", web::post().to(tags::delete_tag)),
        );
}

/// Fallback for paths no route matches.
pub async fn not_found() -> AppResult<HttpResponse> {
    Err(AppError::NotFound("No such page".to_string()))
}

fn render(state: &AppState, template: &str, context: &Context) -> AppResult<HttpResponse> {
    let html = state
        .templates
        .render(template, context)
        .map_err(|e| AppError::Internal(format!("failed to render {template}: {e:?}")))?;

    Ok(HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(html))
}

fn redirect(location: String) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}
