//! HTTP handlers and route configuration.

mod health;
mod pages;
mod posts;

use actix_web::http::header;
use actix_web::{HttpResponse, web};

use blog_shared::FlashMessage;

use crate::middleware::error::AppError;
use crate::middleware::flash;

/// Largest accepted form body; post bodies are rich text.
const MAX_FORM_BYTES: usize = 1 << 20;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let form_config = web::FormConfig::default()
        .limit(MAX_FORM_BYTES)
        .error_handler(|err, req| {
            tracing::debug!(path = %req.path(), error = %err, "Unreadable form body");
            AppError::from(err).into()
        });

    cfg.app_data(form_config)
        // a non-numeric post id names no post
        .app_data(web::PathConfig::default().error_handler(|err, req| {
            tracing::debug!(path = %req.path(), error = %err, "Unparsable path segment");
            AppError::NotFound(req.path().to_string()).into()
        }))
        .route("/", web::get().to(posts::list_posts))
        .route("/post/{id}", web::get().to(posts::show_post))
        .service(
            web::resource("/create-post")
                .route(web::get().to(posts::new_post_form))
                .route(web::post().to(posts::create_post)),
        )
        .service(
            web::resource("/edit-post/{id}")
                .route(web::get().to(posts::edit_post_form))
                .route(web::post().to(posts::update_post)),
        )
        .route("/delete/{id}", web::get().to(posts::delete_post))
        .route("/about", web::get().to(pages::about))
        .route("/contact", web::get().to(pages::contact))
        .route("/health", web::get().to(health::health_check))
        .default_service(web::to(pages::not_found));
}

/// 303 to `location`.
pub(crate) fn redirect(location: &str) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .finish()
}

/// 303 to `location`, leaving `message` for the page it lands on.
pub(crate) fn redirect_with_flash(location: &str, message: FlashMessage) -> HttpResponse {
    HttpResponse::SeeOther()
        .insert_header((header::LOCATION, location))
        .cookie(flash::flash_cookie(&[message]))
        .finish()
}
