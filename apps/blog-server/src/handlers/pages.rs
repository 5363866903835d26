//! Fixed-content pages.

use actix_web::{HttpRequest, HttpResponse};

use crate::middleware::error::{AppError, AppResult};
use crate::middleware::flash::IncomingFlash;
use crate::templates::{AboutTemplate, ContactTemplate, render};

pub async fn about(flash: IncomingFlash) -> AppResult<HttpResponse> {
    render(&AboutTemplate {
        flashes: flash.messages(),
    })
}

pub async fn contact(flash: IncomingFlash) -> AppResult<HttpResponse> {
    render(&ContactTemplate {
        flashes: flash.messages(),
    })
}

/// Fallback for every unrouted URL.
pub async fn not_found(req: HttpRequest) -> AppResult<HttpResponse> {
    Err(AppError::NotFound(req.path().to_string()))
}
