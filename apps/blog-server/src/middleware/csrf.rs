//! Double-submit anti-forgery check for the post forms.

use actix_web::HttpRequest;
use actix_web::cookie::{Cookie, SameSite};

use blog_core::ports::{CsrfProtection, CsrfToken};

/// Cookie holding the nonce the form token was issued for.
pub const CSRF_COOKIE: &str = "csrf_nonce";

/// Form-level message shown when the check fails.
pub const CSRF_ERROR: &str = "The CSRF token is missing or invalid.";

pub fn nonce_cookie(token: &CsrfToken) -> Cookie<'static> {
    Cookie::build(CSRF_COOKIE, token.nonce.clone())
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

/// Check a submitted form token against the nonce cookie of the request.
pub fn verify_request(req: &HttpRequest, csrf: &dyn CsrfProtection, submitted: &str) -> bool {
    match req.cookie(CSRF_COOKIE) {
        Some(nonce) => csrf.verify(nonce.value(), submitted),
        None => {
            tracing::debug!("Form submitted without CSRF cookie");
            false
        }
    }
}
