//! Flash message cookie and extractor.

use actix_web::cookie::{Cookie, SameSite};
use actix_web::{FromRequest, HttpRequest, dev::Payload};
use std::future::{Ready, ready};

use blog_shared::FlashMessage;
use blog_shared::flash;

/// Cookie carrying messages across a redirect.
pub const FLASH_COOKIE: &str = "_flash";

/// Flash messages left for this request by the previous response.
///
/// A handler that renders a page should display them; the page renderer
/// then clears the cookie so they show only once.
#[derive(Debug, Clone, Default)]
pub struct IncomingFlash(Vec<FlashMessage>);

impl IncomingFlash {
    pub fn messages(&self) -> &[FlashMessage] {
        &self.0
    }

    /// Pending messages followed by one raised while handling this request.
    pub fn with(&self, message: FlashMessage) -> Vec<FlashMessage> {
        let mut messages = self.0.clone();
        messages.push(message);
        messages
    }
}

impl FromRequest for IncomingFlash {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let messages = req
            .cookie(FLASH_COOKIE)
            .map(|c| flash::decode(c.value()))
            .unwrap_or_default();

        ready(Ok(IncomingFlash(messages)))
    }
}

/// Cookie that hands `messages` to the next page.
pub fn flash_cookie(messages: &[FlashMessage]) -> Cookie<'static> {
    Cookie::build(FLASH_COOKIE, flash::encode(messages))
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .finish()
}

/// Cookie that tells the browser to drop displayed messages.
pub fn removal_cookie() -> Cookie<'static> {
    let mut cookie = Cookie::build(FLASH_COOKIE, "").path("/").finish();
    cookie.make_removal();
    cookie
}
