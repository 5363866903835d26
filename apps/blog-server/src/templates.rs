//! Page templates and the response helpers that render them.

use actix_web::HttpResponse;
use actix_web::cookie::Cookie;
use actix_web::http::StatusCode;
use actix_web::http::header::ContentType;
use askama::Template;

use blog_core::domain::{BlogPost, Page};
use blog_shared::{FieldErrors, FlashMessage, PostForm};

use crate::middleware::error::AppResult;
use crate::middleware::flash;

#[derive(Template)]
#[template(path = "index.html")]
pub struct IndexTemplate<'a> {
    pub page: &'a Page<BlogPost>,
    pub flashes: &'a [FlashMessage],
}

#[derive(Template)]
#[template(path = "post.html")]
pub struct PostTemplate<'a> {
    pub post: &'a BlogPost,
    pub flashes: &'a [FlashMessage],
}

/// Shared by the create and edit pages.
#[derive(Template)]
#[template(path = "make-post.html")]
pub struct PostFormTemplate<'a> {
    pub form: &'a PostForm,
    pub errors: &'a FieldErrors,
    pub csrf_token: &'a str,
    pub is_edit: bool,
    /// Where the form posts to.
    pub action: &'a str,
    pub flashes: &'a [FlashMessage],
}

#[derive(Template)]
#[template(path = "about.html")]
pub struct AboutTemplate<'a> {
    pub flashes: &'a [FlashMessage],
}

#[derive(Template)]
#[template(path = "contact.html")]
pub struct ContactTemplate<'a> {
    pub flashes: &'a [FlashMessage],
}

#[derive(Template)]
#[template(path = "error.html")]
pub struct ErrorTemplate<'a> {
    pub status: u16,
    pub title: &'a str,
    pub detail: &'a str,
    pub flashes: &'a [FlashMessage],
}

/// Render a page with status 200, clearing any flash cookie it displayed.
pub fn render<T: Template>(page: &T) -> AppResult<HttpResponse> {
    render_with_cookies(page, Vec::new())
}

/// Like [`render`], additionally setting `cookies`.
pub fn render_with_cookies<T: Template>(
    page: &T,
    cookies: Vec<Cookie<'static>>,
) -> AppResult<HttpResponse> {
    let body = page.render()?;

    let mut response = HttpResponse::build(StatusCode::OK);
    response
        .content_type(ContentType::html())
        .cookie(flash::removal_cookie());
    for cookie in cookies {
        response.cookie(cookie);
    }

    Ok(response.body(body))
}
