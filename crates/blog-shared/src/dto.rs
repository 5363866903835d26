//! Data Transfer Objects - form and query types for the site.

use std::borrow::Cow;

use serde::{Deserialize, Serialize};
use url::{Host, Url};
use validator::{Validate, ValidationError};

use blog_core::domain::{BlogPost, POSTS_PER_PAGE, PageRequest, PostDraft};

use crate::validation::{FieldErrors, REQUIRED};

/// Submitted create/edit post form.
///
/// Missing fields deserialize as empty strings so that they surface as
/// validation messages instead of a rejected request.
#[derive(Debug, Clone, Default, Serialize, Deserialize, Validate)]
#[serde(default)]
pub struct PostForm {
    #[validate(
        custom(function = "not_blank"),
        length(max = 250, message = "Field cannot be longer than 250 characters.")
    )]
    pub title: String,

    #[validate(
        custom(function = "not_blank"),
        length(max = 250, message = "Field cannot be longer than 250 characters.")
    )]
    pub subtitle: String,

    #[validate(
        custom(function = "not_blank"),
        length(max = 250, message = "Field cannot be longer than 250 characters.")
    )]
    pub author: String,

    #[validate(
        custom(function = "not_blank"),
        length(max = 250, message = "Field cannot be longer than 250 characters."),
        custom(function = "web_url")
    )]
    pub img_url: String,

    #[validate(custom(function = "not_blank"))]
    pub body: String,

    /// Anti-forgery token, checked by the server against its cookie.
    pub csrf_token: String,
}

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(
            ValidationError::new(REQUIRED).with_message(Cow::Borrowed("This field is required."))
        );
    }
    Ok(())
}

/// An absolute http(s) address with a dotted host name or an IP address.
fn web_url(value: &str) -> Result<(), ValidationError> {
    let invalid = || ValidationError::new("url").with_message(Cow::Borrowed("Invalid URL."));

    let url = Url::parse(value.trim()).map_err(|_| invalid())?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(invalid());
    }
    match url.host() {
        Some(Host::Domain(domain)) if domain.contains('.') || domain == "localhost" => Ok(()),
        Some(Host::Ipv4(_) | Host::Ipv6(_)) => Ok(()),
        _ => Err(invalid()),
    }
}

impl PostForm {
    /// Prefill the form from a stored post.
    pub fn from_post(post: &BlogPost) -> Self {
        Self {
            title: post.title.clone(),
            subtitle: post.subtitle.clone(),
            author: post.author.clone(),
            img_url: post.img_url.clone(),
            body: post.body.clone(),
            csrf_token: String::new(),
        }
    }

    /// Check every field rule and produce the validated draft.
    pub fn validate_draft(&self) -> Result<PostDraft, FieldErrors> {
        self.validate()?;
        Ok(PostDraft {
            title: self.title.clone(),
            subtitle: self.subtitle.clone(),
            author: self.author.clone(),
            img_url: self.img_url.clone(),
            body: self.body.clone(),
        })
    }
}

/// Query string of the post listing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListQuery {
    /// Kept as text: anything that is not an integer means the first page.
    pub page: Option<String>,
}

impl ListQuery {
    pub fn page_request(&self) -> PageRequest {
        let page = self
            .page
            .as_deref()
            .and_then(|p| p.trim().parse::<i64>().ok())
            .unwrap_or(1);
        PageRequest::new(page, POSTS_PER_PAGE)
    }
}
