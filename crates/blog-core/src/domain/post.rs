use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Format used for the human-readable publish date, e.g. "April 05, 24".
pub const PUBLISH_DATE_FORMAT: &str = "%B %d, %y";

/// A persisted blog post.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlogPost {
    pub id: i32,
    pub title: String,
    pub subtitle: String,
    /// Publish date, assigned once at creation.
    pub date: String,
    /// Rich-text HTML produced by the editor widget.
    pub body: String,
    pub author: String,
    pub img_url: String,
}

/// The user-editable fields of a post, already validated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub subtitle: String,
    pub author: String,
    pub img_url: String,
    pub body: String,
}

/// A post about to be inserted. The store assigns the id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBlogPost {
    pub draft: PostDraft,
    pub date: String,
}

impl NewBlogPost {
    /// Stamp a draft with the publish date for `today`.
    pub fn publish(draft: PostDraft, today: NaiveDate) -> Self {
        Self {
            draft,
            date: publish_date(today),
        }
    }
}

/// Render a calendar date the way posts display it.
pub fn publish_date(day: NaiveDate) -> String {
    day.format(PUBLISH_DATE_FORMAT).to_string()
}
