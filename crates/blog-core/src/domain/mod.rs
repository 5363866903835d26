//! Domain entities - the core business objects.

mod page;
mod post;

pub use page::{POSTS_PER_PAGE, Page, PageRequest};
pub use post::{BlogPost, NewBlogPost, PUBLISH_DATE_FORMAT, PostDraft, publish_date};
