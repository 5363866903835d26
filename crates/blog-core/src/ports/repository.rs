use async_trait::async_trait;

use crate::domain::{BlogPost, NewBlogPost, Page, PageRequest, PostDraft};
use crate::error::RepoError;

/// Blog post persistence.
///
/// Every write runs in its own transaction: on failure nothing is persisted.
#[async_trait]
pub trait PostRepository: Send + Sync {
    /// Find a post by its id.
    async fn find_by_id(&self, id: i32) -> Result<Option<BlogPost>, RepoError>;

    /// Insert a new post and return it with its assigned id.
    async fn insert(&self, post: NewBlogPost) -> Result<BlogPost, RepoError>;

    /// Overwrite the editable fields of an existing post. `id` and `date`
    /// are left untouched. Returns `RepoError::NotFound` for unknown ids.
    async fn update(&self, id: i32, draft: PostDraft) -> Result<BlogPost, RepoError>;

    /// Permanently remove a post. Returns `RepoError::NotFound` for unknown ids.
    async fn delete(&self, id: i32) -> Result<(), RepoError>;

    /// One page of posts, newest date first. Pages past the end are empty.
    async fn list_page(&self, request: PageRequest) -> Result<Page<BlogPost>, RepoError>;

    /// Total number of stored posts.
    async fn count(&self) -> Result<u64, RepoError>;
}
