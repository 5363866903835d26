//! Offset pagination.

use serde::Serialize;

/// Number of posts on one listing page.
pub const POSTS_PER_PAGE: u64 = 5;

/// A request for one page of results.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number
    pub page: u64,
    pub per_page: u64,
}

impl PageRequest {
    /// Build a request, clamping page numbers below 1 to the first page.
    pub fn new(page: i64, per_page: u64) -> Self {
        Self {
            page: page.max(1) as u64,
            per_page: per_page.max(1),
        }
    }

    /// 0-based page index as used by the store.
    pub fn index(&self) -> u64 {
        self.page - 1
    }
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            per_page: POSTS_PER_PAGE,
        }
    }
}

/// One page of items plus the metadata needed to render pager links.
#[derive(Debug, Clone, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub page: u64,
    pub per_page: u64,
    pub total_items: u64,
    pub total_pages: u64,
    pub has_prev: bool,
    pub has_next: bool,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, request: PageRequest, total_items: u64) -> Self {
        let total_pages = total_items.div_ceil(request.per_page);
        Self {
            items,
            page: request.page,
            per_page: request.per_page,
            total_items,
            total_pages,
            has_prev: request.page > 1,
            has_next: request.page < total_pages,
        }
    }

    pub fn prev_page(&self) -> u64 {
        self.page.saturating_sub(1).max(1)
    }

    pub fn next_page(&self) -> u64 {
        self.page + 1
    }

    /// All page numbers, for pager links.
    pub fn page_numbers(&self) -> Vec<u64> {
        (1..=self.total_pages).collect()
    }
}
