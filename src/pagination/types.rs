//! Pagination types and traits
//!
//! Defines the core pagination abstractions used by all strategies.

use crate::error::Result;
use crate::types::{JsonValue, QueryParams};
use async_trait::async_trait;

/// One server response
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    /// Raw items, in server order
    pub items: Vec<JsonValue>,
    /// Next page number; `None` marks the final page
    pub next_page: Option<u32>,
    /// Total number of pages, when the server reports it
    pub total_pages: Option<u32>,
}

impl Page {
    /// A final page holding `items`
    pub fn last(items: Vec<JsonValue>) -> Self {
        Self {
            items,
            next_page: None,
            total_pages: None,
        }
    }

    /// A page followed by page `next`
    pub fn with_next(items: Vec<JsonValue>, next: u32) -> Self {
        Self {
            items,
            next_page: Some(next),
            total_pages: None,
        }
    }

    /// Number of items on the page
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the page has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Whether the server signalled this is the final page
    pub fn is_last(&self) -> bool {
        matches!(self.next_page, None | Some(0))
    }
}

/// Result of the next page computation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NextPage {
    /// Fetch this page next
    Continue(u32),
    /// No more pages
    Done,
}

impl NextPage {
    /// Check if this is a done result
    pub fn is_done(&self) -> bool {
        matches!(self, Self::Done)
    }

    /// Check if this is a continue result
    pub fn is_continue(&self) -> bool {
        matches!(self, Self::Continue(_))
    }
}

/// Tracks pagination state during iteration
#[derive(Debug, Clone)]
pub struct PaginationState {
    /// Current page number, starting at 1
    pub page: u32,
    /// Pages fetched so far
    pub pages_fetched: u32,
    /// Items seen so far
    pub total_fetched: u64,
    /// Is pagination complete?
    pub done: bool,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::with_page(1)
    }
}

impl PaginationState {
    /// Create a new pagination state on page 1
    pub fn new() -> Self {
        Self::default()
    }

    /// Create state with a starting page
    pub fn with_page(page: u32) -> Self {
        Self {
            page,
            pages_fetched: 0,
            total_fetched: 0,
            done: false,
        }
    }

    /// Mark pagination as complete
    pub fn mark_done(&mut self) {
        self.done = true;
    }

    /// Move the cursor to `page`
    pub fn advance_to(&mut self, page: u32) {
        self.page = page;
    }

    /// Record a fetched page of `count` items
    pub fn record_page(&mut self, count: usize) {
        self.pages_fetched += 1;
        self.total_fetched += count as u64;
    }
}

/// Core trait for pagination strategies
pub trait Paginator: Send + Sync {
    /// Query parameters selecting the current page
    fn page_params(&self, state: &PaginationState) -> QueryParams;

    /// Process a page and determine if there's a next one
    fn process_page(&self, page: &Page, state: &mut PaginationState) -> NextPage;
}

/// Something that can fetch one page of a resource.
///
/// `HttpClient` is the production implementation; the fetch loop only
/// sees this trait.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Fetch the page selected by `query` from `path`
    async fn fetch_page(&self, path: &str, query: &QueryParams) -> Result<Page>;
}
