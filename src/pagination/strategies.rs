//! Pagination strategy implementations
//!
//! Each strategy handles a specific pagination pattern.

use super::types::{NextPage, Page, PaginationState, Paginator};
use crate::types::QueryParams;
use reqwest::header::HeaderMap;

// ============================================================================
// Page Number Pagination
// ============================================================================

/// Page number pagination driven by the server's next-page indicator
///
/// Sends `?page=N&per_page=S` and follows `Page::next_page` until the
/// server stops reporting one. Pages are never skipped or reordered.
#[derive(Debug, Clone)]
pub struct PageNumberPaginator {
    /// Query parameter name for page number
    pub page_param: String,
    /// Query parameter name for page size
    pub page_size_param: String,
    /// Page size value
    pub page_size: u32,
}

impl PageNumberPaginator {
    /// Create a paginator using GitLab's `page` / `per_page` parameters
    pub fn new(page_size: u32) -> Self {
        Self {
            page_param: "page".to_string(),
            page_size_param: "per_page".to_string(),
            page_size,
        }
    }
}

impl Paginator for PageNumberPaginator {
    fn page_params(&self, state: &PaginationState) -> QueryParams {
        let mut params = QueryParams::new();
        params.insert(self.page_param.clone(), state.page.to_string());
        params.insert(self.page_size_param.clone(), self.page_size.to_string());
        params
    }

    fn process_page(&self, page: &Page, state: &mut PaginationState) -> NextPage {
        state.record_page(page.len());

        match page.next_page {
            Some(next) if next > 0 => {
                state.advance_to(next);
                NextPage::Continue(next)
            }
            _ => {
                state.mark_done();
                NextPage::Done
            }
        }
    }
}

// ============================================================================
// No Pagination
// ============================================================================

/// No pagination - single request for a single-object endpoint
#[derive(Debug, Clone, Default)]
pub struct NoPaginator;

impl Paginator for NoPaginator {
    fn page_params(&self, _state: &PaginationState) -> QueryParams {
        QueryParams::new()
    }

    fn process_page(&self, page: &Page, state: &mut PaginationState) -> NextPage {
        state.record_page(page.len());
        state.mark_done();
        NextPage::Done
    }
}

// ============================================================================
// Header parsing
// ============================================================================

/// Read the next page number from response headers.
///
/// GitLab sends `X-Next-Page` (empty on the last page). Keyset-paginated
/// endpoints only send a `Link` header, so fall back to its `rel="next"`
/// URL and read the `page` parameter from it.
pub fn next_page_from_headers(headers: &HeaderMap) -> Option<u32> {
    if let Some(value) = headers.get("x-next-page").and_then(|v| v.to_str().ok()) {
        return value.trim().parse().ok().filter(|n| *n > 0);
    }

    let link = headers.get("link").and_then(|v| v.to_str().ok())?;
    let next_url = parse_link_header(link, "next")?;
    let parsed = url::Url::parse(&next_url).ok()?;
    parsed
        .query_pairs()
        .find(|(k, _)| k == "page")
        .and_then(|(_, v)| v.parse().ok())
}

/// Read the total page count from response headers
pub fn total_pages_from_headers(headers: &HeaderMap) -> Option<u32> {
    headers
        .get("x-total-pages")
        .and_then(|v| v.to_str().ok())
        .and_then(|s| s.trim().parse().ok())
}

/// Parse a Link header and extract the URL for the given rel
pub fn parse_link_header(header: &str, target_rel: &str) -> Option<String> {
    // Link header format: <url>; rel="next", <url>; rel="prev"
    for part in header.split(',') {
        let part = part.trim();
        let mut url = None;
        let mut rel = None;

        for segment in part.split(';') {
            let segment = segment.trim();
            if segment.starts_with('<') && segment.ends_with('>') {
                url = Some(&segment[1..segment.len() - 1]);
            } else if let Some(stripped) = segment.strip_prefix("rel=") {
                let rel_value = stripped.trim_matches('"').trim_matches('\'');
                rel = Some(rel_value);
            }
        }

        if let (Some(u), Some(r)) = (url, rel) {
            if r == target_rel {
                return Some(u.to_string());
            }
        }
    }

    None
}
