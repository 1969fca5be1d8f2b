//! Pagination module
//!
//! Supports: page-number cursors driven by the `X-Next-Page` header (with an
//! RFC 5988 `Link` header fallback) and single-object endpoints.
//!
//! # Overview
//!
//! A `Page` is one server response: its items in server order plus the
//! next-page indicator. A `Paginator` turns the indicator into the query
//! parameters of the following request, or reports that the walk is over.

mod strategies;
mod types;

pub use strategies::{
    next_page_from_headers, parse_link_header, total_pages_from_headers, NoPaginator,
    PageNumberPaginator,
};
pub use types::{NextPage, Page, PageSource, PaginationState, Paginator};
