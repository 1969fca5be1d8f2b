//! HTTP client module
//!
//! Provides the bearer-authenticated client that turns GitLab list and get
//! endpoints into `Page`s.
//!
//! # Features
//!
//! - **Bearer Authentication**: a static access token on every request
//! - **Page Decoding**: JSON arrays become page items, single objects a
//!   one-item page
//! - **Pagination Headers**: `X-Next-Page`, `X-Total-Pages` and `Link`
//!
//! Requests are never retried; timeouts belong to the transport.

mod client;

pub use client::{HttpClient, HttpClientConfig, RequestConfig};
