//! HTTP client for the GitLab REST API
//!
//! Provides a thin client that handles:
//! - Bearer token authentication
//! - Base URL joining
//! - Response body parsing into pages
//! - Error classification (404 vs everything else)

use crate::config::Connection;
use crate::error::{Error, Result};
use crate::pagination::{next_page_from_headers, total_pages_from_headers, Page, PageSource};
use crate::types::{JsonValue, QueryParams};
use async_trait::async_trait;
use reqwest::{Client, Method, Response};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::debug;

/// Configuration for the HTTP client
#[derive(Clone)]
pub struct HttpClientConfig {
    /// Base URL for all requests
    pub base_url: Option<String>,
    /// Bearer token sent with every request
    pub token: Option<String>,
    /// Request timeout
    pub timeout: Duration,
    /// User agent string
    pub user_agent: String,
}

impl Default for HttpClientConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            token: None,
            timeout: Duration::from_secs(30),
            user_agent: format!("gitlab-tables/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl std::fmt::Debug for HttpClientConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClientConfig")
            .field("base_url", &self.base_url)
            .field("has_token", &self.token.is_some())
            .field("timeout", &self.timeout)
            .field("user_agent", &self.user_agent)
            .finish()
    }
}

impl HttpClientConfig {
    /// Create a new config builder
    pub fn builder() -> HttpClientConfigBuilder {
        HttpClientConfigBuilder::default()
    }

    /// Build a config from a resolved connection
    pub fn from_connection(connection: &Connection) -> Self {
        Self::builder()
            .base_url(&connection.base_url)
            .bearer_token(&connection.token)
            .timeout(connection.timeout)
            .build()
    }
}

/// Builder for HTTP client config
#[derive(Default)]
pub struct HttpClientConfigBuilder {
    config: HttpClientConfig,
}

impl HttpClientConfigBuilder {
    /// Set the base URL
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config.base_url = Some(url.into());
        self
    }

    /// Set the bearer token
    pub fn bearer_token(mut self, token: impl Into<String>) -> Self {
        self.config.token = Some(token.into());
        self
    }

    /// Set the request timeout
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config.timeout = timeout;
        self
    }

    /// Build the config
    pub fn build(self) -> HttpClientConfig {
        self.config
    }
}

/// Configuration for a single request
#[derive(Debug, Clone, Default)]
pub struct RequestConfig {
    /// Query parameters
    pub query: QueryParams,
}

impl RequestConfig {
    /// Create a new request config
    pub fn new() -> Self {
        Self::default()
    }

    /// Add every parameter from `params`
    #[must_use]
    pub fn queries(mut self, params: &QueryParams) -> Self {
        self.query
            .extend(params.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }
}

/// HTTP client for GitLab list and get endpoints
pub struct HttpClient {
    client: Client,
    config: HttpClientConfig,
}

impl HttpClient {
    /// Create a new HTTP client with custom configuration
    pub fn with_config(config: HttpClientConfig) -> Result<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .user_agent(&config.user_agent)
            .build()?;

        Ok(Self { client, config })
    }

    /// Create a client for a resolved connection
    pub fn from_connection(connection: &Connection) -> Result<Self> {
        Self::with_config(HttpClientConfig::from_connection(connection))
    }

    /// Make a GET request; non-2xx responses become `Error::HttpStatus`
    pub async fn request(&self, url: &str, config: RequestConfig) -> Result<Response> {
        let full_url = self.build_url(url);
        let mut req = self.client.request(Method::GET, &full_url);

        if let Some(ref token) = self.config.token {
            req = req.bearer_auth(token);
        }

        if !config.query.is_empty() {
            req = req.query(&config.query);
        }

        let response = req.send().await?;
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            debug!("Request failed: GET {} -> {}", full_url, status.as_u16());
            return Err(Error::http_status(status.as_u16(), body));
        }

        debug!("Request succeeded: GET {}", full_url);
        Ok(response)
    }

    /// Make a GET request and parse JSON response
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self.request(url, RequestConfig::new()).await?;
        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))
    }

    /// Fetch one page of a list endpoint (or a single-object endpoint)
    pub async fn get_page(&self, url: &str, config: RequestConfig) -> Result<Page> {
        let response = self.request(url, config).await?;
        let headers = response.headers().clone();
        let body = response.text().await?;

        let items = decode_items(&body)?;
        Ok(Page {
            items,
            next_page: next_page_from_headers(&headers),
            total_pages: total_pages_from_headers(&headers),
        })
    }

    /// Build full URL from path
    fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            return path.to_string();
        }

        match &self.config.base_url {
            Some(base) => {
                let base = base.trim_end_matches('/');
                let path = path.trim_start_matches('/');
                format!("{base}/{path}")
            }
            None => path.to_string(),
        }
    }
}

#[async_trait]
impl PageSource for HttpClient {
    async fn fetch_page(&self, path: &str, query: &QueryParams) -> Result<Page> {
        self.get_page(path, RequestConfig::new().queries(query))
            .await
    }
}

impl std::fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpClient")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

/// Split a response body into page items.
///
/// Arrays are lists; an object is a single-item page; `null` or an empty
/// body is an empty page.
fn decode_items(body: &str) -> Result<Vec<JsonValue>> {
    if body.trim().is_empty() {
        return Ok(Vec::new());
    }

    let value: JsonValue = serde_json::from_str(body)
        .map_err(|e| Error::decode(format!("Failed to parse JSON: {e}")))?;

    match value {
        JsonValue::Array(items) => Ok(items),
        JsonValue::Null => Ok(Vec::new()),
        JsonValue::Object(_) => Ok(vec![value]),
        other => Err(Error::decode(format!(
            "expected a JSON array or object, got {other}"
        ))),
    }
}
