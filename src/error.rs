//! Error types for gitlab-tables
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.
//!
//! Errors fall into four groups:
//! - configuration errors, fatal and surfaced before any client exists
//! - translation errors, fatal and surfaced before any network call
//! - not-found responses, recovered by the fetch loop as "zero rows"
//! - transport errors, fatal and wrapped with table/page/scope context

use thiserror::Error;

/// The main error type for gitlab-tables
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Missing credential: '{setting}' is not set in the connection config or the environment")]
    MissingCredential { setting: String },

    #[error("Invalid config value for '{field}': {message}")]
    InvalidConfigValue { field: String, message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    // ============================================================================
    // Translation Errors
    // ============================================================================
    #[error("Table '{table}' not found")]
    UnknownTable { table: String },

    #[error("Table '{table}' has no column '{column}'")]
    UnknownColumn { table: String, column: String },

    #[error("Table '{table}' requires an equality filter on one of: {}", .columns.join(", "))]
    MissingKey { table: String, columns: Vec<String> },

    #[error("Table '{table}' cannot be listed without a filter on this deployment: {hint}")]
    UnscopedFetch { table: String, hint: String },

    #[error("Invalid predicate '{input}': {message}")]
    InvalidPredicate { input: String, message: String },

    // ============================================================================
    // HTTP Errors
    // ============================================================================
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP {status}: {body}")]
    HttpStatus { status: u16, body: String },

    #[error("Failed to decode response: {message}")]
    Decode { message: String },

    #[error("Fetching '{table}' failed on page {page}{}: {source}", format_scope(.scope))]
    Fetch {
        table: String,
        page: u32,
        scope: Vec<(String, String)>,
        #[source]
        source: Box<Error>,
    },

    // ============================================================================
    // Output Errors
    // ============================================================================
    #[error("Arrow error: {0}")]
    Arrow(#[from] arrow::error::ArrowError),

    #[error("Parquet error: {0}")]
    Parquet(#[from] parquet::errors::ParquetError),

    #[error("Output error: {message}")]
    Output { message: String },

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),
}

fn format_scope(scope: &[(String, String)]) -> String {
    if scope.is_empty() {
        return String::new();
    }
    let pairs: Vec<String> = scope.iter().map(|(k, v)| format!("{k}={v}")).collect();
    format!(" ({})", pairs.join(", "))
}

impl Error {
    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Create a missing credential error
    pub fn missing_credential(setting: impl Into<String>) -> Self {
        Self::MissingCredential {
            setting: setting.into(),
        }
    }

    /// Create an HTTP status error
    pub fn http_status(status: u16, body: impl Into<String>) -> Self {
        Self::HttpStatus {
            status,
            body: body.into(),
        }
    }

    /// Create a decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Create an unknown table error
    pub fn unknown_table(table: impl Into<String>) -> Self {
        Self::UnknownTable {
            table: table.into(),
        }
    }

    /// Create an unknown column error
    pub fn unknown_column(table: impl Into<String>, column: impl Into<String>) -> Self {
        Self::UnknownColumn {
            table: table.into(),
            column: column.into(),
        }
    }

    /// Create an invalid predicate error
    pub fn invalid_predicate(input: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPredicate {
            input: input.into(),
            message: message.into(),
        }
    }

    /// Create an output error
    pub fn output(message: impl Into<String>) -> Self {
        Self::Output {
            message: message.into(),
        }
    }

    /// Wrap a transport failure with the context of the fetch it interrupted
    pub fn fetch(
        table: impl Into<String>,
        page: u32,
        scope: Vec<(String, String)>,
        source: Error,
    ) -> Self {
        Self::Fetch {
            table: table.into(),
            page,
            scope,
            source: Box::new(source),
        }
    }

    /// Check if this error is an upstream "not found" response
    pub fn is_not_found(&self) -> bool {
        match self {
            Error::HttpStatus { status, .. } => *status == 404,
            Error::Http(e) => e.status().is_some_and(|s| s.as_u16() == 404),
            Error::Fetch { source, .. } => source.is_not_found(),
            _ => false,
        }
    }

    /// Check if this error was raised while turning predicates into a fetch plan
    pub fn is_translation(&self) -> bool {
        matches!(
            self,
            Error::UnknownTable { .. }
                | Error::UnknownColumn { .. }
                | Error::MissingKey { .. }
                | Error::UnscopedFetch { .. }
                | Error::InvalidPredicate { .. }
        )
    }

    /// Check if this error comes from configuration and must not be retried
    pub fn is_config(&self) -> bool {
        matches!(
            self,
            Error::Config { .. }
                | Error::MissingCredential { .. }
                | Error::InvalidConfigValue { .. }
                | Error::YamlParse(_)
                | Error::InvalidUrl(_)
        )
    }
}

/// Result type alias for gitlab-tables
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}
