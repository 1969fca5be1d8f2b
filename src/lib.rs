//! # gitlab-tables
//!
//! Exposes the GitLab REST API (v4) as a catalog of queryable tables.
//!
//! ## Features
//!
//! - **Table Catalog**: Users, groups, projects, issues, merge requests, pipelines and more
//! - **Predicate Push-down**: Equality and timestamp-range filters become API parameters
//! - **Paginated Fetching**: Page-number pagination with early cancellation on row limits
//! - **Arrow Output**: JSON lines, pretty tables and Parquet files
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use gitlab_tables::config::{resolve, ConnectionConfig, Environment};
//! use gitlab_tables::engine::{Query, QueryEngine};
//! use gitlab_tables::filter::Predicate;
//!
//! #[tokio::main]
//! async fn main() -> gitlab_tables::Result<()> {
//!     let connection = resolve(&ConnectionConfig::new(), &Environment::from_process())?;
//!     let engine = QueryEngine::from_connection(&connection)?;
//!
//!     let query = Query::new("commit")
//!         .filter(Predicate::eq("project_id", 42_i64))
//!         .limit(100);
//!     let (rows, stats) = engine.collect(&query).await?;
//!     println!("{} rows in {} pages", rows.len(), stats.pages);
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                         Query Engine                            │
//! │  plan(query) → FetchPlan       execute(query, sink) → Stats     │
//! └─────────────────────────────────────────────────────────────────┘
//!                                │
//! ┌──────────┬───────────┬───────┴───────┬────────────┬────────────┐
//! │  Config  │  Filter   │   Paginate    │ Projection │   Output   │
//! ├──────────┼───────────┼───────────────┼────────────┼────────────┤
//! │ Token    │ Parse     │ X-Next-Page   │ Paths      │ JSON lines │
//! │ Base URL │ Translate │ Link header   │ Transforms │ Arrow      │
//! │ Env      │ Residuals │ Cancellation  │ Quals      │ Parquet    │
//! └──────────┴───────────┴───────────────┴────────────┴────────────┘
//! ```

#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
// Allow common clippy pedantic lints
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::ref_option)]
#![allow(clippy::unused_self)]
#![allow(clippy::struct_excessive_bools)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::match_wildcard_for_single_variants)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::unused_async)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::doc_markdown)]

// ============================================================================
// Module declarations
// ============================================================================

/// Error types
pub mod error;

/// Common types and type aliases
pub mod types;

/// Connection settings and resolution
pub mod config;

/// HTTP client
pub mod http;

/// Pagination strategies
pub mod pagination;

/// JSON paths, transforms and row projection
pub mod projection;

/// Predicate parsing and translation into fetch plans
pub mod filter;

/// Table catalog
pub mod tables;

/// Fetch loop and query execution
pub mod engine;

/// JSON lines, Arrow and Parquet output
pub mod output;

/// Command-line interface
pub mod cli;

// ============================================================================
// Re-exports
// ============================================================================

pub use error::{Error, Result};
pub use types::*;

// Re-export commonly used types
pub use config::{resolve, Connection, ConnectionConfig, Environment};
pub use engine::{Query, QueryEngine};
pub use filter::Predicate;

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Crate name
pub const NAME: &str = env!("CARGO_PKG_NAME");
