//! CLI module
//!
//! Command-line interface for querying GitLab tables.
//!
//! # Commands
//!
//! - `tables` - List available tables
//! - `schema` - Show the columns and filters of a table
//! - `query` - Fetch rows of a table
//! - `check` - Test connection to the API
//! - `serve` - Start HTTP server mode

mod commands;
mod runner;
mod server;

pub use commands::{Cli, Commands, OutputFormat};
pub use runner::{describe_table, Runner};
pub use server::{router, serve, ServerConfig};
