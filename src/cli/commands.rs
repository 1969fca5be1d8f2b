//! CLI commands and argument parsing

use crate::config::ConnectionConfig;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Query the GitLab REST API as tables
#[derive(Parser, Debug)]
#[command(name = "gitlab-tables")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Connection file (YAML with base_url, token, timeout_secs)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// GitLab API base URL (overrides GITLAB_ADDR)
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// Personal access token (overrides GITLAB_TOKEN)
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Connection settings given by flags
    pub fn flag_config(&self) -> ConnectionConfig {
        ConnectionConfig {
            base_url: self.base_url.clone(),
            token: self.token.clone(),
            timeout_secs: None,
        }
    }
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the available tables
    Tables,

    /// Show the columns and filters of a table
    Schema {
        /// Table name (the gitlab_ prefix is optional)
        table: String,
    },

    /// Query a table
    Query {
        /// Table name (the gitlab_ prefix is optional)
        table: String,

        /// Predicate such as `project_id=42` or `created_at>=2024-01-01` (repeatable)
        #[arg(short = 'w', long = "where")]
        predicates: Vec<String>,

        /// Maximum number of rows
        #[arg(short, long)]
        limit: Option<usize>,

        /// Output format
        #[arg(short, long, default_value = "json")]
        format: OutputFormat,

        /// Output file (required for parquet)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Print the fetch plan instead of running it
        #[arg(long)]
        explain: bool,
    },

    /// Test the connection and token
    Check,

    /// Start HTTP server mode
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "8080")]
        port: u16,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one row per line)
    Json,
    /// Human-readable table
    Pretty,
    /// Parquet file
    Parquet,
}
