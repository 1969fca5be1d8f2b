//! Common types used throughout gitlab-tables
//!
//! This module contains shared type definitions, type aliases,
//! and utility types used across multiple modules.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// Type Aliases
// ============================================================================

/// JSON value type (re-exported from serde_json)
pub type JsonValue = serde_json::Value;

/// JSON object type
pub type JsonObject = serde_json::Map<String, JsonValue>;

/// Query parameters sent with a list request, kept sorted for stable URLs
pub type QueryParams = BTreeMap<String, String>;

// ============================================================================
// Column Type
// ============================================================================

/// Static type of a table column
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ColumnType {
    /// 64-bit signed integer
    Int,
    /// 64-bit float
    Double,
    /// UTF-8 text
    Text,
    /// Boolean
    Bool,
    /// Point in time, UTC
    Timestamp,
    /// Arbitrary JSON (objects, lists)
    Json,
}

impl std::fmt::Display for ColumnType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ColumnType::Int => write!(f, "int"),
            ColumnType::Double => write!(f, "double"),
            ColumnType::Text => write!(f, "text"),
            ColumnType::Bool => write!(f, "bool"),
            ColumnType::Timestamp => write!(f, "timestamp"),
            ColumnType::Json => write!(f, "json"),
        }
    }
}

// ============================================================================
// Deployment
// ============================================================================

/// Kind of GitLab instance a connection points at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Deployment {
    /// The multi-tenant public instance (gitlab.com)
    #[default]
    Public,
    /// A self-managed instance
    SelfManaged,
}

impl Deployment {
    /// Whether this is the public multi-tenant instance
    pub fn is_public(self) -> bool {
        matches!(self, Deployment::Public)
    }
}
