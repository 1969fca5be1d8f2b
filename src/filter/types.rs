//! Predicate and filter types

use crate::projection::{format_timestamp, parse_timestamp, ProjectionContext};
use crate::types::{ColumnType, JsonValue, QueryParams};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

// ============================================================================
// Operators and Literals
// ============================================================================

/// Comparison operator of a predicate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Operator {
    /// `=`
    #[serde(rename = "=")]
    Eq,
    /// `>`
    #[serde(rename = ">")]
    Gt,
    /// `>=`
    #[serde(rename = ">=")]
    Ge,
    /// `<`
    #[serde(rename = "<")]
    Lt,
    /// `<=`
    #[serde(rename = "<=")]
    Le,
}

impl Operator {
    /// Whether `ordering` (cell compared to literal) satisfies the operator
    pub fn holds(self, ordering: Ordering) -> bool {
        match self {
            Operator::Eq => ordering == Ordering::Equal,
            Operator::Gt => ordering == Ordering::Greater,
            Operator::Ge => ordering != Ordering::Less,
            Operator::Lt => ordering == Ordering::Less,
            Operator::Le => ordering != Ordering::Greater,
        }
    }

    /// Operator symbol
    pub fn symbol(self) -> &'static str {
        match self {
            Operator::Eq => "=",
            Operator::Gt => ">",
            Operator::Ge => ">=",
            Operator::Lt => "<",
            Operator::Le => "<=",
        }
    }
}

impl std::fmt::Display for Operator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Literal value of a predicate
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Int(i64),
    Double(f64),
    Bool(bool),
    Text(String),
    Timestamp(DateTime<Utc>),
}

impl Literal {
    /// Convert to the literal type matching `column_type`
    pub fn coerce(&self, column_type: ColumnType) -> Result<Literal, String> {
        match (column_type, self) {
            (ColumnType::Int, Literal::Int(_))
            | (ColumnType::Double, Literal::Double(_))
            | (ColumnType::Bool, Literal::Bool(_))
            | (ColumnType::Timestamp, Literal::Timestamp(_))
            | (ColumnType::Text | ColumnType::Json, Literal::Text(_)) => Ok(self.clone()),

            (ColumnType::Int, Literal::Text(s)) => s
                .trim()
                .parse()
                .map(Literal::Int)
                .map_err(|_| format!("'{s}' is not an integer")),
            (ColumnType::Double, Literal::Int(n)) => Ok(Literal::Double(*n as f64)),
            (ColumnType::Double, Literal::Text(s)) => s
                .trim()
                .parse()
                .map(Literal::Double)
                .map_err(|_| format!("'{s}' is not a number")),
            (ColumnType::Bool, Literal::Text(s)) => match s.trim().to_ascii_lowercase().as_str() {
                "true" | "t" | "1" => Ok(Literal::Bool(true)),
                "false" | "f" | "0" => Ok(Literal::Bool(false)),
                _ => Err(format!("'{s}' is not a boolean")),
            },
            (ColumnType::Timestamp, Literal::Text(s)) => parse_timestamp(s)
                .map(Literal::Timestamp)
                .ok_or_else(|| format!("'{s}' is not a timestamp")),
            (ColumnType::Text | ColumnType::Json, other) => Ok(Literal::Text(other.to_param())),

            (ty, other) => Err(format!("cannot compare a {ty} column with {}", other.to_param())),
        }
    }

    /// Render as an API query parameter value
    pub fn to_param(&self) -> String {
        match self {
            Literal::Int(n) => n.to_string(),
            Literal::Double(f) => f.to_string(),
            Literal::Bool(b) => b.to_string(),
            Literal::Text(s) => s.clone(),
            Literal::Timestamp(ts) => format_timestamp(ts),
        }
    }

    /// Render as a JSON cell value
    pub fn to_json(&self) -> JsonValue {
        match self {
            Literal::Int(n) => JsonValue::from(*n),
            Literal::Double(f) => JsonValue::from(*f),
            Literal::Bool(b) => JsonValue::Bool(*b),
            Literal::Text(s) => JsonValue::String(s.clone()),
            Literal::Timestamp(ts) => JsonValue::String(format_timestamp(ts)),
        }
    }

    /// Compare a projected cell against this literal
    pub fn compare_cell(&self, cell: &JsonValue) -> Option<Ordering> {
        match (self, cell) {
            (_, JsonValue::Null) => None,
            (Literal::Int(n), JsonValue::Number(c)) => match c.as_i64() {
                Some(c) => Some(c.cmp(n)),
                None => c.as_f64()?.partial_cmp(&(*n as f64)),
            },
            (Literal::Double(f), JsonValue::Number(c)) => c.as_f64()?.partial_cmp(f),
            (Literal::Bool(b), JsonValue::Bool(c)) => Some(c.cmp(b)),
            (Literal::Timestamp(ts), JsonValue::String(c)) => Some(parse_timestamp(c)?.cmp(ts)),
            (Literal::Text(s), JsonValue::String(c)) => Some(c.as_str().cmp(s.as_str())),
            (Literal::Text(s), other) => Some(other.to_string().cmp(s)),
            _ => None,
        }
    }
}

impl From<i64> for Literal {
    fn from(value: i64) -> Self {
        Literal::Int(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Double(value)
    }
}

impl From<bool> for Literal {
    fn from(value: bool) -> Self {
        Literal::Bool(value)
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Text(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Text(value)
    }
}

impl From<DateTime<Utc>> for Literal {
    fn from(value: DateTime<Utc>) -> Self {
        Literal::Timestamp(value)
    }
}

// ============================================================================
// Predicate
// ============================================================================

/// `column <op> literal`
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub column: String,
    pub op: Operator,
    pub value: Literal,
}

impl Predicate {
    /// Create a predicate
    pub fn new(column: impl Into<String>, op: Operator, value: impl Into<Literal>) -> Self {
        Self {
            column: column.into(),
            op,
            value: value.into(),
        }
    }

    /// `column = value`
    pub fn eq(column: impl Into<String>, value: impl Into<Literal>) -> Self {
        Self::new(column, Operator::Eq, value)
    }

    /// `column > value`
    pub fn gt(column: impl Into<String>, value: impl Into<Literal>) -> Self {
        Self::new(column, Operator::Gt, value)
    }

    /// `column >= value`
    pub fn ge(column: impl Into<String>, value: impl Into<Literal>) -> Self {
        Self::new(column, Operator::Ge, value)
    }

    /// `column < value`
    pub fn lt(column: impl Into<String>, value: impl Into<Literal>) -> Self {
        Self::new(column, Operator::Lt, value)
    }

    /// `column <= value`
    pub fn le(column: impl Into<String>, value: impl Into<Literal>) -> Self {
        Self::new(column, Operator::Le, value)
    }

    /// Evaluate against a projected cell; null never matches
    pub fn matches(&self, cell: &JsonValue) -> bool {
        self.value
            .compare_cell(cell)
            .is_some_and(|ordering| self.op.holds(ordering))
    }
}

impl std::fmt::Display for Predicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {} {}", self.column, self.op, self.value.to_param())
    }
}

// ============================================================================
// Key Columns
// ============================================================================

/// How a range boundary is rendered
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RangeFormat {
    /// Full RFC 3339 timestamp
    #[default]
    Rfc3339,
    /// `YYYY-MM-DD`
    Date,
}

/// How a filterable column maps onto API parameters
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyFilter {
    /// Equality, value passed as is
    Param(&'static str),
    /// Equality on a case-sensitive enum, value lower-cased
    Enum(&'static str),
    /// Timestamp comparators mapped onto inclusive after/before parameters
    Range {
        after: &'static str,
        before: &'static str,
        format: RangeFormat,
    },
}

/// A column whose predicates can be pushed down to the API
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeyColumn {
    pub column: &'static str,
    pub filter: KeyFilter,
}

impl KeyColumn {
    /// Equality filter sent as `param`
    pub fn param(column: &'static str, param: &'static str) -> Self {
        Self {
            column,
            filter: KeyFilter::Param(param),
        }
    }

    /// Lower-cased enum filter sent as `param`
    pub fn enumerated(column: &'static str, param: &'static str) -> Self {
        Self {
            column,
            filter: KeyFilter::Enum(param),
        }
    }

    /// Timestamp range sent as `after` / `before`
    pub fn range(column: &'static str, after: &'static str, before: &'static str) -> Self {
        Self {
            column,
            filter: KeyFilter::Range {
                after,
                before,
                format: RangeFormat::Rfc3339,
            },
        }
    }

    /// Date range sent as `after` / `before` in `YYYY-MM-DD` form
    pub fn date_range(column: &'static str, after: &'static str, before: &'static str) -> Self {
        Self {
            column,
            filter: KeyFilter::Range {
                after,
                before,
                format: RangeFormat::Date,
            },
        }
    }
}

// ============================================================================
// Fetch Plan
// ============================================================================

/// One logical listing operation against one endpoint
#[derive(Debug, Clone, PartialEq)]
pub struct FetchRequest {
    /// Table the request serves
    pub table: String,
    /// Rendered endpoint path
    pub path: String,
    /// Filter parameters (page parameters are added by the paginator)
    pub params: QueryParams,
    /// Items per page
    pub page_size: u32,
    /// Single-object endpoint
    pub single: bool,
    /// Scoping-key values, for diagnostics
    pub scope: Vec<(String, String)>,
    /// Values for columns filled from the query
    pub context: ProjectionContext,
}

/// Everything needed to run a query against one table
#[derive(Debug, Clone)]
pub struct FetchPlan {
    /// Requests to run, in order, against the same sink
    pub requests: Vec<FetchRequest>,
    /// Predicates the API could not apply
    pub residual: Vec<Predicate>,
}
