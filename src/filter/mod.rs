//! Predicate-to-filter translation
//!
//! Query predicates are parsed from `column<op>literal` text, coerced to the
//! column types of a table and mapped onto the table's routes and API
//! filter parameters.
//!
//! ```ignore
//! let table = tables::table("gitlab_commit")?;
//! let predicates = parse_predicates(&["project_id=42", "committed_date>=2024-01-01"])?;
//! let plan = translate(table, &predicates, Deployment::Public)?;
//! // plan.requests[0].path == "/projects/42/repository/commits"
//! // plan.requests[0].params["since"] == "2024-01-01T00:00:00Z"
//! ```

mod parser;
mod translator;
mod types;

#[cfg(test)]
mod tests;

pub use parser::{parse_predicate, parse_predicates};
pub use translator::{encode_segment, translate, window};
pub use types::{
    FetchPlan, FetchRequest, KeyColumn, KeyFilter, Literal, Operator, Predicate, RangeFormat,
};
