//! Column projection module
//!
//! Maps raw API items onto a table's fixed column set.
//!
//! # Overview
//!
//! Every column names a `Source` (a dotted path into the item, or the value
//! of a scoping key the query supplied), an optional `Transform`, and its
//! static `ColumnType`. Projection never fails: absent paths, values that
//! do not fit the column type, and suppressed zero values all become null.

mod path;
mod transforms;
mod types;

pub use path::get_path;
pub use transforms::{
    access_level_label, date_only_to_timestamp, display_names, format_timestamp,
    normalize_timestamp, parse_timestamp,
};
pub use types::{project, Column, ProjectionContext, Row, Source, Transform};

#[cfg(test)]
mod tests;
