//! GitLab table catalog
//!
//! Every table is declared up front: its columns, the columns whose
//! predicates reach the API, and the endpoints it can be listed from.

mod access;
mod events;
mod groups;
mod instance;
mod issues;
mod merge_requests;
mod pipelines;
mod projects;
mod repository;
mod types;
mod users;

#[cfg(test)]
mod tests;

pub use types::{PlanKind, Route, TableDef, DEFAULT_PAGE_SIZE};

use crate::error::{Error, Result};
use std::sync::LazyLock;

/// Prefix shared by every table name
pub const TABLE_PREFIX: &str = "gitlab_";

/// All tables, in listing order
pub static CATALOG: LazyLock<Vec<TableDef>> = LazyLock::new(|| {
    vec![
        // Instance
        instance::version(),
        instance::setting(),
        // Users and groups
        users::user(),
        groups::group(),
        groups::subgroup(),
        access::group_member(),
        access::group_variable(),
        access::group_hook(),
        access::group_push_rule(),
        // Projects
        projects::project(),
        projects::group_project(),
        access::project_member(),
        access::project_variable(),
        access::project_hook(),
        access::project_push_rule(),
        // Repository
        repository::branch(),
        repository::commit(),
        // Work items
        issues::issue(),
        issues::my_issue(),
        merge_requests::merge_request(),
        pipelines::pipeline(),
        events::event(),
    ]
});

/// All tables
pub fn catalog() -> &'static [TableDef] {
    &CATALOG
}

/// Look up a table; the `gitlab_` prefix is optional
pub fn table(name: &str) -> Result<&'static TableDef> {
    let name = name.trim().to_ascii_lowercase();
    let full = if name.starts_with(TABLE_PREFIX) {
        name
    } else {
        format!("{TABLE_PREFIX}{name}")
    };

    CATALOG
        .iter()
        .find(|t| t.name == full)
        .ok_or_else(|| Error::unknown_table(full))
}

/// Check if a table exists
pub fn is_table(name: &str) -> bool {
    table(name).is_ok()
}

/// Names of all tables
pub fn table_names() -> Vec<&'static str> {
    CATALOG.iter().map(|t| t.name).collect()
}
