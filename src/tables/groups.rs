//! Group tables

use super::types::{Route, TableDef};
use crate::filter::KeyColumn;
use crate::projection::Column;

fn group_columns() -> Vec<Column> {
    vec![
        Column::int("id", "Group ID"),
        Column::text("name", "Group name"),
        Column::text("path", "URL path of the group"),
        Column::text("full_name", "Name including parent groups"),
        Column::text("full_path", "Path including parent groups"),
        Column::text("description", "Description").null_if_zero(),
        Column::text("visibility", "Visibility (private, internal, public)"),
        Column::text("web_url", "Group URL"),
        Column::text("avatar_url", "Avatar URL").null_if_zero(),
        Column::int("parent_id", "ID of the parent group").null_if_zero(),
        Column::timestamp("created_at", "When the group was created"),
        Column::bool("lfs_enabled", "Whether Git LFS is enabled"),
        Column::bool("request_access_enabled", "Whether users can request access"),
        Column::bool("require_two_factor_authentication", "Whether members need 2FA"),
        Column::int("two_factor_grace_period", "Hours before 2FA is enforced"),
        Column::text("project_creation_level", "Who may create projects"),
        Column::text("subgroup_creation_level", "Who may create subgroups"),
        Column::text("default_branch", "Default branch of new projects").null_if_zero(),
        Column::bool("emails_disabled", "Whether notification emails are disabled"),
        Column::bool("mentions_disabled", "Whether group mentions are disabled"),
        Column::text("marked_for_deletion_on", "Scheduled deletion date").null_if_zero(),
        Column::json("statistics", "Storage statistics (administrators only)"),
    ]
}

pub(super) fn group() -> TableDef {
    TableDef::new("gitlab_group", "Groups visible to the authenticated user")
        .columns(group_columns())
        .keys(vec![KeyColumn::enumerated("visibility", "visibility")])
        .route(Route::single("/groups/{id}"))
        .route(Route::list("/groups"))
}

pub(super) fn subgroup() -> TableDef {
    let mut columns = group_columns();
    columns.push(Column::int("group_id", "ID of the group listed").from_qual("group_id"));

    TableDef::new("gitlab_group_subgroup", "Direct subgroups of a group")
        .columns(columns)
        .keys(vec![KeyColumn::enumerated("visibility", "visibility")])
        .route(Route::list("/groups/{group_id}/subgroups"))
}
