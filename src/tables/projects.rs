//! Project tables

use super::types::{Route, TableDef};
use crate::filter::KeyColumn;
use crate::projection::Column;

fn project_columns() -> Vec<Column> {
    vec![
        Column::int("id", "Project ID"),
        Column::text("name", "Project name"),
        Column::text("path", "URL path of the project"),
        Column::text("name_with_namespace", "Name including the namespace"),
        Column::text("path_with_namespace", "Path including the namespace"),
        Column::text("description", "Description").null_if_zero(),
        Column::text("visibility", "Visibility (private, internal, public)"),
        Column::text("web_url", "Project URL"),
        Column::text("ssh_url_to_repo", "SSH clone URL"),
        Column::text("http_url_to_repo", "HTTP clone URL"),
        Column::text("default_branch", "Default branch").null_if_zero(),
        Column::text("avatar_url", "Avatar URL").null_if_zero(),
        Column::bool("archived", "Whether the project is archived"),
        Column::bool("empty_repo", "Whether the repository is empty"),
        Column::int("star_count", "Number of stars"),
        Column::int("forks_count", "Number of forks"),
        Column::int("open_issues_count", "Number of open issues"),
        Column::timestamp("created_at", "When the project was created"),
        Column::timestamp("last_activity_at", "Last activity in the project"),
        Column::int("creator_id", "User who created the project").null_if_zero(),
        Column::int("owner_id", "Owner of a personal project").at("owner.id"),
        Column::text("owner_username", "Owner of a personal project").at("owner.username"),
        Column::int("namespace_id", "Namespace ID").at("namespace.id"),
        Column::text("namespace_kind", "user or group").at("namespace.kind"),
        Column::text("namespace_full_path", "Namespace path").at("namespace.full_path"),
        Column::int("forked_from_id", "Project this one was forked from")
            .at("forked_from_project.id"),
        Column::bool("issues_enabled", "Whether issues are enabled"),
        Column::bool("merge_requests_enabled", "Whether merge requests are enabled"),
        Column::bool("wiki_enabled", "Whether the wiki is enabled"),
        Column::bool("jobs_enabled", "Whether CI/CD jobs are enabled"),
        Column::bool("snippets_enabled", "Whether snippets are enabled"),
        Column::bool("container_registry_enabled", "Whether the registry is enabled"),
        Column::bool("lfs_enabled", "Whether Git LFS is enabled"),
        Column::bool("shared_runners_enabled", "Whether shared runners are enabled"),
        Column::bool("public_jobs", "Whether job logs are public"),
        Column::bool("only_allow_merge_if_pipeline_succeeds", "Merges need a green pipeline"),
        Column::bool(
            "only_allow_merge_if_all_discussions_are_resolved",
            "Merges need resolved threads",
        ),
        Column::text("merge_method", "merge, rebase_merge or ff"),
        Column::int("approvals_before_merge", "Required approvals").null_if_zero(),
        Column::text("import_status", "Import status").null_if_zero(),
        Column::text("ci_config_path", "Custom CI config path").null_if_zero(),
        Column::json("topics", "Topics"),
        Column::json("statistics", "Repository statistics"),
        Column::json("permissions", "Permissions of the authenticated user"),
    ]
}

fn project_filters() -> Vec<KeyColumn> {
    vec![
        KeyColumn::enumerated("visibility", "visibility"),
        KeyColumn::param("archived", "archived"),
    ]
}

pub(super) fn project() -> TableDef {
    let mut keys = project_filters();
    keys.push(KeyColumn::range(
        "last_activity_at",
        "last_activity_after",
        "last_activity_before",
    ));

    TableDef::new("gitlab_project", "Projects visible to the authenticated user")
        .columns(project_columns())
        .keys(keys)
        .route(Route::single("/projects/{id}"))
        .route(Route::list("/users/{owner_id}/projects"))
        .route(Route::list("/projects").deny_on_public())
        .scope_hint(
            "listing every project of gitlab.com is not supported; \
             filter on id = <project id or path> or owner_id = <user id>",
        )
}

pub(super) fn group_project() -> TableDef {
    let mut columns = project_columns();
    columns.push(Column::int("group_id", "ID of the group listed").from_qual("group_id"));

    TableDef::new("gitlab_group_project", "Projects of a group")
        .columns(columns)
        .keys(project_filters())
        .route(Route::list("/groups/{group_id}/projects"))
}
