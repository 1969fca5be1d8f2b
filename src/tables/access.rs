//! Members, CI/CD variables, webhooks and push rules of groups and projects

use super::types::{Route, TableDef};
use crate::projection::{Column, Transform};

// ============================================================================
// Shared Columns
// ============================================================================

fn member_columns(owner: Column) -> Vec<Column> {
    vec![
        owner,
        Column::int("id", "User ID"),
        Column::text("username", "Username"),
        Column::text("name", "Display name"),
        Column::text("state", "Account state"),
        Column::text("web_url", "Profile URL"),
        Column::text("avatar_url", "Avatar URL").null_if_zero(),
        Column::int("access_level", "Numeric access level"),
        Column::text("access_level_description", "Access level label")
            .at("access_level")
            .transform(Transform::AccessLevel),
        Column::timestamp("created_at", "When the membership was created"),
        Column::timestamp("expires_at", "When the membership expires")
            .transform(Transform::DateOnly),
        Column::int("created_by_id", "User who added the member").at("created_by.id"),
        Column::text("created_by_username", "User who added the member")
            .at("created_by.username"),
        Column::text("membership_state", "Membership state").null_if_zero(),
    ]
}

fn variable_columns(owner: Column) -> Vec<Column> {
    vec![
        owner,
        Column::text("key", "Variable name"),
        Column::text("value", "Variable value"),
        Column::text("variable_type", "env_var or file"),
        Column::bool("protected", "Only exposed to protected branches and tags"),
        Column::bool("masked", "Masked in job logs"),
        Column::bool("raw", "Not expanded"),
        Column::text("environment_scope", "Environments the variable applies to"),
        Column::text("description", "Description").null_if_zero(),
    ]
}

fn hook_columns(owner: Column) -> Vec<Column> {
    vec![
        owner,
        Column::int("id", "Hook ID"),
        Column::text("url", "Target URL"),
        Column::timestamp("created_at", "When the hook was created"),
        Column::bool("push_events", "Triggers on pushes"),
        Column::text("push_events_branch_filter", "Branch filter for pushes").null_if_zero(),
        Column::bool("tag_push_events", "Triggers on tag pushes"),
        Column::bool("issues_events", "Triggers on issue events"),
        Column::bool("confidential_issues_events", "Triggers on confidential issues"),
        Column::bool("merge_requests_events", "Triggers on merge request events"),
        Column::bool("note_events", "Triggers on comments"),
        Column::bool("confidential_note_events", "Triggers on confidential comments"),
        Column::bool("job_events", "Triggers on job events"),
        Column::bool("pipeline_events", "Triggers on pipeline events"),
        Column::bool("wiki_page_events", "Triggers on wiki events"),
        Column::bool("deployment_events", "Triggers on deployments"),
        Column::bool("releases_events", "Triggers on releases"),
        Column::bool("enable_ssl_verification", "Verifies TLS certificates"),
        Column::text("alert_status", "Delivery status").null_if_zero(),
    ]
}

fn push_rule_columns(owner: Column) -> Vec<Column> {
    vec![
        owner,
        Column::int("id", "Push rule ID"),
        Column::timestamp("created_at", "When the rule was created"),
        Column::text("commit_message_regex", "Required commit message pattern").null_if_zero(),
        Column::text("commit_message_negative_regex", "Forbidden commit message pattern")
            .null_if_zero(),
        Column::text("branch_name_regex", "Required branch name pattern").null_if_zero(),
        Column::text("author_email_regex", "Required author email pattern").null_if_zero(),
        Column::text("file_name_regex", "Forbidden file name pattern").null_if_zero(),
        Column::bool("deny_delete_tag", "Tags cannot be deleted"),
        Column::bool("member_check", "Authors must be members"),
        Column::bool("prevent_secrets", "Rejects files likely to contain secrets"),
        Column::bool("commit_committer_check", "Committer must be the pusher"),
        Column::bool("reject_unsigned_commits", "Rejects unsigned commits"),
        Column::int("max_file_size", "Maximum file size in MB").null_if_zero(),
    ]
}

fn group_id() -> Column {
    Column::int("group_id", "ID of the group").from_qual("group_id")
}

fn project_id() -> Column {
    Column::int("project_id", "ID of the project").from_qual("project_id")
}

// ============================================================================
// Group Tables
// ============================================================================

pub(super) fn group_member() -> TableDef {
    TableDef::new("gitlab_group_member", "Direct members of a group")
        .columns(member_columns(group_id()))
        .route(Route::list("/groups/{group_id}/members"))
}

pub(super) fn group_variable() -> TableDef {
    TableDef::new("gitlab_group_variable", "CI/CD variables of a group")
        .columns(variable_columns(group_id()))
        .route(Route::list("/groups/{group_id}/variables"))
}

pub(super) fn group_hook() -> TableDef {
    let mut columns = hook_columns(group_id());
    columns.push(Column::bool("subgroup_events", "Triggers on subgroup events"));

    TableDef::new("gitlab_group_hook", "Webhooks of a group")
        .columns(columns)
        .route(Route::list("/groups/{group_id}/hooks"))
}

pub(super) fn group_push_rule() -> TableDef {
    TableDef::new("gitlab_group_push_rule", "Push rule of a group")
        .columns(push_rule_columns(group_id()))
        .route(Route::single("/groups/{group_id}/push_rule"))
}

// ============================================================================
// Project Tables
// ============================================================================

pub(super) fn project_member() -> TableDef {
    TableDef::new("gitlab_project_member", "Direct members of a project")
        .columns(member_columns(project_id()))
        .route(Route::list("/projects/{project_id}/members"))
}

pub(super) fn project_variable() -> TableDef {
    TableDef::new("gitlab_project_variable", "CI/CD variables of a project")
        .columns(variable_columns(project_id()))
        .route(Route::list("/projects/{project_id}/variables"))
}

pub(super) fn project_hook() -> TableDef {
    TableDef::new("gitlab_hook", "Webhooks of a project")
        .columns(hook_columns(project_id()))
        .route(Route::list("/projects/{project_id}/hooks"))
}

pub(super) fn project_push_rule() -> TableDef {
    TableDef::new("gitlab_project_push_rule", "Push rule of a project")
        .columns(push_rule_columns(project_id()))
        .route(Route::single("/projects/{project_id}/push_rule"))
}
