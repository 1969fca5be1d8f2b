//! Issue tables

use super::types::{Route, TableDef};
use crate::filter::KeyColumn;
use crate::projection::{Column, Transform};

fn issue_columns() -> Vec<Column> {
    vec![
        Column::int("id", "Global issue ID"),
        Column::int("iid", "Issue number within the project"),
        Column::int("project_id", "ID of the project"),
        Column::int("group_id", "ID of the group listed").from_qual("group_id"),
        Column::text("title", "Title"),
        Column::text("description", "Description").null_if_zero(),
        Column::text("state", "opened or closed"),
        Column::text("issue_type", "issue, incident or test_case"),
        Column::bool("confidential", "Whether the issue is confidential"),
        Column::bool("discussion_locked", "Whether the discussion is locked"),
        Column::text("web_url", "Issue URL"),
        Column::int("author_id", "Author ID").at("author.id"),
        Column::text("author_username", "Author username").at("author.username"),
        Column::int("assignee_id", "First assignee ID").at("assignee.id"),
        Column::text("assignee_username", "First assignee username").at("assignee.username"),
        Column::json("assignees", "Usernames of all assignees")
            .transform(Transform::Names("username")),
        Column::int("closed_by_id", "User who closed the issue").at("closed_by.id"),
        Column::text("closed_by_username", "User who closed the issue").at("closed_by.username"),
        Column::int("milestone_id", "Milestone ID").at("milestone.id"),
        Column::text("milestone_title", "Milestone title").at("milestone.title"),
        Column::json("labels", "Labels"),
        Column::int("upvotes", "Thumbs up"),
        Column::int("downvotes", "Thumbs down"),
        Column::int("user_notes_count", "Number of comments"),
        Column::int("merge_requests_count", "Related merge requests"),
        Column::int("weight", "Weight").null_if_zero(),
        Column::timestamp("due_date", "Due date").transform(Transform::DateOnly),
        Column::timestamp("created_at", "When the issue was created"),
        Column::timestamp("updated_at", "When the issue was last updated"),
        Column::timestamp("closed_at", "When the issue was closed"),
        Column::double("time_estimate", "Estimated time in seconds").at("time_stats.time_estimate"),
        Column::double("total_time_spent", "Time spent in seconds")
            .at("time_stats.total_time_spent"),
    ]
}

fn issue_filters() -> Vec<KeyColumn> {
    vec![
        KeyColumn::enumerated("state", "state"),
        KeyColumn::param("author_id", "author_id"),
        KeyColumn::param("assignee_id", "assignee_id"),
        KeyColumn::param("confidential", "confidential"),
        KeyColumn::range("created_at", "created_after", "created_before"),
        KeyColumn::range("updated_at", "updated_after", "updated_before"),
    ]
}

pub(super) fn issue() -> TableDef {
    TableDef::new("gitlab_issue", "Issues of a project, of a group, or visible to the user")
        .columns(issue_columns())
        .keys(issue_filters())
        .route(Route::list("/projects/{project_id}/issues"))
        .route(Route::list("/groups/{group_id}/issues"))
        .route(Route::list("/issues").with_param("scope", "all"))
}

pub(super) fn my_issue() -> TableDef {
    TableDef::new(
        "gitlab_my_issue",
        "Issues created by or assigned to the authenticated user",
    )
    .columns(issue_columns())
    .keys(vec![
        KeyColumn::enumerated("state", "state"),
        KeyColumn::range("created_at", "created_after", "created_before"),
    ])
    .route(Route::list("/issues").with_param("scope", "created_by_me"))
    .route(Route::list("/issues").with_param("scope", "assigned_to_me"))
    .union()
}
