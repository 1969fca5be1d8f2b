//! Merge request table

use super::types::{Route, TableDef};
use crate::filter::KeyColumn;
use crate::projection::{Column, Transform};

pub(super) fn merge_request() -> TableDef {
    TableDef::new("gitlab_merge_request", "Merge requests")
        .columns(vec![
            Column::int("id", "Global merge request ID"),
            Column::int("iid", "Merge request number within the project"),
            Column::int("project_id", "ID of the target project"),
            Column::int("group_id", "ID of the group listed").from_qual("group_id"),
            Column::text("title", "Title"),
            Column::text("description", "Description").null_if_zero(),
            Column::text("state", "opened, closed, locked or merged"),
            Column::bool("draft", "Whether the merge request is a draft"),
            Column::text("web_url", "Merge request URL"),
            Column::text("source_branch", "Source branch"),
            Column::text("target_branch", "Target branch"),
            Column::int("source_project_id", "Source project"),
            Column::int("target_project_id", "Target project"),
            Column::int("author_id", "Author ID").at("author.id"),
            Column::text("author_username", "Author username").at("author.username"),
            Column::int("assignee_id", "First assignee ID").at("assignee.id"),
            Column::text("assignee_username", "First assignee username").at("assignee.username"),
            Column::json("assignees", "Usernames of all assignees")
                .transform(Transform::Names("username")),
            Column::json("reviewers", "Usernames of all reviewers")
                .transform(Transform::Names("username")),
            Column::int("merged_by_id", "User who merged").at("merged_by.id"),
            Column::text("merged_by_username", "User who merged").at("merged_by.username"),
            Column::int("closed_by_id", "User who closed").at("closed_by.id"),
            Column::text("merge_status", "Mergeability status"),
            Column::text("detailed_merge_status", "Detailed mergeability status"),
            Column::text("sha", "Head commit SHA"),
            Column::text("merge_commit_sha", "Merge commit SHA").null_if_zero(),
            Column::text("squash_commit_sha", "Squash commit SHA").null_if_zero(),
            Column::bool("squash", "Whether commits are squashed"),
            Column::bool("has_conflicts", "Whether there are conflicts"),
            Column::bool("discussion_locked", "Whether the discussion is locked"),
            Column::int("user_notes_count", "Number of comments"),
            Column::int("upvotes", "Thumbs up"),
            Column::int("downvotes", "Thumbs down"),
            Column::int("milestone_id", "Milestone ID").at("milestone.id"),
            Column::text("milestone_title", "Milestone title").at("milestone.title"),
            Column::json("labels", "Labels"),
            Column::timestamp("created_at", "When the merge request was created"),
            Column::timestamp("updated_at", "When the merge request was last updated"),
            Column::timestamp("merged_at", "When the merge request was merged"),
            Column::timestamp("closed_at", "When the merge request was closed"),
        ])
        .keys(vec![
            KeyColumn::enumerated("state", "state"),
            KeyColumn::param("author_id", "author_id"),
            KeyColumn::param("assignee_id", "assignee_id"),
            KeyColumn::param("source_branch", "source_branch"),
            KeyColumn::param("target_branch", "target_branch"),
            KeyColumn::range("created_at", "created_after", "created_before"),
            KeyColumn::range("updated_at", "updated_after", "updated_before"),
        ])
        .route(Route::list("/projects/{project_id}/merge_requests"))
        .route(Route::list("/groups/{group_id}/merge_requests"))
        .route(Route::list("/merge_requests").with_param("scope", "all"))
}
