//! Repository tables

use super::types::{Route, TableDef};
use crate::filter::KeyColumn;
use crate::projection::Column;

pub(super) fn branch() -> TableDef {
    TableDef::new("gitlab_branch", "Branches of a project repository")
        .columns(vec![
            Column::int("project_id", "ID of the project").from_qual("project_id"),
            Column::text("name", "Branch name"),
            Column::bool("merged", "Whether the branch is merged"),
            Column::bool("protected", "Whether the branch is protected"),
            Column::bool("default", "Whether this is the default branch"),
            Column::bool("developers_can_push", "Whether developers can push"),
            Column::bool("developers_can_merge", "Whether developers can merge"),
            Column::bool("can_push", "Whether the authenticated user can push"),
            Column::text("web_url", "Branch URL"),
            Column::text("commit_id", "Head commit SHA").at("commit.id"),
            Column::text("commit_short_id", "Head commit short SHA").at("commit.short_id"),
            Column::text("commit_title", "Head commit title").at("commit.title"),
            Column::text("commit_author_name", "Head commit author").at("commit.author_name"),
            Column::text("commit_author_email", "Head commit author email")
                .at("commit.author_email"),
            Column::timestamp("commit_date", "Head commit date").at("commit.committed_date"),
            Column::text("commit_url", "Head commit URL").at("commit.web_url"),
        ])
        .route(Route::list("/projects/{project_id}/repository/branches"))
}

pub(super) fn commit() -> TableDef {
    TableDef::new("gitlab_commit", "Commits of a project repository")
        .columns(vec![
            Column::text("id", "Commit SHA"),
            Column::int("project_id", "ID of the project").from_qual("project_id"),
            Column::text("short_id", "Short SHA"),
            Column::text("title", "First line of the message"),
            Column::text("message", "Full commit message"),
            Column::text("author_name", "Author name"),
            Column::text("author_email", "Author email"),
            Column::timestamp("authored_date", "When the commit was authored"),
            Column::text("committer_name", "Committer name"),
            Column::text("committer_email", "Committer email"),
            Column::timestamp("committed_date", "When the commit was committed"),
            Column::timestamp("created_at", "When the commit was created"),
            Column::text("web_url", "Commit URL"),
            Column::json("parent_ids", "Parent SHAs"),
            Column::text("ref_name", "Branch or tag the listing started from")
                .from_qual("ref_name"),
        ])
        .keys(vec![
            KeyColumn::range("committed_date", "since", "until"),
            KeyColumn::param("ref_name", "ref_name"),
        ])
        .route(Route::list("/projects/{project_id}/repository/commits"))
        .page_size(50)
}
