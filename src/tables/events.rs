//! Activity event table

use super::types::{Route, TableDef};
use crate::filter::KeyColumn;
use crate::projection::Column;

pub(super) fn event() -> TableDef {
    TableDef::new("gitlab_event", "Activity events of the authenticated user")
        .columns(vec![
            Column::int("id", "Event ID"),
            Column::text("action_name", "Action as displayed"),
            Column::text("action", "Action filter value").from_qual("action"),
            Column::int("project_id", "Project the event belongs to").null_if_zero(),
            Column::int("author_id", "Author ID"),
            Column::text("author_username", "Author username"),
            Column::int("target_id", "Target object ID"),
            Column::int("target_iid", "Target object number"),
            Column::text("target_type", "Target object type"),
            Column::text("target_title", "Target object title"),
            Column::timestamp("created_at", "When the event happened"),
            Column::json("push_data", "Push details for push events"),
            Column::json("note", "Comment details for comment events"),
        ])
        .keys(vec![
            KeyColumn::enumerated("action", "action"),
            KeyColumn::enumerated("target_type", "target_type"),
            KeyColumn::date_range("created_at", "after", "before"),
        ])
        .route(Route::list("/events"))
}
