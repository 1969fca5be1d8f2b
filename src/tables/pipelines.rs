//! Pipeline table

use super::types::{Route, TableDef};
use crate::filter::KeyColumn;
use crate::projection::Column;

pub(super) fn pipeline() -> TableDef {
    TableDef::new("gitlab_pipeline", "CI/CD pipelines of a project")
        .columns(vec![
            Column::int("id", "Pipeline ID"),
            Column::int("iid", "Pipeline number within the project"),
            Column::int("project_id", "ID of the project"),
            Column::text("status", "Pipeline status"),
            Column::text("source", "What triggered the pipeline"),
            Column::text("ref", "Branch or tag"),
            Column::text("sha", "Commit SHA"),
            Column::text("web_url", "Pipeline URL"),
            Column::timestamp("created_at", "When the pipeline was created"),
            Column::timestamp("updated_at", "When the pipeline was last updated"),
        ])
        .keys(vec![
            KeyColumn::enumerated("status", "status"),
            KeyColumn::param("ref", "ref"),
            KeyColumn::param("sha", "sha"),
            KeyColumn::enumerated("source", "source"),
            KeyColumn::range("updated_at", "updated_after", "updated_before"),
        ])
        .route(Route::list("/projects/{project_id}/pipelines"))
        .page_size(50)
}
