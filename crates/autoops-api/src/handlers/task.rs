use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use super::ErrorResponse;
use crate::state::ApiState;
use autoops_core::TaskKind;
use autoops_executor::TaskRun;

#[derive(Debug, Serialize, Deserialize)]
pub struct TaskOption {
    pub slug: String,
    pub label: String,
    pub description: String,
}

/// List the tasks that can be run
pub async fn list_tasks() -> Json<Vec<TaskOption>> {
    Json(
        TaskKind::ALL
            .iter()
            .map(|kind| TaskOption {
                slug: kind.slug().to_string(),
                label: kind.label().to_string(),
                description: kind.description().to_string(),
            })
            .collect(),
    )
}

/// Run a task now
pub async fn run_task(
    State(state): State<ApiState>,
    Path(task): Path<String>,
) -> Result<(StatusCode, Json<TaskRun>), (StatusCode, Json<ErrorResponse>)> {
    let kind = task.parse::<TaskKind>().map_err(|e| {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: e.to_string(),
            }),
        )
    })?;

    let run = state.runner.dispatch(kind).await;
    let status = if run.success {
        StatusCode::OK
    } else {
        StatusCode::INTERNAL_SERVER_ERROR
    };

    Ok((status, Json(run)))
}
