use axum::{
    extract::{Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;

use super::ErrorResponse;
use crate::state::ApiState;
use autoops_db::{LogEntry, UserRecord};
use autoops_executor::Dashboard;

type ApiResult<T> = Result<Json<T>, (StatusCode, Json<ErrorResponse>)>;

#[derive(Debug, Deserialize)]
pub struct LogsQuery {
    pub limit: Option<i64>,
}

fn store_error(e: impl std::fmt::Display) -> (StatusCode, Json<ErrorResponse>) {
    tracing::error!("Failed to read task store: {}", e);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(ErrorResponse {
            error: e.to_string(),
        }),
    )
}

/// Most recent task logs
pub async fn get_logs(
    State(state): State<ApiState>,
    Query(query): Query<LogsQuery>,
) -> ApiResult<Vec<LogEntry>> {
    let limit = query
        .limit
        .unwrap_or(state.runner.settings().recent_log_limit)
        .max(0);

    state
        .runner
        .database()
        .recent_logs(limit)
        .await
        .map(Json)
        .map_err(store_error)
}

/// Provisioned users, newest first
pub async fn get_users(State(state): State<ApiState>) -> ApiResult<Vec<UserRecord>> {
    state
        .runner
        .database()
        .users()
        .await
        .map(Json)
        .map_err(store_error)
}

pub async fn get_dashboard(State(state): State<ApiState>) -> ApiResult<Dashboard> {
    state.runner.snapshot().await.map(Json).map_err(store_error)
}
