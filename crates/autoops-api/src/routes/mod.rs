use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{handlers, state::ApiState};

pub fn create_router(state: ApiState) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health::health_check))

        // Task endpoints
        .route("/tasks", get(handlers::task::list_tasks))
        .route("/tasks/:task/run", post(handlers::task::run_task))

        // Store views
        .route("/logs", get(handlers::dashboard::get_logs))
        .route("/users", get(handlers::dashboard::get_users))
        .route("/dashboard", get(handlers::dashboard::get_dashboard))

        // Add state
        .with_state(state)

        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
