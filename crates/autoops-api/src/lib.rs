pub mod handlers;
pub mod routes;
pub mod state;

pub use routes::create_router;
pub use state::ApiState;

use autoops_executor::TaskRunner;

/// Serve the HTTP API on `0.0.0.0:port` until the process is stopped
pub async fn serve(runner: TaskRunner, port: u16) -> anyhow::Result<()> {
    let app = create_router(ApiState { runner });

    let addr = format!("0.0.0.0:{}", port);
    tracing::info!("AutoOps API server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
