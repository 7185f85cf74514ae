use anyhow::Result;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use autoops_core::Settings;
use autoops_db::Database;
use autoops_executor::TaskRunner;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "autoops=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    // Get configuration
    let settings = Settings::load(None)?;

    // Open the task store
    let db = Database::open(&settings.database_path).await?;
    db.init_schema().await?;

    let port = settings.api_port;
    let runner = TaskRunner::new(db, settings);

    autoops_api::serve(runner, port).await
}
