use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod cli;

use autoops_core::Settings;
use autoops_db::Database;
use autoops_executor::TaskRunner;
use cli::Cli;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "autoops=info".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    // Load environment variables
    dotenv::dotenv().ok();

    // Parse CLI arguments
    let cli = Cli::parse();

    // Run CLI
    run(cli).await
}

async fn run(cli: Cli) -> Result<()> {
    let mut settings = Settings::load(cli.config.as_deref())?;
    if let Some(path) = cli.database {
        settings = settings.with_database_path(path);
    }

    // Open the task store; the schema is created on every start
    let db = Database::open(&settings.database_path).await?;
    db.init_schema().await?;

    let runner = TaskRunner::new(db.clone(), settings);
    let result = commands::execute(cli.command, &runner).await;

    db.close().await;
    result
}
