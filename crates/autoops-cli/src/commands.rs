use anyhow::Result;

use crate::cli::Commands;
use autoops_core::TaskKind;
use autoops_db::{LogEntry, UserRecord};
use autoops_executor::{TaskOutput, TaskRunner};

pub async fn execute(command: Commands, runner: &TaskRunner) -> Result<()> {
    match command {
        Commands::Run { task } => {
            println!("Running: {}...", task);

            let run = runner.dispatch(task).await;
            if !run.success {
                println!("✗ {}", run.message);
                anyhow::bail!("{} did not complete", task);
            }

            println!("✓ {}", run.message);
            if let Some(TaskOutput::Report(report)) = &run.output {
                println!();
                print_logs(&report.rows);
            }
        }

        Commands::Tasks => {
            for kind in TaskKind::ALL {
                println!("{:<16} {:<16} {}", kind.slug(), kind.label(), kind.description());
            }
        }

        Commands::Logs { limit } => {
            let limit = limit
                .map(i64::from)
                .unwrap_or(runner.settings().recent_log_limit);
            let logs = runner.database().recent_logs(limit).await?;

            if logs.is_empty() {
                println!("No tasks have been run yet!");
            } else {
                print_logs(&logs);
            }
        }

        Commands::Users => {
            let users = runner.database().users().await?;

            if users.is_empty() {
                println!("No users have been provisioned yet!");
            } else {
                print_users(&users);
            }
        }

        Commands::Serve { port } => {
            let port = port.unwrap_or(runner.settings().api_port);
            autoops_api::serve(runner.clone(), port).await?;
        }

        Commands::InitDb => {
            // Schema is already ensured on open
            println!(
                "✓ Database initialized at {}",
                runner.database().path().display()
            );
        }
    }

    Ok(())
}

fn print_logs(logs: &[LogEntry]) {
    println!("{:>6}  {:<48}  {}", "id", "task", "timestamp");
    for log in logs {
        println!("{:>6}  {:<48}  {}", log.id, log.task, log.timestamp);
    }
}

fn print_users(users: &[UserRecord]) {
    println!("{:>6}  {}", "id", "name");
    for user in users {
        println!("{:>6}  {}", user.id, user.name);
    }
}
