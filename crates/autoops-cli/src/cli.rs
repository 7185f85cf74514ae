use autoops_core::TaskKind;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "autoops")]
#[command(about = "AutoOps - simulated IT task automation", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Task store file
    #[arg(long, env = "AUTOOPS_DATABASE_PATH")]
    pub database: Option<PathBuf>,

    /// Settings file (defaults to ./autoops.toml when present)
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run a task now (backup, provision-user, generate-report)
    Run {
        /// Task to run
        task: TaskKind,
    },

    /// List the available tasks
    Tasks,

    /// Show the most recent task logs
    Logs {
        /// Limit number of results (defaults to the configured dashboard size)
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Show provisioned users
    Users,

    /// Start API server
    Serve {
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },

    /// Initialize database
    InitDb,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_run_parses_task_names() {
        let cli = Cli::try_parse_from(["autoops", "run", "provision-user"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Run {
                task: TaskKind::ProvisionUser
            }
        ));

        assert!(Cli::try_parse_from(["autoops", "run", "restore"]).is_err());
    }

    #[test]
    fn test_global_database_flag() {
        let cli =
            Cli::try_parse_from(["autoops", "--database", "/tmp/ops.db", "logs", "--limit", "5"])
                .unwrap();
        assert_eq!(cli.database, Some(PathBuf::from("/tmp/ops.db")));
        assert!(matches!(cli.command, Commands::Logs { limit: Some(5) }));
    }

    #[test]
    fn test_logs_limit_rejects_negative() {
        assert!(Cli::try_parse_from(["autoops", "logs", "--limit", "-1"]).is_err());
        assert!(Cli::try_parse_from(["autoops", "logs", "--limit=-1"]).is_err());
    }
}
