use autoops_core::{Settings, TaskKind};
use autoops_db::{Database, LogEntry, UserRecord};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::{
    BackupExecutor, ProvisionExecutor, ReportExecutor, Result, TaskExecutor, TaskOutput,
};

/// Outcome of one dispatched task, as shown to the user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskRun {
    pub task: TaskKind,
    pub success: bool,
    pub message: String,
    pub output: Option<TaskOutput>,
}

/// What the display shows after every interaction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Dashboard {
    pub recent_logs: Vec<LogEntry>,
    pub users: Vec<UserRecord>,
}

/// Dispatches a selected task to its executor and owns the error boundary.
#[derive(Clone)]
pub struct TaskRunner {
    db: Database,
    settings: Settings,
    backup: Arc<BackupExecutor>,
    provision: Arc<ProvisionExecutor>,
    report: Arc<ReportExecutor>,
}

impl TaskRunner {
    pub fn new(db: Database, settings: Settings) -> Self {
        Self {
            backup: Arc::new(BackupExecutor::new(db.clone(), &settings)),
            provision: Arc::new(ProvisionExecutor::new(db.clone())),
            report: Arc::new(ReportExecutor::new(db.clone(), &settings)),
            db,
            settings,
        }
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    fn executor(&self, kind: TaskKind) -> &dyn TaskExecutor {
        match kind {
            TaskKind::Backup => self.backup.as_ref(),
            TaskKind::ProvisionUser => self.provision.as_ref(),
            TaskKind::GenerateReport => self.report.as_ref(),
        }
    }

    /// Run `kind` to completion.
    ///
    /// Never fails: errors become a non-success [`TaskRun`] carrying one
    /// human-readable message.
    pub async fn dispatch(&self, kind: TaskKind) -> TaskRun {
        tracing::info!("Running: {}...", kind);

        match self.executor(kind).execute().await {
            Ok(output) => {
                let message = self.success_message(&output);
                tracing::info!(log_id = output.log().id, "{}", message);

                TaskRun {
                    task: kind,
                    success: true,
                    message,
                    output: Some(output),
                }
            }
            Err(e) => {
                let message = format!("{}: {}", kind.failure_prefix(), e);
                tracing::error!("{}", message);

                TaskRun {
                    task: kind,
                    success: false,
                    message,
                    output: None,
                }
            }
        }
    }

    fn success_message(&self, output: &TaskOutput) -> String {
        match output {
            TaskOutput::Backup(_) => format!(
                "Backup completed! Check the '{}' folder.",
                self.settings.backup_dir.display()
            ),
            TaskOutput::Provisioned(provisioned) => {
                format!("User created: {}", provisioned.user.name)
            }
            TaskOutput::Report(report) => {
                format!("Report generated as '{}'", report.path.display())
            }
        }
    }

    /// Run a backup; `true` on success
    pub async fn backup(&self) -> bool {
        self.dispatch(TaskKind::Backup).await.success
    }

    /// Provision a user; the new username on success
    pub async fn provision_user(&self) -> Option<String> {
        match self.dispatch(TaskKind::ProvisionUser).await.output {
            Some(TaskOutput::Provisioned(provisioned)) => Some(provisioned.user.name),
            _ => None,
        }
    }

    /// Export the audit log; the exported rows on success
    pub async fn generate_report(&self) -> Option<Vec<LogEntry>> {
        match self.dispatch(TaskKind::GenerateReport).await.output {
            Some(TaskOutput::Report(report)) => Some(report.rows),
            _ => None,
        }
    }

    /// Current store contents for display
    pub async fn snapshot(&self) -> Result<Dashboard> {
        Ok(Dashboard {
            recent_logs: self.db.recent_logs(self.settings.recent_log_limit).await?,
            users: self.db.users().await?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn setup() -> (TaskRunner, TempDir) {
        let dir = TempDir::new().unwrap();
        let settings = Settings::rooted_at(dir.path());
        let db = Database::open(&settings.database_path).await.unwrap();
        db.init_schema().await.unwrap();
        (TaskRunner::new(db, settings), dir)
    }

    #[tokio::test]
    async fn test_dispatch_routes_to_matching_executor() {
        let (runner, _dir) = setup().await;

        for kind in TaskKind::ALL {
            let run = runner.dispatch(kind).await;
            assert!(run.success, "{} failed: {}", kind, run.message);
            assert_eq!(run.task, kind);
            assert_eq!(runner.executor(kind).kind(), kind);
        }

        assert_eq!(runner.database().count_logs().await.unwrap(), 3);
    }

    #[tokio::test]
    async fn test_success_messages() {
        let (runner, dir) = setup().await;

        let run = runner.dispatch(TaskKind::GenerateReport).await;
        assert_eq!(
            run.message,
            format!("Report generated as '{}'", dir.path().join("task_report.csv").display())
        );

        let run = runner.dispatch(TaskKind::ProvisionUser).await;
        assert!(run.message.starts_with("User created: User_"));
    }

    #[tokio::test]
    async fn test_failure_is_surfaced_not_raised() {
        let (runner, _dir) = setup().await;
        std::fs::write(&runner.settings().backup_dir, b"").unwrap();

        let run = runner.dispatch(TaskKind::Backup).await;
        assert!(!run.success);
        assert!(run.output.is_none());
        assert!(run.message.starts_with("Backup failed: "));
        assert!(!runner.backup().await);
        assert_eq!(runner.database().count_logs().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_snapshot_limits_logs() {
        let (runner, _dir) = setup().await;
        for i in 0..60 {
            runner.database().record_task(&format!("task {}", i)).await.unwrap();
        }
        runner.provision_user().await.unwrap();

        let dashboard = runner.snapshot().await.unwrap();
        assert_eq!(dashboard.recent_logs.len(), 50);
        assert!(dashboard.recent_logs[0].task.starts_with("User provisioned: "));
        assert_eq!(dashboard.users.len(), 1);
    }
}
