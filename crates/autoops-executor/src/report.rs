use async_trait::async_trait;
use autoops_core::{Settings, TaskKind};
use autoops_db::{Database, LogEntry};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{csv, Error, Result, TaskExecutor, TaskOutput, REPORT_GENERATED};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub path: PathBuf,
    /// The exported rows, newest first
    pub rows: Vec<LogEntry>,
    pub log: LogEntry,
}

/// Exports the whole audit log to a CSV file, replacing any earlier report.
pub struct ReportExecutor {
    db: Database,
    path: PathBuf,
}

impl ReportExecutor {
    pub fn new(db: Database, settings: &Settings) -> Self {
        Self {
            db,
            path: settings.report_path.clone(),
        }
    }

    pub async fn run(&self) -> Result<Report> {
        let rows = self.db.all_logs().await?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(Error::file("creating report directory", parent))?;
        }

        tokio::fs::write(&self.path, csv::render_logs(&rows))
            .await
            .map_err(Error::file("writing report", &self.path))?;

        tracing::info!("Exported {} log rows to {}", rows.len(), self.path.display());

        let log = self.db.record_task(REPORT_GENERATED).await?;

        Ok(Report {
            path: self.path.clone(),
            rows,
            log,
        })
    }
}

#[async_trait]
impl TaskExecutor for ReportExecutor {
    fn kind(&self) -> TaskKind {
        TaskKind::GenerateReport
    }

    async fn execute(&self) -> Result<TaskOutput> {
        self.run().await.map(TaskOutput::Report)
    }
}
