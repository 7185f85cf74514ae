use async_trait::async_trait;
use autoops_core::TaskKind;
use autoops_db::LogEntry;
use serde::{Deserialize, Serialize};

use crate::{BackupSummary, ProvisionedUser, Report, Result};

/// What a completed task produced.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum TaskOutput {
    Backup(BackupSummary),
    Provisioned(ProvisionedUser),
    Report(Report),
}

impl TaskOutput {
    /// Audit row written for this run
    pub fn log(&self) -> &LogEntry {
        match self {
            TaskOutput::Backup(summary) => &summary.log,
            TaskOutput::Provisioned(provisioned) => &provisioned.log,
            TaskOutput::Report(report) => &report.log,
        }
    }
}

/// One automation action.
///
/// `execute` performs the effect and records exactly one audit row. Any error
/// means no row was recorded.
#[async_trait]
pub trait TaskExecutor: Send + Sync {
    fn kind(&self) -> TaskKind;

    async fn execute(&self) -> Result<TaskOutput>;
}
