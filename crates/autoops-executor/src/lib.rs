pub mod error;
pub mod executor;
pub mod backup;
pub mod provision;
pub mod report;
pub mod csv;
pub mod runner;

// Re-exports
pub use error::{Error, Result};
pub use executor::{TaskExecutor, TaskOutput};
pub use backup::{BackupExecutor, BackupSummary};
pub use provision::{ProvisionExecutor, ProvisionedUser};
pub use report::{Report, ReportExecutor};
pub use runner::{Dashboard, TaskRun, TaskRunner};

/// Audit message written by a successful backup
pub const BACKUP_COMPLETED: &str = "Backup completed";

/// Audit message written by a successful report export
pub const REPORT_GENERATED: &str = "Report generated";

/// Audit message written when `name` is provisioned
pub fn user_provisioned(name: &str) -> String {
    format!("User provisioned: {}", name)
}
