use serde::{Deserialize, Serialize};

use crate::Error;

/// The fixed catalogue of automation tasks a user can pick from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TaskKind {
    Backup,
    ProvisionUser,
    GenerateReport,
}

impl TaskKind {
    pub const ALL: [TaskKind; 3] = [
        TaskKind::Backup,
        TaskKind::ProvisionUser,
        TaskKind::GenerateReport,
    ];

    /// Label shown in the task selector
    pub fn label(&self) -> &'static str {
        match self {
            TaskKind::Backup => "Backup Files",
            TaskKind::ProvisionUser => "Provision User",
            TaskKind::GenerateReport => "Generate Report",
        }
    }

    /// Stable identifier used on the command line and in URLs
    pub fn slug(&self) -> &'static str {
        match self {
            TaskKind::Backup => "backup",
            TaskKind::ProvisionUser => "provision-user",
            TaskKind::GenerateReport => "generate-report",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TaskKind::Backup => "Saves a copy of the task database",
            TaskKind::ProvisionUser => "Creates a new simulated user",
            TaskKind::GenerateReport => "Exports task logs to CSV",
        }
    }

    /// Prefix of the surfaced message when a run of this task fails
    pub fn failure_prefix(&self) -> &'static str {
        match self {
            TaskKind::Backup => "Backup failed",
            TaskKind::ProvisionUser => "User provisioning failed",
            TaskKind::GenerateReport => "Report generation failed",
        }
    }
}

impl std::fmt::Display for TaskKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl std::str::FromStr for TaskKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['_', ' '], "-");
        match normalized.as_str() {
            "backup" | "backup-files" => Ok(TaskKind::Backup),
            "provision" | "provision-user" => Ok(TaskKind::ProvisionUser),
            "report" | "generate-report" => Ok(TaskKind::GenerateReport),
            _ => Err(Error::UnknownTask(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_labels_and_slugs() {
        assert_eq!("Backup Files".parse::<TaskKind>().unwrap(), TaskKind::Backup);
        assert_eq!("provision-user".parse::<TaskKind>().unwrap(), TaskKind::ProvisionUser);
        assert_eq!("generate_report".parse::<TaskKind>().unwrap(), TaskKind::GenerateReport);
        assert_eq!("  REPORT ".parse::<TaskKind>().unwrap(), TaskKind::GenerateReport);
    }

    #[test]
    fn test_parse_unknown_task() {
        let err = "restore".parse::<TaskKind>().unwrap_err();
        assert!(matches!(err, Error::UnknownTask(name) if name == "restore"));
    }

    #[test]
    fn test_slug_round_trips() {
        for kind in TaskKind::ALL {
            assert_eq!(kind.slug().parse::<TaskKind>().unwrap(), kind);
            assert_eq!(kind.label().parse::<TaskKind>().unwrap(), kind);
        }
    }

    #[test]
    fn test_serde_uses_slugs() {
        let json = serde_json::to_string(&TaskKind::ProvisionUser).unwrap();
        assert_eq!(json, "\"provision-user\"");
    }
}
