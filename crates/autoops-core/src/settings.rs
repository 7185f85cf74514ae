use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::Result;

const ENV_PREFIX: &str = "AUTOOPS";
const DEFAULT_CONFIG_NAME: &str = "autoops";

/// Runtime settings: where the store and its derived artifacts live.
///
/// Resolved from built-in defaults, then an optional TOML/YAML/JSON file,
/// then `AUTOOPS_*` environment variables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// SQLite store file
    pub database_path: PathBuf,
    /// Directory receiving the store backup
    pub backup_dir: PathBuf,
    /// File name of the backup inside `backup_dir`
    pub backup_file: String,
    /// CSV export of the audit log
    pub report_path: PathBuf,
    /// Number of log rows shown in the dashboard
    pub recent_log_limit: i64,
    pub api_port: u16,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            database_path: PathBuf::from("tasks.db"),
            backup_dir: PathBuf::from("backup"),
            backup_file: "tasks_backup.db".to_string(),
            report_path: PathBuf::from("task_report.csv"),
            recent_log_limit: 50,
            api_port: 3000,
        }
    }
}

impl Settings {
    /// Load settings, reading `file` if given or `autoops.*` from the
    /// working directory when present.
    pub fn load(file: Option<&Path>) -> Result<Self> {
        let defaults = Settings::default();

        let mut builder = Config::builder()
            .set_default("database_path", path_str(&defaults.database_path))?
            .set_default("backup_dir", path_str(&defaults.backup_dir))?
            .set_default("backup_file", defaults.backup_file.clone())?
            .set_default("report_path", path_str(&defaults.report_path))?
            .set_default("recent_log_limit", defaults.recent_log_limit)?
            .set_default("api_port", i64::from(defaults.api_port))?;

        builder = match file {
            Some(path) => builder.add_source(File::from(path).required(true)),
            None => builder.add_source(File::with_name(DEFAULT_CONFIG_NAME).required(false)),
        };

        let settings: Settings = builder
            .add_source(Environment::with_prefix(ENV_PREFIX))
            .build()?
            .try_deserialize()?;

        tracing::debug!(?settings, "Loaded settings");

        Ok(settings)
    }

    /// Settings rooted at `dir`: every artifact path is placed inside it.
    pub fn rooted_at(dir: &Path) -> Self {
        let defaults = Settings::default();
        Self {
            database_path: dir.join(&defaults.database_path),
            backup_dir: dir.join(&defaults.backup_dir),
            report_path: dir.join(&defaults.report_path),
            ..defaults
        }
    }

    pub fn with_database_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.database_path = path.into();
        self
    }

    /// Full path of the backup copy
    pub fn backup_path(&self) -> PathBuf {
        self.backup_dir.join(&self.backup_file)
    }
}

fn path_str(path: &Path) -> String {
    path.to_string_lossy().into_owned()
}
