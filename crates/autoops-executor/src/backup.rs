use async_trait::async_trait;
use autoops_core::{Settings, TaskKind};
use autoops_db::{Database, LogEntry};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::{Error, Result, TaskExecutor, TaskOutput, BACKUP_COMPLETED};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackupSummary {
    pub source: PathBuf,
    pub destination: PathBuf,
    pub bytes: u64,
    pub log: LogEntry,
}

/// Copies the store file to a fixed backup location, replacing any earlier copy.
pub struct BackupExecutor {
    db: Database,
    backup_dir: PathBuf,
    destination: PathBuf,
}

impl BackupExecutor {
    pub fn new(db: Database, settings: &Settings) -> Self {
        Self {
            db,
            backup_dir: settings.backup_dir.clone(),
            destination: settings.backup_path(),
        }
    }

    pub async fn run(&self) -> Result<BackupSummary> {
        let source = self.db.path().to_path_buf();

        tokio::fs::create_dir_all(&self.backup_dir)
            .await
            .map_err(Error::file("creating backup directory", &self.backup_dir))?;

        let bytes = tokio::fs::copy(&source, &self.destination)
            .await
            .map_err(Error::file("copying store", &source))?;

        tracing::info!(
            "Backed up {} to {} ({} bytes)",
            source.display(),
            self.destination.display(),
            bytes
        );

        let log = self.db.record_task(BACKUP_COMPLETED).await?;

        Ok(BackupSummary {
            source,
            destination: self.destination.clone(),
            bytes,
            log,
        })
    }
}

#[async_trait]
impl TaskExecutor for BackupExecutor {
    fn kind(&self) -> TaskKind {
        TaskKind::Backup
    }

    async fn execute(&self) -> Result<TaskOutput> {
        self.run().await.map(TaskOutput::Backup)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn setup() -> (Database, Settings, TempDir) {
        let dir = TempDir::new().unwrap();
        let settings = Settings::rooted_at(dir.path());
        let db = Database::open(&settings.database_path).await.unwrap();
        db.init_schema().await.unwrap();
        (db, settings, dir)
    }

    #[tokio::test]
    async fn test_backup_copies_store_bytes() {
        let (db, settings, _dir) = setup().await;
        db.record_task("seed").await.unwrap();
        let before = std::fs::read(&settings.database_path).unwrap();

        let executor = BackupExecutor::new(db.clone(), &settings);
        let summary = executor.run().await.unwrap();

        let copied = std::fs::read(settings.backup_path()).unwrap();
        assert_eq!(copied, before);
        assert_eq!(summary.bytes, before.len() as u64);
        assert_eq!(summary.log.task, "Backup completed");
        assert_eq!(db.count_logs().await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_backup_overwrites_previous_copy() {
        let (db, settings, _dir) = setup().await;
        std::fs::create_dir_all(&settings.backup_dir).unwrap();
        std::fs::write(settings.backup_path(), b"stale").unwrap();

        BackupExecutor::new(db, &settings).run().await.unwrap();

        let copied = std::fs::read(settings.backup_path()).unwrap();
        assert_ne!(copied, b"stale");
    }

    #[tokio::test]
    async fn test_unusable_backup_dir_records_nothing() {
        let (db, settings, _dir) = setup().await;
        // A plain file where the directory should be
        std::fs::write(&settings.backup_dir, b"").unwrap();

        let err = BackupExecutor::new(db.clone(), &settings).run().await.unwrap_err();
        assert!(matches!(err, Error::File { .. }));
        assert_eq!(db.count_logs().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_missing_store_file_records_nothing() {
        let (db, settings, _dir) = setup().await;
        std::fs::remove_file(&settings.database_path).unwrap();

        let err = BackupExecutor::new(db.clone(), &settings).run().await.unwrap_err();
        assert!(err.to_string().starts_with("copying store"));
        assert!(!settings.backup_path().exists());
        // The pooled connection still holds the unlinked file open
        assert_eq!(db.count_logs().await.unwrap(), 0);
    }
}
