use crate::{
    models::{LogEntry, UserRecord},
    Error, Result,
};
use autoops_core::{Clock, SystemClock};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    Sqlite, SqlitePool, Transaction,
};
use std::path::{Path, PathBuf};
use std::sync::Arc;

pub type StoreTransaction = Transaction<'static, Sqlite>;

/// Handle on the SQLite task store.
///
/// Holds a single-connection pool so every statement against the file is
/// serialised, and the clock used to stamp audit rows.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
    path: PathBuf,
    clock: Arc<dyn Clock>,
}

impl Database {
    /// Open the store at `path`, creating the file if it does not exist
    pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref().to_path_buf();

        // Rollback journal keeps every committed page in the main file, so a
        // plain copy of it is a complete backup.
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Delete);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|source| Error::Connection {
                path: path.clone(),
                source,
            })?;

        tracing::debug!("Opened task store at {}", path.display());

        Ok(Self {
            pool,
            path,
            clock: Arc::new(SystemClock),
        })
    }

    /// Replace the clock used for audit timestamps
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn clock(&self) -> &Arc<dyn Clock> {
        &self.clock
    }

    /// Path of the store file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Initialize database schema. Safe to call on every start.
    pub async fn init_schema(&self) -> Result<()> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                task TEXT NOT NULL,
                timestamp TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS users (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL
            )
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn begin(&self) -> Result<StoreTransaction> {
        Ok(self.pool.begin().await?)
    }

    pub async fn commit(&self, tx: StoreTransaction) -> Result<()> {
        tx.commit().await?;
        Ok(())
    }

    // ========================================================================
    // Task Log Operations
    // ========================================================================

    /// Append one audit row stamped with the current local time
    pub async fn record_task(&self, description: &str) -> Result<LogEntry> {
        let timestamp = self.clock.timestamp();

        let result = sqlx::query("INSERT INTO logs (task, timestamp) VALUES (?, ?)")
            .bind(description)
            .bind(&timestamp)
            .execute(&self.pool)
            .await?;

        let entry = LogEntry {
            id: result.last_insert_rowid(),
            task: description.to_string(),
            timestamp,
        };
        tracing::debug!(id = entry.id, "Recorded task: {}", entry.task);

        Ok(entry)
    }

    /// Same as [`Database::record_task`], inside the caller's transaction
    pub async fn record_task_in(
        &self,
        tx: &mut StoreTransaction,
        description: &str,
    ) -> Result<LogEntry> {
        let timestamp = self.clock.timestamp();

        let result = sqlx::query("INSERT INTO logs (task, timestamp) VALUES (?, ?)")
            .bind(description)
            .bind(&timestamp)
            .execute(&mut **tx)
            .await?;

        Ok(LogEntry {
            id: result.last_insert_rowid(),
            task: description.to_string(),
            timestamp,
        })
    }

    /// Most recent log rows first
    pub async fn recent_logs(&self, limit: i64) -> Result<Vec<LogEntry>> {
        let logs = sqlx::query_as::<_, LogEntry>(
            "SELECT id, task, timestamp FROM logs ORDER BY id DESC LIMIT ?",
        )
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    /// Every log row, most recent first
    pub async fn all_logs(&self) -> Result<Vec<LogEntry>> {
        let logs = sqlx::query_as::<_, LogEntry>(
            "SELECT id, task, timestamp FROM logs ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(logs)
    }

    pub async fn count_logs(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM logs")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }

    // ========================================================================
    // User Operations
    // ========================================================================

    /// Insert a user inside `tx`.
    ///
    /// Returns `None` when a user with that name already exists. The schema
    /// carries no uniqueness constraint, so stores holding duplicate names
    /// stay readable; the check runs in the same transaction as the insert.
    pub async fn insert_user_in(
        &self,
        tx: &mut StoreTransaction,
        name: &str,
    ) -> Result<Option<UserRecord>> {
        let taken = sqlx::query_scalar::<_, i64>("SELECT 1 FROM users WHERE name = ? LIMIT 1")
            .bind(name)
            .fetch_optional(&mut **tx)
            .await?;

        if taken.is_some() {
            tracing::debug!("Username already taken: {}", name);
            return Ok(None);
        }

        let result = sqlx::query("INSERT INTO users (name) VALUES (?)")
            .bind(name)
            .execute(&mut **tx)
            .await?;

        Ok(Some(UserRecord {
            id: result.last_insert_rowid(),
            name: name.to_string(),
        }))
    }

    /// All users, newest first
    pub async fn users(&self) -> Result<Vec<UserRecord>> {
        let users = sqlx::query_as::<_, UserRecord>(
            "SELECT id, name FROM users ORDER BY id DESC",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(users)
    }

    pub async fn count_users(&self) -> Result<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM users")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
