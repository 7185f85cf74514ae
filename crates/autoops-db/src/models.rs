use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// One audit row: a task that completed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct LogEntry {
    pub id: i64,
    pub task: String,
    /// Local time, ISO-8601 without offset
    pub timestamp: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
pub struct UserRecord {
    pub id: i64,
    pub name: String,
}
