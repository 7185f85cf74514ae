pub mod models;
pub mod repository;
pub mod error;

// Re-exports
pub use models::{LogEntry, UserRecord};
pub use repository::{Database, StoreTransaction};
pub use error::{Error, Result};
