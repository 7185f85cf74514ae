use async_trait::async_trait;
use autoops_core::{username_for, TaskKind};
use autoops_db::{Database, LogEntry, UserRecord};
use serde::{Deserialize, Serialize};

use crate::{user_provisioned, Error, Result, TaskExecutor, TaskOutput};

/// Names tried for one provisioning: the base name, then `_2` up to `_100`.
const MAX_USERNAME_ATTEMPTS: u32 = 100;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProvisionedUser {
    pub user: UserRecord,
    pub log: LogEntry,
}

/// Creates a simulated user named after the current second.
///
/// The user row and its audit row are written in one transaction. A name
/// already taken within the same second gets a numeric suffix.
pub struct ProvisionExecutor {
    db: Database,
}

impl ProvisionExecutor {
    pub fn new(db: Database) -> Self {
        Self { db }
    }

    pub async fn run(&self) -> Result<ProvisionedUser> {
        let base = username_for(self.db.clock().now());
        let mut tx = self.db.begin().await?;

        for attempt in 1..=MAX_USERNAME_ATTEMPTS {
            let candidate = if attempt == 1 {
                base.clone()
            } else {
                format!("{}_{}", base, attempt)
            };

            if let Some(user) = self.db.insert_user_in(&mut tx, &candidate).await? {
                let log = self
                    .db
                    .record_task_in(&mut tx, &user_provisioned(&user.name))
                    .await?;
                self.db.commit(tx).await?;

                tracing::info!("User provisioned: {} (id {})", user.name, user.id);
                return Ok(ProvisionedUser { user, log });
            }
        }

        Err(Error::UsernameExhausted {
            base,
            attempts: MAX_USERNAME_ATTEMPTS,
        })
    }
}

#[async_trait]
impl TaskExecutor for ProvisionExecutor {
    fn kind(&self) -> TaskKind {
        TaskKind::ProvisionUser
    }

    async fn execute(&self) -> Result<TaskOutput> {
        self.run().await.map(TaskOutput::Provisioned)
    }
}
