// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! SQLite implementation of the StorageAdapter trait.

use async_trait::async_trait;
use tokio::sync::OnceCell;
use tracing::debug;

use hirewire_config::model::StorageConfig;
use hirewire_core::types::{Conversation, FollowUp, FollowUpStatus, Message};
use hirewire_core::{AdapterType, HealthStatus, HirewireError, PluginAdapter, StorageAdapter};

use crate::database::Database;
use crate::queries;

/// SQLite-backed storage adapter.
///
/// Wraps a [`Database`] handle and delegates all query operations to the
/// typed query modules. The database is lazily initialized on the first
/// call to [`StorageAdapter::initialize`].
pub struct SqliteStorage {
    config: StorageConfig,
    db: OnceCell<Database>,
}

impl SqliteStorage {
    /// Create a new SqliteStorage with the given configuration.
    ///
    /// The database connection is not opened until [`StorageAdapter::initialize`] is called.
    pub fn new(config: StorageConfig) -> Self {
        Self {
            config,
            db: OnceCell::new(),
        }
    }

    /// Returns the underlying Database, or an error if not initialized.
    ///
    /// The webhook pipeline uses this to run its multi-table transaction.
    pub fn database(&self) -> Result<&Database, HirewireError> {
        self.db.get().ok_or_else(|| HirewireError::Storage {
            source: "storage not initialized -- call initialize() first".into(),
        })
    }

    async fn checkpoint(&self, db: &Database) -> Result<(), HirewireError> {
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)
    }
}

#[async_trait]
impl PluginAdapter for SqliteStorage {
    fn name(&self) -> &str {
        "sqlite"
    }

    fn version(&self) -> semver::Version {
        semver::Version::new(0, 1, 0)
    }

    fn adapter_type(&self) -> AdapterType {
        AdapterType::Storage
    }

    async fn health_check(&self) -> Result<HealthStatus, HirewireError> {
        let db = self.database()?;
        db.connection()
            .call(|conn| -> Result<(), rusqlite::Error> {
                conn.execute_batch("SELECT 1;")?;
                Ok(())
            })
            .await
            .map_err(crate::database::map_tr_err)?;
        Ok(HealthStatus::Healthy)
    }

    async fn shutdown(&self) -> Result<(), HirewireError> {
        if let Some(db) = self.db.get() {
            self.checkpoint(db).await?;
            debug!("shutdown: WAL checkpoint complete");
        }
        Ok(())
    }
}

#[async_trait]
impl StorageAdapter for SqliteStorage {
    async fn initialize(&self) -> Result<(), HirewireError> {
        let db = Database::open_with(&self.config.database_path, self.config.wal_mode).await?;
        self.db.set(db).map_err(|_| HirewireError::Storage {
            source: "storage already initialized".into(),
        })?;
        debug!(path = %self.config.database_path, "SQLite storage initialized");
        Ok(())
    }

    async fn close(&self) -> Result<(), HirewireError> {
        let db = self.database()?;
        self.checkpoint(db).await?;
        debug!("WAL checkpoint complete");
        Ok(())
    }

    async fn register_conversation(
        &self,
        conversation: &Conversation,
    ) -> Result<Conversation, HirewireError> {
        queries::conversations::register_conversation(self.database()?, conversation).await
    }

    async fn link_external_id(
        &self,
        id: &str,
        external_id: &str,
    ) -> Result<Conversation, HirewireError> {
        queries::conversations::link_external_id(self.database()?, id, external_id).await
    }

    async fn get_conversation(&self, id: &str) -> Result<Option<Conversation>, HirewireError> {
        queries::conversations::get_conversation(self.database()?, id).await
    }

    async fn get_messages(&self, conversation_id: &str) -> Result<Vec<Message>, HirewireError> {
        queries::messages::get_messages(self.database()?, conversation_id).await
    }

    async fn get_follow_ups(
        &self,
        conversation_id: &str,
    ) -> Result<Vec<FollowUp>, HirewireError> {
        queries::follow_ups::get_follow_ups(self.database()?, conversation_id).await
    }

    async fn set_follow_up_status(
        &self,
        id: &str,
        status: FollowUpStatus,
    ) -> Result<Option<FollowUp>, HirewireError> {
        queries::follow_ups::set_follow_up_status(self.database()?, id, status).await
    }

    async fn delete_follow_up(&self, id: &str) -> Result<bool, HirewireError> {
        queries::follow_ups::delete_follow_up(self.database()?, id).await
    }
}
