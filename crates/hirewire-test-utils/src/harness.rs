// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test harness for end-to-end integration testing.
//!
//! `TestHarness` owns an initialized SQLite storage in a temp directory and
//! the matching configuration, with helpers to seed and inspect conversations.

use std::sync::Arc;

use hirewire_config::model::{HirewireConfig, StorageConfig};
use hirewire_core::{Conversation, FollowUp, HirewireError, Message, StorageAdapter};
use hirewire_storage::{Database, SqliteStorage};

use crate::signing::TEST_SECRET;

/// Builder for creating test environments with configurable options.
pub struct TestHarnessBuilder {
    secret: Option<String>,
    tolerance_secs: u64,
    bearer_token: Option<String>,
}

impl TestHarnessBuilder {
    fn new() -> Self {
        Self {
            secret: Some(TEST_SECRET.to_string()),
            tolerance_secs: 1800,
            bearer_token: None,
        }
    }

    /// Override the webhook secret (`None` leaves it unconfigured).
    pub fn with_secret(mut self, secret: Option<&str>) -> Self {
        self.secret = secret.map(str::to_string);
        self
    }

    pub fn with_tolerance(mut self, secs: u64) -> Self {
        self.tolerance_secs = secs;
        self
    }

    pub fn with_bearer_token(mut self, token: &str) -> Self {
        self.bearer_token = Some(token.to_string());
        self
    }

    /// Build the test harness, creating and migrating a temp database.
    pub async fn build(self) -> Result<TestHarness, HirewireError> {
        let temp_dir = tempfile::TempDir::new().map_err(HirewireError::storage)?;
        let db_path = temp_dir.path().join("test.db");

        let mut config = HirewireConfig::default();
        config.storage = StorageConfig {
            database_path: db_path.to_string_lossy().to_string(),
            wal_mode: true,
        };
        config.webhook.secret = self.secret;
        config.webhook.signature_tolerance_secs = self.tolerance_secs;
        config.server.bearer_token = self.bearer_token;

        let storage = SqliteStorage::new(config.storage.clone());
        storage.initialize().await?;

        Ok(TestHarness {
            storage: Arc::new(storage),
            config,
            _temp_dir: temp_dir,
        })
    }
}

/// A complete test environment with temp storage.
pub struct TestHarness {
    /// SQLite storage adapter (temp DB, cleaned up on drop).
    pub storage: Arc<SqliteStorage>,
    /// Configuration pointing at the temp DB.
    pub config: HirewireConfig,
    /// Temp directory kept alive for cleanup on drop.
    _temp_dir: tempfile::TempDir,
}

impl TestHarness {
    /// Create a new builder for configuring the test harness.
    pub fn builder() -> TestHarnessBuilder {
        TestHarnessBuilder::new()
    }

    /// Harness with default settings.
    pub async fn new() -> Result<Self, HirewireError> {
        Self::builder().build().await
    }

    pub fn database(&self) -> &Database {
        self.storage
            .database()
            .expect("harness storage is initialized in build()")
    }

    /// Registers a conversation for `session_id` owned by `new_hire_id`.
    pub async fn register(
        &self,
        new_hire_id: &str,
        session_id: &str,
    ) -> Result<Conversation, HirewireError> {
        self.storage
            .register_conversation(&Conversation::new(new_hire_id, session_id, "en", None))
            .await
    }

    /// Reloads a conversation, failing if it does not exist.
    pub async fn conversation(&self, id: &str) -> Result<Conversation, HirewireError> {
        self.storage
            .get_conversation(id)
            .await?
            .ok_or_else(|| HirewireError::NotFound(format!("conversation {id}")))
    }

    pub async fn messages(&self, conversation_id: &str) -> Result<Vec<Message>, HirewireError> {
        self.storage.get_messages(conversation_id).await
    }

    pub async fn follow_ups(&self, conversation_id: &str) -> Result<Vec<FollowUp>, HirewireError> {
        self.storage.get_follow_ups(conversation_id).await
    }

    /// Row counts of (conversations, messages, follow_ups), including soft-deleted rows.
    pub async fn row_counts(&self) -> Result<(i64, i64, i64), HirewireError> {
        self.database()
            .transact(|tx| {
                let count = |table: &str| -> rusqlite::Result<i64> {
                    tx.query_row(&format!("SELECT COUNT(*) FROM {table}"), [], |r| r.get(0))
                };
                Ok((
                    count("conversations")?,
                    count("conversation_messages")?,
                    count("follow_ups")?,
                ))
            })
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn harness_builds_with_empty_database() {
        let harness = TestHarness::new().await.unwrap();
        assert_eq!(harness.row_counts().await.unwrap(), (0, 0, 0));
        assert_eq!(harness.config.webhook.secret.as_deref(), Some(TEST_SECRET));
    }

    #[tokio::test]
    async fn register_is_visible() {
        let harness = TestHarness::new().await.unwrap();
        let conv = harness.register("hire-1", "sess-1").await.unwrap();
        let loaded = harness.conversation(&conv.id).await.unwrap();
        assert_eq!(loaded.session_id, "sess-1");
    }
}
