// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Storage adapter trait for persistence backends.

use async_trait::async_trait;

use crate::error::HirewireError;
use crate::traits::adapter::PluginAdapter;
use crate::types::{Conversation, FollowUp, FollowUpStatus, Message};

/// Adapter for the conversation store.
///
/// Covers the read side and conversation registration. The webhook pipeline
/// does not go through this trait: it needs a single transaction spanning
/// several tables, which the concrete SQLite backend provides directly.
#[async_trait]
pub trait StorageAdapter: PluginAdapter {
    /// Initializes the storage backend (migrations, connection, etc.).
    async fn initialize(&self) -> Result<(), HirewireError>;

    /// Closes the storage backend, flushing pending writes.
    async fn close(&self) -> Result<(), HirewireError>;

    /// Registers a conversation, or returns the existing one for the same session id.
    async fn register_conversation(
        &self,
        conversation: &Conversation,
    ) -> Result<Conversation, HirewireError>;

    /// Records the provider-issued conversation id on a registered conversation.
    ///
    /// Fill-only: sending the id already stored is a no-op, while a different
    /// id, or an id held by another conversation, is a
    /// [`HirewireError::Conflict`]. Unknown conversations are
    /// [`HirewireError::NotFound`].
    async fn link_external_id(
        &self,
        id: &str,
        external_id: &str,
    ) -> Result<Conversation, HirewireError>;

    async fn get_conversation(&self, id: &str) -> Result<Option<Conversation>, HirewireError>;

    /// Messages of a conversation ordered by sequence number.
    async fn get_messages(&self, conversation_id: &str) -> Result<Vec<Message>, HirewireError>;

    /// Non-deleted follow-ups of a conversation, oldest first.
    async fn get_follow_ups(&self, conversation_id: &str)
    -> Result<Vec<FollowUp>, HirewireError>;

    /// Moves a live follow-up to `status`. Returns `None` when no live row matched.
    async fn set_follow_up_status(
        &self,
        id: &str,
        status: FollowUpStatus,
    ) -> Result<Option<FollowUp>, HirewireError>;

    /// Soft-deletes a follow-up. Returns `false` when no live row matched.
    async fn delete_follow_up(&self, id: &str) -> Result<bool, HirewireError>;
}
