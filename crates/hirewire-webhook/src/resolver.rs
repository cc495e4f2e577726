// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Maps an event to the local conversation it belongs to.

use hirewire_core::Conversation;
use hirewire_storage::queries::conversations;
use rusqlite::Connection;
use tracing::debug;

use crate::event::EventData;

/// Resolves by provider conversation id first, then by session id.
///
/// `None` means the event is unattributable.
pub fn resolve(conn: &Connection, data: &EventData) -> rusqlite::Result<Option<Conversation>> {
    if let Some(external_id) = data.conversation_id.as_deref()
        && let Some(conversation) = conversations::find_by_external_id(conn, external_id)?
    {
        debug!(external_id, conversation_id = %conversation.id, "resolved by external id");
        return Ok(Some(conversation));
    }

    if let Some(session_id) = data.session_key() {
        let found = conversations::find_by_session_id(conn, session_id)?;
        if let Some(conversation) = &found {
            debug!(session_id, conversation_id = %conversation.id, "resolved by session id");
        }
        return Ok(found);
    }

    Ok(None)
}
