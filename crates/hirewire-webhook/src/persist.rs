// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Stores extracted questions as pending follow-ups.

use chrono::Utc;
use hirewire_core::types::uuid_v4;
use hirewire_core::{Conversation, FollowUp, FollowUpStatus};
use hirewire_extract::ExtractedQuestion;
use hirewire_storage::queries::follow_ups;
use rusqlite::Connection;
use tracing::debug;

/// Inserts each item unless a live follow-up with the same text exists for the
/// conversation. Returns the number of follow-ups created.
pub fn persist_questions(
    conn: &Connection,
    conversation: &Conversation,
    items: &[ExtractedQuestion],
) -> rusqlite::Result<usize> {
    let mut created = 0;
    for item in items {
        if follow_ups::exists_active(conn, &conversation.id, &item.question)? {
            debug!(conversation_id = %conversation.id, "follow-up already recorded");
            continue;
        }
        let now = Utc::now();
        follow_ups::insert(
            conn,
            &FollowUp {
                id: uuid_v4(),
                new_hire_id: conversation.new_hire_id.clone(),
                conversation_id: Some(conversation.id.clone()),
                question: item.question.clone(),
                context: Some(item.context.clone()),
                category: item.category,
                priority: item.priority,
                status: FollowUpStatus::Pending,
                asked_at: now,
                created_at: now,
                deleted_at: None,
            },
        )?;
        created += 1;
    }
    Ok(created)
}
