// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Turns transcript turns into sequence-numbered messages, once per conversation.

use chrono::{DateTime, Duration, Utc};
use hirewire_core::types::uuid_v4;
use hirewire_core::{Conversation, Message, Speaker, Turn};
use hirewire_storage::queries::messages;
use rusqlite::Connection;
use tracing::{debug, info};

use crate::event::EventData;
use crate::merge::from_unix;

/// Materializes the event transcript into messages unless already ingested.
///
/// Sets the ingestion flag and rebuilds `full_transcript` on the in-memory
/// record. Returns the number of messages written.
pub fn materialize(
    conn: &Connection,
    conversation: &mut Conversation,
    data: &EventData,
) -> rusqlite::Result<usize> {
    if conversation.transcript_ingested() {
        debug!(conversation_id = %conversation.id, "transcript already ingested, skipping");
        return Ok(0);
    }

    let base_time = conversation
        .start_time
        .or_else(|| data.metadata.start_time_unix_secs.and_then(from_unix));
    let existing = messages::count_for_conversation(conn, &conversation.id)?;

    let batch = build_messages(&conversation.id, base_time, existing, &data.transcript);
    for message in &batch {
        messages::insert(conn, message)?;
    }

    conversation.mark_transcript_ingested();
    conversation.full_transcript = render_full_transcript(&data.transcript);

    info!(
        conversation_id = %conversation.id,
        messages = batch.len(),
        "transcript materialized"
    );
    Ok(batch.len())
}

/// Builds messages for every non-blank turn, numbering from `existing + 1`.
pub fn build_messages(
    conversation_id: &str,
    base_time: Option<DateTime<Utc>>,
    existing: i64,
    turns: &[Turn],
) -> Vec<Message> {
    let now = Utc::now();
    let mut sequence = existing;
    turns
        .iter()
        .filter(|turn| !turn.text().is_empty())
        .map(|turn| {
            sequence += 1;
            Message {
                id: uuid_v4(),
                conversation_id: conversation_id.to_string(),
                speaker: Speaker::from_role(turn.role.as_deref().unwrap_or_default()),
                content: turn.text().to_string(),
                timestamp: base_time.zip(turn.time_in_call_secs).and_then(offset),
                sequence_number: sequence,
                created_at: now,
            }
        })
        .collect()
}

fn offset((base, secs): (DateTime<Utc>, f64)) -> Option<DateTime<Utc>> {
    let millis = (secs * 1000.0).round() as i64;
    Duration::try_milliseconds(millis).and_then(|d| base.checked_add_signed(d))
}

/// Renders `Role: message` lines for human review. `None` when no turn has text.
pub fn render_full_transcript(turns: &[Turn]) -> Option<String> {
    let lines: Vec<String> = turns
        .iter()
        .filter(|turn| !turn.text().is_empty())
        .map(|turn| format!("{}: {}", capitalize(turn.role.as_deref()), turn.text()))
        .collect();
    (!lines.is_empty()).then(|| lines.join("\n"))
}

fn capitalize(role: Option<&str>) -> String {
    let role = role.filter(|r| !r.is_empty()).unwrap_or("unknown");
    let mut chars = role.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
        None => String::new(),
    }
}
