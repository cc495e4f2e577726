// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Conversation CRUD operations.

use chrono::Utc;
use hirewire_core::HirewireError;
use rusqlite::{Connection, OptionalExtension, Row, params};
use serde_json::{Map, Value};

use crate::database::Database;
use crate::models::Conversation;

const COLUMNS: &str = "id, new_hire_id, session_id, external_conversation_id, language, agent_id,
     start_time, end_time, duration_seconds, full_transcript, summary, completion_status,
     metadata, created_at, updated_at";

fn row_to_conversation(row: &Row<'_>) -> rusqlite::Result<Conversation> {
    let metadata: Value = row.get(12)?;
    Ok(Conversation {
        id: row.get(0)?,
        new_hire_id: row.get(1)?,
        session_id: row.get(2)?,
        external_conversation_id: row.get(3)?,
        language: row.get(4)?,
        agent_id: row.get(5)?,
        start_time: row.get(6)?,
        end_time: row.get(7)?,
        duration_seconds: row.get(8)?,
        full_transcript: row.get(9)?,
        summary: row.get(10)?,
        completion_status: row.get(11)?,
        metadata: match metadata {
            Value::Object(map) => map,
            _ => Map::new(),
        },
        created_at: row.get(13)?,
        updated_at: row.get(14)?,
    })
}

fn find_one(conn: &Connection, column: &str, value: &str) -> rusqlite::Result<Option<Conversation>> {
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM conversations WHERE {column} = ?1"),
        params![value],
        row_to_conversation,
    )
    .optional()
}

/// Looks up a conversation by local id.
pub fn find_by_id(conn: &Connection, id: &str) -> rusqlite::Result<Option<Conversation>> {
    find_one(conn, "id", id)
}

/// Looks up a conversation by the provider-issued conversation id.
pub fn find_by_external_id(
    conn: &Connection,
    external_id: &str,
) -> rusqlite::Result<Option<Conversation>> {
    find_one(conn, "external_conversation_id", external_id)
}

/// Looks up a conversation by its local session id.
pub fn find_by_session_id(
    conn: &Connection,
    session_id: &str,
) -> rusqlite::Result<Option<Conversation>> {
    find_one(conn, "session_id", session_id)
}

/// Inserts a conversation unless its session id is already registered, then
/// returns the stored row for that session.
pub fn insert_or_get(conn: &Connection, c: &Conversation) -> rusqlite::Result<Conversation> {
    conn.execute(
        &format!(
            "INSERT INTO conversations ({COLUMNS})
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14, ?15)
             ON CONFLICT(session_id) DO NOTHING"
        ),
        params![
            c.id,
            c.new_hire_id,
            c.session_id,
            c.external_conversation_id,
            c.language,
            c.agent_id,
            c.start_time,
            c.end_time,
            c.duration_seconds,
            c.full_transcript,
            c.summary,
            c.completion_status,
            Value::Object(c.metadata.clone()),
            c.created_at,
            c.updated_at,
        ],
    )?;
    find_by_session_id(conn, &c.session_id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
}

/// Writes every mutable column of `c` back to its row and bumps `updated_at`.
pub fn update(conn: &Connection, c: &Conversation) -> rusqlite::Result<()> {
    conn.execute(
        "UPDATE conversations SET
             external_conversation_id = ?2, language = ?3, agent_id = ?4,
             start_time = ?5, end_time = ?6, duration_seconds = ?7,
             full_transcript = ?8, summary = ?9, completion_status = ?10,
             metadata = ?11, updated_at = ?12
         WHERE id = ?1",
        params![
            c.id,
            c.external_conversation_id,
            c.language,
            c.agent_id,
            c.start_time,
            c.end_time,
            c.duration_seconds,
            c.full_transcript,
            c.summary,
            c.completion_status,
            Value::Object(c.metadata.clone()),
            Utc::now(),
        ],
    )?;
    Ok(())
}

/// Result of attaching a provider conversation id to a local conversation.
#[derive(Debug)]
pub enum ExternalLink {
    /// The id was stored, or was already stored with the same value.
    Linked(Conversation),
    /// The conversation already carries a different provider id.
    AlreadyLinked(String),
    /// Another conversation already carries this provider id.
    HeldBy(String),
    Missing,
}

/// Fills `external_conversation_id` on conversation `id` if it is unset.
pub fn link_external(
    conn: &Connection,
    id: &str,
    external_id: &str,
) -> rusqlite::Result<ExternalLink> {
    let Some(conversation) = find_by_id(conn, id)? else {
        return Ok(ExternalLink::Missing);
    };
    match conversation.external_conversation_id.as_deref() {
        Some(current) if current == external_id => {
            return Ok(ExternalLink::Linked(conversation));
        }
        Some(current) => return Ok(ExternalLink::AlreadyLinked(current.to_string())),
        None => {}
    }
    if let Some(holder) = find_by_external_id(conn, external_id)? {
        return Ok(ExternalLink::HeldBy(holder.id));
    }

    conn.execute(
        "UPDATE conversations SET external_conversation_id = ?2, updated_at = ?3
         WHERE id = ?1 AND external_conversation_id IS NULL",
        params![id, external_id, Utc::now()],
    )?;
    find_by_id(conn, id)?
        .map(ExternalLink::Linked)
        .ok_or(rusqlite::Error::QueryReturnedNoRows)
}

/// Links a provider conversation id, mapping refusals onto [`HirewireError`].
pub async fn link_external_id(
    db: &Database,
    id: &str,
    external_id: &str,
) -> Result<Conversation, HirewireError> {
    let (conv_id, ext_id) = (id.to_string(), external_id.to_string());
    let outcome = db
        .transact(move |tx| link_external(tx, &conv_id, &ext_id))
        .await?;
    match outcome {
        ExternalLink::Linked(conversation) => Ok(conversation),
        ExternalLink::AlreadyLinked(current) => Err(HirewireError::Conflict(format!(
            "conversation {id} is already linked to {current}"
        ))),
        ExternalLink::HeldBy(holder) => Err(HirewireError::Conflict(format!(
            "{external_id} is already linked to conversation {holder}"
        ))),
        ExternalLink::Missing => Err(HirewireError::NotFound(format!("conversation {id}"))),
    }
}

/// Registers a conversation, returning the existing row when the session is known.
pub async fn register_conversation(
    db: &Database,
    conversation: &Conversation,
) -> Result<Conversation, HirewireError> {
    let conversation = conversation.clone();
    db.transact(move |tx| insert_or_get(tx, &conversation)).await
}

/// Get a conversation by local id.
pub async fn get_conversation(
    db: &Database,
    id: &str,
) -> Result<Option<Conversation>, HirewireError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| find_by_id(conn, &id))
        .await
        .map_err(crate::database::map_tr_err)
}
