// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Follow-up (HR question) CRUD operations.

use chrono::Utc;
use hirewire_core::HirewireError;
use hirewire_core::FollowUpStatus;
use rusqlite::{Connection, OptionalExtension, Row, params};

use crate::database::Database;
use crate::models::FollowUp;
use crate::queries::parse_column;

/// Whether a non-deleted follow-up with exactly this question text exists
/// for the conversation.
pub fn exists_active(
    conn: &Connection,
    conversation_id: &str,
    question: &str,
) -> rusqlite::Result<bool> {
    conn.query_row(
        "SELECT EXISTS(
             SELECT 1 FROM follow_ups
             WHERE conversation_id = ?1 AND question = ?2 AND deleted_at IS NULL
         )",
        params![conversation_id, question],
        |row| row.get(0),
    )
}

/// Insert a new follow-up.
pub fn insert(conn: &Connection, f: &FollowUp) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO follow_ups
             (id, new_hire_id, conversation_id, question, context, category, priority,
              status, asked_at, created_at, deleted_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        params![
            f.id,
            f.new_hire_id,
            f.conversation_id,
            f.question,
            f.context,
            f.category.as_str(),
            f.priority.as_str(),
            f.status.as_str(),
            f.asked_at,
            f.created_at,
            f.deleted_at,
        ],
    )?;
    Ok(())
}

const COLUMNS: &str = "id, new_hire_id, conversation_id, question, context, category, priority,
     status, asked_at, created_at, deleted_at";

fn row_to_follow_up(row: &Row<'_>) -> rusqlite::Result<FollowUp> {
    Ok(FollowUp {
        id: row.get(0)?,
        new_hire_id: row.get(1)?,
        conversation_id: row.get(2)?,
        question: row.get(3)?,
        context: row.get(4)?,
        category: parse_column(5, row.get(5)?)?,
        priority: parse_column(6, row.get(6)?)?,
        status: parse_column(7, row.get(7)?)?,
        asked_at: row.get(8)?,
        created_at: row.get(9)?,
        deleted_at: row.get(10)?,
    })
}

/// Non-deleted follow-ups of a conversation in insertion order.
pub fn list_for_conversation(
    conn: &Connection,
    conversation_id: &str,
) -> rusqlite::Result<Vec<FollowUp>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {COLUMNS} FROM follow_ups
         WHERE conversation_id = ?1 AND deleted_at IS NULL
         ORDER BY created_at ASC, rowid ASC"
    ))?;
    let rows = stmt.query_map(params![conversation_id], row_to_follow_up)?;
    rows.collect()
}

/// Sets the status of a live follow-up and returns the updated row.
pub fn update_status(
    conn: &Connection,
    id: &str,
    status: FollowUpStatus,
) -> rusqlite::Result<Option<FollowUp>> {
    let changed = conn.execute(
        "UPDATE follow_ups SET status = ?2 WHERE id = ?1 AND deleted_at IS NULL",
        params![id, status.as_str()],
    )?;
    if changed == 0 {
        return Ok(None);
    }
    conn.query_row(
        &format!("SELECT {COLUMNS} FROM follow_ups WHERE id = ?1"),
        params![id],
        row_to_follow_up,
    )
    .optional()
}

/// Marks a follow-up deleted. Returns whether a live row was affected.
pub fn soft_delete(conn: &Connection, id: &str) -> rusqlite::Result<bool> {
    let changed = conn.execute(
        "UPDATE follow_ups SET deleted_at = ?2 WHERE id = ?1 AND deleted_at IS NULL",
        params![id, Utc::now()],
    )?;
    Ok(changed > 0)
}

/// Get the live follow-ups of a conversation.
pub async fn get_follow_ups(
    db: &Database,
    conversation_id: &str,
) -> Result<Vec<FollowUp>, HirewireError> {
    let conversation_id = conversation_id.to_string();
    db.connection()
        .call(move |conn| list_for_conversation(conn, &conversation_id))
        .await
        .map_err(crate::database::map_tr_err)
}

/// Move a live follow-up to a new status.
pub async fn set_follow_up_status(
    db: &Database,
    id: &str,
    status: FollowUpStatus,
) -> Result<Option<FollowUp>, HirewireError> {
    let id = id.to_string();
    db.transact(move |tx| update_status(tx, &id, status)).await
}

/// Soft-delete a follow-up by id.
pub async fn delete_follow_up(db: &Database, id: &str) -> Result<bool, HirewireError> {
    let id = id.to_string();
    db.connection()
        .call(move |conn| soft_delete(conn, &id))
        .await
        .map_err(crate::database::map_tr_err)
}
