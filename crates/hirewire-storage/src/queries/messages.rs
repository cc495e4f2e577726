// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Message CRUD operations.

use hirewire_core::HirewireError;
use rusqlite::{Connection, params};

use crate::database::Database;
use crate::models::Message;
use crate::queries::parse_column;

/// Number of messages already stored for a conversation.
pub fn count_for_conversation(conn: &Connection, conversation_id: &str) -> rusqlite::Result<i64> {
    conn.query_row(
        "SELECT COUNT(*) FROM conversation_messages WHERE conversation_id = ?1",
        params![conversation_id],
        |row| row.get(0),
    )
}

/// Insert a new message.
pub fn insert(conn: &Connection, msg: &Message) -> rusqlite::Result<()> {
    conn.execute(
        "INSERT INTO conversation_messages
             (id, conversation_id, speaker, message, timestamp, sequence_number, created_at)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
        params![
            msg.id,
            msg.conversation_id,
            msg.speaker.as_str(),
            msg.content,
            msg.timestamp,
            msg.sequence_number,
            msg.created_at,
        ],
    )?;
    Ok(())
}

/// Messages of a conversation in sequence order.
pub fn list_for_conversation(
    conn: &Connection,
    conversation_id: &str,
) -> rusqlite::Result<Vec<Message>> {
    let mut stmt = conn.prepare(
        "SELECT id, conversation_id, speaker, message, timestamp, sequence_number, created_at
         FROM conversation_messages WHERE conversation_id = ?1
         ORDER BY sequence_number ASC",
    )?;
    let rows = stmt.query_map(params![conversation_id], |row| {
        Ok(Message {
            id: row.get(0)?,
            conversation_id: row.get(1)?,
            speaker: parse_column(2, row.get(2)?)?,
            content: row.get(3)?,
            timestamp: row.get(4)?,
            sequence_number: row.get(5)?,
            created_at: row.get(6)?,
        })
    })?;
    rows.collect()
}

/// Get messages for a conversation in sequence order.
pub async fn get_messages(
    db: &Database,
    conversation_id: &str,
) -> Result<Vec<Message>, HirewireError> {
    let conversation_id = conversation_id.to_string();
    db.connection()
        .call(move |conn| list_for_conversation(conn, &conversation_id))
        .await
        .map_err(crate::database::map_tr_err)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Conversation;
    use crate::queries::conversations::register_conversation;
    use chrono::Utc;
    use hirewire_core::Speaker;
    use hirewire_core::types::uuid_v4;

    async fn setup_db_with_conversation() -> (Database, String) {
        let db = Database::open_in_memory().await.unwrap();
        let conv = register_conversation(&db, &Conversation::new("hire-1", "sess-1", "en", None))
            .await
            .unwrap();
        (db, conv.id)
    }

    fn make_msg(conversation_id: &str, speaker: Speaker, content: &str, seq: i64) -> Message {
        Message {
            id: uuid_v4(),
            conversation_id: conversation_id.to_string(),
            speaker,
            content: content.to_string(),
            timestamp: None,
            sequence_number: seq,
            created_at: Utc::now(),
        }
    }

    #[tokio::test]
    async fn insert_and_list_in_sequence_order() {
        let (db, conv_id) = setup_db_with_conversation().await;
        let msgs = vec![
            make_msg(&conv_id, Speaker::NewHire, "how are you?", 3),
            make_msg(&conv_id, Speaker::Agent, "hello", 1),
            make_msg(&conv_id, Speaker::NewHire, "hi there", 2),
        ];
        db.transact(move |tx| {
            for m in &msgs {
                insert(tx, m)?;
            }
            Ok(())
        })
        .await
        .unwrap();

        let messages = get_messages(&db, &conv_id).await.unwrap();
        assert_eq!(messages.len(), 3);
        assert_eq!(messages[0].content, "hello");
        assert_eq!(messages[0].speaker, Speaker::Agent);
        assert_eq!(messages[2].sequence_number, 3);
        assert_eq!(messages[2].speaker, Speaker::NewHire);
    }

    #[tokio::test]
    async fn duplicate_sequence_number_is_rejected() {
        let (db, conv_id) = setup_db_with_conversation().await;
        let a = make_msg(&conv_id, Speaker::Agent, "one", 1);
        let b = make_msg(&conv_id, Speaker::Agent, "two", 1);
        let result = db
            .transact(move |tx| {
                insert(tx, &a)?;
                insert(tx, &b)
            })
            .await;
        assert!(result.is_err());
        assert!(get_messages(&db, &conv_id).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn count_reflects_stored_messages() {
        let (db, conv_id) = setup_db_with_conversation().await;
        let id = conv_id.clone();
        let count = db
            .transact(move |tx| {
                insert(tx, &make_msg(&id, Speaker::Agent, "one", 1))?;
                insert(tx, &make_msg(&id, Speaker::NewHire, "two", 2))?;
                count_for_conversation(tx, &id)
            })
            .await
            .unwrap();
        assert_eq!(count, 2);
    }

    #[tokio::test]
    async fn get_messages_empty_conversation() {
        let (db, conv_id) = setup_db_with_conversation().await;
        assert!(get_messages(&db, &conv_id).await.unwrap().is_empty());
    }
}
