// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end webhook processing.
//!
//! verify -> decode -> resolve -> merge + materialize -> extract -> persist,
//! with everything after decoding running in one IMMEDIATE transaction.

use std::sync::Arc;
use std::time::Instant;

use hirewire_core::HirewireError;
use hirewire_extract::extract_questions;
use hirewire_storage::queries::conversations;
use hirewire_storage::{Database, SqliteStorage};
use rusqlite::Connection;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::event::WebhookEvent;
use crate::merge::merge_state;
use crate::persist::persist_questions;
use crate::resolver::resolve;
use crate::signature::SignatureVerifier;
use crate::transcript::materialize;

/// Result of handling one delivery. `Ignored` is a success, not an error.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Processed,
    Ignored,
}

impl Outcome {
    pub fn as_str(&self) -> &'static str {
        match self {
            Outcome::Processed => "processed",
            Outcome::Ignored => "ignored",
        }
    }
}

/// What a delivery did.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IngestReport {
    pub outcome: Outcome,
    pub conversation_id: Option<String>,
    pub messages_inserted: usize,
    pub follow_ups_created: usize,
}

impl IngestReport {
    fn ignored() -> Self {
        Self {
            outcome: Outcome::Ignored,
            conversation_id: None,
            messages_inserted: 0,
            follow_ups_created: 0,
        }
    }
}

/// Webhook handler state shared across requests.
pub struct WebhookPipeline {
    verifier: SignatureVerifier,
    storage: Arc<SqliteStorage>,
}

impl WebhookPipeline {
    pub fn new(verifier: SignatureVerifier, storage: Arc<SqliteStorage>) -> Self {
        if !verifier.is_configured() {
            warn!("webhook secret not configured; deliveries will be refused");
        }
        Self { verifier, storage }
    }

    /// Verifies, decodes and ingests one raw delivery, recording metrics.
    pub async fn handle(
        &self,
        body: &[u8],
        signature: Option<&str>,
    ) -> Result<IngestReport, HirewireError> {
        let started = Instant::now();
        let result = self.handle_inner(body, signature).await;

        let label = match &result {
            Ok(report) => report.outcome.as_str(),
            Err(HirewireError::Unauthenticated(_)) => "rejected",
            Err(HirewireError::Payload(_)) => "invalid",
            Err(_) => "error",
        };
        hirewire_prometheus::record_webhook(label);
        hirewire_prometheus::record_webhook_latency(started.elapsed().as_secs_f64());
        if let Ok(report) = &result {
            hirewire_prometheus::record_messages_ingested(report.messages_inserted as u64);
            hirewire_prometheus::record_follow_ups_created(report.follow_ups_created as u64);
        }
        result
    }

    async fn handle_inner(
        &self,
        body: &[u8],
        signature: Option<&str>,
    ) -> Result<IngestReport, HirewireError> {
        self.verifier.verify(body, signature)?;
        let event = WebhookEvent::from_slice(body)?;
        ingest(self.storage.database()?, event).await
    }
}

/// Runs the ingestion unit of work for a decoded event.
pub async fn ingest(db: &Database, event: WebhookEvent) -> Result<IngestReport, HirewireError> {
    if !event.is_post_call_transcription() {
        debug!(event_type = ?event.event_type, "ignoring webhook event type");
        return Ok(IngestReport::ignored());
    }
    db.transact(move |tx| ingest_in_tx(tx, &event)).await
}

fn ingest_in_tx(conn: &Connection, event: &WebhookEvent) -> rusqlite::Result<IngestReport> {
    let Some(mut conversation) = resolve(conn, &event.data)? else {
        info!(
            external_id = ?event.data.conversation_id,
            session_id = ?event.data.session_key(),
            "webhook for unknown conversation ignored"
        );
        return Ok(IngestReport::ignored());
    };
    let before = conversation.clone();

    merge_state(&mut conversation, &event.data);
    let messages_inserted = materialize(conn, &mut conversation, &event.data)?;

    let questions = extract_questions(&event.data.transcript);
    let follow_ups_created = persist_questions(conn, &conversation, &questions)?;

    if conversation != before {
        conversations::update(conn, &conversation)?;
    }

    info!(
        conversation_id = %conversation.id,
        messages_inserted,
        questions = questions.len(),
        follow_ups_created,
        "webhook processed"
    );
    Ok(IngestReport {
        outcome: Outcome::Processed,
        conversation_id: Some(conversation.id),
        messages_inserted,
        follow_ups_created,
    })
}

/// Re-runs extraction and persistence for a stored payload.
///
/// Conversation state and the ingestion flag are left untouched; existing
/// follow-ups are skipped by content.
pub async fn replay(db: &Database, event: WebhookEvent) -> Result<IngestReport, HirewireError> {
    if !event.is_post_call_transcription() {
        return Ok(IngestReport::ignored());
    }
    db.transact(move |tx| {
        let Some(conversation) = resolve(tx, &event.data)? else {
            return Ok(IngestReport::ignored());
        };
        let questions = extract_questions(&event.data.transcript);
        let follow_ups_created = persist_questions(tx, &conversation, &questions)?;
        info!(
            conversation_id = %conversation.id,
            follow_ups_created,
            "replay complete"
        );
        Ok(IngestReport {
            outcome: Outcome::Processed,
            conversation_id: Some(conversation.id),
            messages_inserted: 0,
            follow_ups_created,
        })
    })
    .await
}
