// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `hirewire replay` command implementation.
//!
//! Re-runs question extraction for a stored `post_call_transcription`
//! payload. No signature check: the operator supplies the file.

use std::path::Path;

use hirewire_config::HirewireConfig;
use hirewire_core::HirewireError;
use hirewire_storage::Database;
use hirewire_webhook::{IngestReport, Outcome, WebhookEvent, replay};
use tracing::info;

use crate::serve::init_tracing;

pub async fn run_replay(config: &HirewireConfig, payload: &Path) -> Result<(), HirewireError> {
    init_tracing(&config.server.log_level);

    let body = tokio::fs::read(payload).await.map_err(|e| {
        HirewireError::Payload(format!("cannot read {}: {e}", payload.display()))
    })?;
    let event = WebhookEvent::from_slice(&body)?;
    if !event.is_post_call_transcription() {
        return Err(HirewireError::Payload(format!(
            "{} is not a post_call_transcription payload",
            payload.display()
        )));
    }

    let db = Database::open_with(&config.storage.database_path, config.storage.wal_mode).await?;
    let result = replay(&db, event).await;
    db.close().await?;
    let report = result?;

    if report.outcome == Outcome::Ignored {
        return Err(HirewireError::NotFound(
            "payload does not match a registered conversation".to_string(),
        ));
    }

    info!(
        conversation_id = ?report.conversation_id,
        follow_ups_created = report.follow_ups_created,
        "replay finished"
    );
    println!("{}", render_report(&report)?);
    Ok(())
}

fn render_report(report: &IngestReport) -> Result<String, HirewireError> {
    serde_json::to_string_pretty(report)
        .map_err(|e| HirewireError::Internal(format!("cannot render report: {e}")))
}
