// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Canonical webhook event decoded from the provider envelope.
//!
//! Decoding is permissive: a missing or wrongly-typed optional field reads as
//! absent instead of failing the delivery. Only a body that is not JSON at all
//! is rejected.

use hirewire_core::{HirewireError, Turn};
use serde::Serialize;
use serde_json::Value;

/// The only event type the pipeline acts on.
pub const POST_CALL_TRANSCRIPTION: &str = "post_call_transcription";

/// Call timing reported by the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CallMetadata {
    pub start_time_unix_secs: Option<i64>,
    pub call_duration_secs: Option<i64>,
}

/// Post-call analysis produced by the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct CallAnalysis {
    pub transcript_summary: Option<String>,
    pub call_successful: Option<String>,
}

/// The `data` object of a webhook event.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct EventData {
    /// Provider-issued conversation id.
    pub conversation_id: Option<String>,
    pub status: Option<String>,
    pub user_id: Option<String>,
    /// `conversation_initiation_client_data.dynamic_variables.session_id`.
    pub session_id: Option<String>,
    pub metadata: CallMetadata,
    pub analysis: CallAnalysis,
    pub transcript: Vec<Turn>,
}

impl EventData {
    /// The local session id to resolve against: the dynamic variable, else `user_id`.
    pub fn session_key(&self) -> Option<&str> {
        self.session_id.as_deref().or(self.user_id.as_deref())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct WebhookEvent {
    pub event_type: Option<String>,
    pub data: EventData,
}

impl WebhookEvent {
    /// Decodes a raw request body.
    pub fn from_slice(body: &[u8]) -> Result<Self, HirewireError> {
        let value: Value = serde_json::from_slice(body)
            .map_err(|e| HirewireError::Payload(format!("body is not valid JSON: {e}")))?;
        Ok(Self::from_value(&value))
    }

    /// Decodes an already-parsed JSON mapping.
    pub fn from_value(value: &Value) -> Self {
        let data = value.get("data").unwrap_or(&Value::Null);
        Self {
            event_type: text(value.get("type")),
            data: EventData::from_value(data),
        }
    }

    pub fn is_post_call_transcription(&self) -> bool {
        self.event_type.as_deref() == Some(POST_CALL_TRANSCRIPTION)
    }
}

impl EventData {
    fn from_value(data: &Value) -> Self {
        let metadata = data.get("metadata").unwrap_or(&Value::Null);
        let analysis = data.get("analysis").unwrap_or(&Value::Null);
        let session_id = data
            .pointer("/conversation_initiation_client_data/dynamic_variables/session_id")
            .and_then(|v| text(Some(v)));

        Self {
            conversation_id: text(data.get("conversation_id")),
            status: text(data.get("status")),
            user_id: text(data.get("user_id")),
            session_id,
            metadata: CallMetadata {
                start_time_unix_secs: positive_int(metadata.get("start_time_unix_secs")),
                call_duration_secs: positive_int(metadata.get("call_duration_secs")),
            },
            analysis: CallAnalysis {
                transcript_summary: text(analysis.get("transcript_summary")),
                call_successful: text(analysis.get("call_successful")),
            },
            transcript: data
                .get("transcript")
                .and_then(Value::as_array)
                .map(|turns| turns.iter().map(turn_from_value).collect())
                .unwrap_or_default(),
        }
    }
}

fn turn_from_value(value: &Value) -> Turn {
    Turn {
        role: value.get("role").and_then(Value::as_str).map(str::to_string),
        message: value
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string),
        time_in_call_secs: value.get("time_in_call_secs").and_then(Value::as_f64),
    }
}

/// Non-empty string field.
fn text(value: Option<&Value>) -> Option<String> {
    value
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .map(str::to_string)
}

/// Positive numeric field, truncated to whole seconds.
fn positive_int(value: Option<&Value>) -> Option<i64> {
    let value = value?;
    let n = value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.trunc() as i64))?;
    (n > 0).then_some(n)
}
