// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Builders for webhook request bodies.

use serde_json::{Map, Value, json};

/// Builds a `post_call_transcription` envelope.
#[derive(Debug, Clone)]
pub struct PayloadBuilder {
    event_type: String,
    conversation_id: Option<String>,
    session_id: Option<String>,
    user_id: Option<String>,
    status: Option<String>,
    start_time_unix_secs: Option<i64>,
    call_duration_secs: Option<f64>,
    transcript_summary: Option<String>,
    call_successful: Option<String>,
    turns: Vec<Value>,
}

impl Default for PayloadBuilder {
    fn default() -> Self {
        Self {
            event_type: "post_call_transcription".to_string(),
            conversation_id: None,
            session_id: None,
            user_id: None,
            status: Some("done".to_string()),
            start_time_unix_secs: None,
            call_duration_secs: None,
            transcript_summary: None,
            call_successful: None,
            turns: Vec::new(),
        }
    }
}

impl PayloadBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn event_type(mut self, event_type: &str) -> Self {
        self.event_type = event_type.to_string();
        self
    }

    /// Provider conversation id (`data.conversation_id`).
    pub fn conversation_id(mut self, id: &str) -> Self {
        self.conversation_id = Some(id.to_string());
        self
    }

    /// Local session id carried in the dynamic variables.
    pub fn session_id(mut self, id: &str) -> Self {
        self.session_id = Some(id.to_string());
        self
    }

    pub fn user_id(mut self, id: &str) -> Self {
        self.user_id = Some(id.to_string());
        self
    }

    pub fn status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn start_time(mut self, unix_secs: i64) -> Self {
        self.start_time_unix_secs = Some(unix_secs);
        self
    }

    pub fn duration(mut self, secs: f64) -> Self {
        self.call_duration_secs = Some(secs);
        self
    }

    pub fn summary(mut self, summary: &str) -> Self {
        self.transcript_summary = Some(summary.to_string());
        self
    }

    pub fn call_successful(mut self, value: &str) -> Self {
        self.call_successful = Some(value.to_string());
        self
    }

    pub fn agent(self, message: &str) -> Self {
        self.turn("agent", message)
    }

    pub fn user(self, message: &str) -> Self {
        self.turn("user", message)
    }

    /// Appends a turn, placing it two seconds after the previous one.
    pub fn turn(mut self, role: &str, message: &str) -> Self {
        let at = self.turns.len() as f64 * 2.0;
        self.turns.push(json!({
            "role": role,
            "message": message,
            "time_in_call_secs": at,
        }));
        self
    }

    pub fn build(&self) -> Value {
        let mut data = Map::new();
        data.insert("agent_id".into(), json!("agent_test"));
        if let Some(id) = &self.conversation_id {
            data.insert("conversation_id".into(), json!(id));
        }
        if let Some(status) = &self.status {
            data.insert("status".into(), json!(status));
        }
        if let Some(user_id) = &self.user_id {
            data.insert("user_id".into(), json!(user_id));
        }
        if let Some(session_id) = &self.session_id {
            data.insert(
                "conversation_initiation_client_data".into(),
                json!({ "dynamic_variables": { "session_id": session_id } }),
            );
        }

        let mut metadata = Map::new();
        if let Some(start) = self.start_time_unix_secs {
            metadata.insert("start_time_unix_secs".into(), json!(start));
        }
        if let Some(duration) = self.call_duration_secs {
            metadata.insert("call_duration_secs".into(), json!(duration));
        }
        data.insert("metadata".into(), Value::Object(metadata));

        let mut analysis = Map::new();
        if let Some(summary) = &self.transcript_summary {
            analysis.insert("transcript_summary".into(), json!(summary));
        }
        if let Some(successful) = &self.call_successful {
            analysis.insert("call_successful".into(), json!(successful));
        }
        data.insert("analysis".into(), Value::Object(analysis));
        data.insert("transcript".into(), Value::Array(self.turns.clone()));

        json!({
            "type": self.event_type,
            "event_timestamp": 1_760_000_000,
            "data": Value::Object(data),
        })
    }

    /// Serialized body bytes, as they would arrive on the wire.
    pub fn to_bytes(&self) -> Vec<u8> {
        serde_json::to_vec(&self.build()).expect("JSON values always serialize")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_expected_shape() {
        let payload = PayloadBuilder::new()
            .conversation_id("conv_1")
            .session_id("sess-1")
            .start_time(1_760_000_000)
            .user("Hello?")
            .agent("Hi!")
            .build();

        assert_eq!(payload["type"], "post_call_transcription");
        assert_eq!(payload["data"]["conversation_id"], "conv_1");
        assert_eq!(
            payload["data"]["conversation_initiation_client_data"]["dynamic_variables"]
                ["session_id"],
            "sess-1"
        );
        assert_eq!(payload["data"]["transcript"][1]["time_in_call_secs"], 2.0);
    }
}
