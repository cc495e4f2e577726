// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain types shared by the storage, extraction, and webhook crates.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::{Display, EnumString, IntoStaticStr};

/// Metadata key recording that the provider transcript has been materialized.
pub const TRANSCRIPT_INGESTED_FLAG: &str = "elevenlabs_transcript_ingested";

/// Health status reported by adapter health checks.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthStatus {
    /// Adapter is fully operational.
    Healthy,
    /// Adapter is operational but experiencing issues.
    Degraded(String),
    /// Adapter is not operational.
    Unhealthy(String),
}

/// Identifies the kind of adapter behind a [`crate::PluginAdapter`].
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum AdapterType {
    Storage,
    Observability,
}

/// Who spoke a transcript message.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    Agent,
    NewHire,
}

impl Speaker {
    /// Maps a provider role to a speaker. Anything other than `agent` is the new hire.
    pub fn from_role(role: &str) -> Self {
        if role.trim().eq_ignore_ascii_case("agent") {
            Speaker::Agent
        } else {
            Speaker::NewHire
        }
    }

    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Topic of a follow-up question.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum QuestionCategory {
    Benefits,
    Salary,
    Policies,
    Legal,
    Relocation,
    Team,
    Growth,
    General,
}

impl QuestionCategory {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// How quickly HR should answer a follow-up question.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum QuestionPriority {
    Urgent,
    High,
    Normal,
}

impl QuestionPriority {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// Lifecycle state of a follow-up item.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Display,
    EnumString,
    IntoStaticStr,
    Serialize,
    Deserialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum FollowUpStatus {
    Pending,
    Answered,
    Dismissed,
}

impl FollowUpStatus {
    pub fn as_str(&self) -> &'static str {
        self.into()
    }
}

/// One real-time voice session between a new hire and the onboarding agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conversation {
    pub id: String,
    pub new_hire_id: String,
    /// Local session identifier, assigned when the session is registered.
    pub session_id: String,
    /// Provider-issued conversation identifier. Set at most once.
    pub external_conversation_id: Option<String>,
    pub language: String,
    pub agent_id: Option<String>,
    pub start_time: Option<DateTime<Utc>>,
    pub end_time: Option<DateTime<Utc>>,
    pub duration_seconds: Option<i64>,
    pub full_transcript: Option<String>,
    pub summary: Option<String>,
    /// Opaque provider status (`success`, `failure`, `done`, ...).
    pub completion_status: Option<String>,
    /// Internal processing flags.
    pub metadata: Map<String, Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Conversation {
    /// Creates a freshly registered conversation with a new id.
    pub fn new(
        new_hire_id: impl Into<String>,
        session_id: impl Into<String>,
        language: impl Into<String>,
        start_time: Option<DateTime<Utc>>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: uuid_v4(),
            new_hire_id: new_hire_id.into(),
            session_id: session_id.into(),
            external_conversation_id: None,
            language: language.into(),
            agent_id: None,
            start_time,
            end_time: None,
            duration_seconds: None,
            full_transcript: None,
            summary: None,
            completion_status: None,
            metadata: Map::new(),
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether the provider transcript has already been turned into messages.
    pub fn transcript_ingested(&self) -> bool {
        self.metadata
            .get(TRANSCRIPT_INGESTED_FLAG)
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }

    pub fn mark_transcript_ingested(&mut self) {
        self.metadata
            .insert(TRANSCRIPT_INGESTED_FLAG.to_string(), Value::Bool(true));
    }
}

/// One utterance within a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: String,
    pub conversation_id: String,
    pub speaker: Speaker,
    pub content: String,
    pub timestamp: Option<DateTime<Utc>>,
    /// 1-based position in the conversation, unique per conversation.
    pub sequence_number: i64,
    pub created_at: DateTime<Utc>,
}

/// A question raised during a conversation that HR must answer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FollowUp {
    pub id: String,
    pub new_hire_id: String,
    pub conversation_id: Option<String>,
    pub question: String,
    pub context: Option<String>,
    pub category: QuestionCategory,
    pub priority: QuestionPriority,
    pub status: FollowUpStatus,
    pub asked_at: DateTime<Utc>,
    pub created_at: DateTime<Utc>,
    pub deleted_at: Option<DateTime<Utc>>,
}

/// One transcript turn as delivered by the voice platform.
///
/// Every field is optional: turns with a missing role or blank text are kept
/// in the event and skipped by the consumers that need them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub role: Option<String>,
    pub message: Option<String>,
    /// Offset from the call start, in (possibly fractional) seconds.
    pub time_in_call_secs: Option<f64>,
}

impl Turn {
    pub fn new(role: &str, message: &str) -> Self {
        Self {
            role: Some(role.to_string()),
            message: Some(message.to_string()),
            time_in_call_secs: None,
        }
    }

    /// Trimmed message text, empty when absent.
    pub fn text(&self) -> &str {
        self.message.as_deref().unwrap_or_default().trim()
    }

    /// Case-insensitive role comparison.
    pub fn has_role(&self, role: &str) -> bool {
        self.role
            .as_deref()
            .is_some_and(|r| r.trim().eq_ignore_ascii_case(role))
    }
}

/// Returns a random UUID v4 string, used for all local record ids.
pub fn uuid_v4() -> String {
    uuid::Uuid::new_v4().to_string()
}
