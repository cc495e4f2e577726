// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Applies event timing and analysis to a conversation record.
//!
//! Identity and start time are fill-only-if-absent. Duration and end time are
//! recomputed whenever the event carries a duration. Summary and completion
//! status take the newest non-empty value.

use chrono::{DateTime, Duration, Utc};
use hirewire_core::Conversation;

use crate::event::EventData;

/// Merges `data` into `conversation` in memory. Returns whether anything changed.
pub fn merge_state(conversation: &mut Conversation, data: &EventData) -> bool {
    let before = conversation.clone();

    if conversation.external_conversation_id.is_none() {
        conversation.external_conversation_id = data.conversation_id.clone();
    }

    if conversation.start_time.is_none() {
        conversation.start_time = data.metadata.start_time_unix_secs.and_then(from_unix);
    }

    if let Some(duration) = data.metadata.call_duration_secs {
        conversation.duration_seconds = Some(duration);
        if let Some(start) = conversation.start_time {
            conversation.end_time =
                Duration::try_seconds(duration).and_then(|d| start.checked_add_signed(d));
        }
    }

    if let Some(summary) = &data.analysis.transcript_summary {
        conversation.summary = Some(summary.clone());
    }

    if let Some(status) = data
        .analysis
        .call_successful
        .as_ref()
        .or(data.status.as_ref())
    {
        conversation.completion_status = Some(status.clone());
    }

    *conversation != before
}

pub(crate) fn from_unix(secs: i64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0)
}
