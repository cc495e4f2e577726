// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Escalation-driven question extraction over transcript turns.

use std::collections::HashSet;

use hirewire_core::{QuestionCategory, QuestionPriority, Turn};
use serde::Serialize;
use tracing::debug;

use crate::rules;

/// Context note attached to every extracted question.
pub const FOLLOW_UP_CONTEXT: &str = "Flagged by agent for HR follow-up";

/// A question the agent deferred to HR.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ExtractedQuestion {
    /// Verbatim user text, trimmed.
    pub question: String,
    pub category: QuestionCategory,
    pub priority: QuestionPriority,
    pub context: String,
}

impl ExtractedQuestion {
    fn classify(question: &str) -> Self {
        Self {
            question: question.to_string(),
            category: rules::categorize(question),
            priority: rules::assess_priority(question),
            context: FOLLOW_UP_CONTEXT.to_string(),
        }
    }
}

/// Finds every agent escalation and pairs it with the nearest preceding user
/// question. Escalations with no such question are dropped. The result is
/// deduplicated case-insensitively, keeping first occurrences in order.
pub fn extract_questions(turns: &[Turn]) -> Vec<ExtractedQuestion> {
    let mut seen = HashSet::new();
    let mut extracted = Vec::new();

    for (idx, turn) in turns.iter().enumerate() {
        let text = turn.text();
        if !turn.has_role("agent") || text.is_empty() || !rules::is_escalation(text) {
            continue;
        }

        let Some(question) = previous_user_question(turns, idx) else {
            debug!(turn = idx, "escalation without a preceding user question");
            continue;
        };

        if seen.insert(question.to_lowercase()) {
            extracted.push(ExtractedQuestion::classify(question));
        }
    }

    extracted
}

fn previous_user_question(turns: &[Turn], idx: usize) -> Option<&str> {
    turns[..idx]
        .iter()
        .rev()
        .filter(|t| t.has_role("user"))
        .map(Turn::text)
        .find(|text| !text.is_empty() && rules::looks_like_question(text))
}
