// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Deterministic extraction of HR follow-up questions from call transcripts.
//!
//! The agent signals an unanswered question with a fixed escalation phrase.
//! The extractor pairs each signal with the nearest earlier user question and
//! classifies it by ordered keyword tables.

pub mod extractor;
pub mod rules;

pub use extractor::{ExtractedQuestion, FOLLOW_UP_CONTEXT, extract_questions};
