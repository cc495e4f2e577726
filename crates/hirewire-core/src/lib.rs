// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Core library for the Hirewire webhook service.
//!
//! Provides the error type, the conversation/message/follow-up domain types,
//! and the adapter traits implemented by storage and observability backends.

pub mod error;
pub mod traits;
pub mod types;

pub use error::HirewireError;
pub use types::{
    AdapterType, Conversation, FollowUp, FollowUpStatus, HealthStatus, Message,
    QuestionCategory, QuestionPriority, Speaker, TRANSCRIPT_INGESTED_FLAG, Turn,
};

pub use traits::{PluginAdapter, StorageAdapter};
