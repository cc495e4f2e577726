// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Verified ingestion of voice-agent call-completion webhooks.
//!
//! A delivery is authenticated over its raw bytes, decoded into a
//! [`WebhookEvent`], attributed to a registered conversation, and applied in a
//! single storage transaction: state merge, one-time transcript
//! materialization, and follow-up extraction. Repeated or concurrent
//! deliveries converge to the same rows.

pub mod event;
pub mod merge;
pub mod persist;
pub mod pipeline;
pub mod resolver;
pub mod signature;
pub mod transcript;

pub use event::{POST_CALL_TRANSCRIPTION, WebhookEvent};
pub use pipeline::{IngestReport, Outcome, WebhookPipeline, ingest, replay};
pub use signature::{SIGNATURE_HEADER, SignatureVerifier};
