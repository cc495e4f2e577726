// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Hirewire integration tests.
//!
//! Provides a temp-database harness, webhook payload builders, and request
//! signing for fast, deterministic, CI-runnable tests without external services.
//!
//! # Components
//!
//! - [`TestHarness`] - Initialized SQLite storage in a temp dir plus config
//! - [`PayloadBuilder`] - `post_call_transcription` envelopes
//! - [`sign_payload`] - `elevenlabs-signature` header values

pub mod harness;
pub mod payload;
pub mod signing;

pub use harness::TestHarness;
pub use payload::PayloadBuilder;
pub use signing::{TEST_SECRET, sign_payload, sign_payload_now};
