// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Domain model types for storage entities.
//!
//! The canonical types live in `hirewire-core::types` so the webhook and
//! gateway crates can use them without a storage dependency.

pub use hirewire_core::types::{Conversation, FollowUp, Message};
