// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP gateway for the Hirewire webhook service.
//!
//! Exposes the voice-platform webhook, the bearer-protected `/v1` API for
//! registering and inspecting conversations, and public health/metrics.

pub mod auth;
pub mod handlers;
pub mod server;

pub use auth::AuthConfig;
pub use handlers::ApiError;
pub use server::{GatewayState, HealthState, ServerConfig, router, start_server};
