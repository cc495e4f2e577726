// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Error types for the Hirewire webhook service.

use thiserror::Error;

/// The primary error type used across Hirewire crates.
///
/// An ignored webhook (unknown event type, unattributable conversation) is
/// not an error and never surfaces through this type.
#[derive(Debug, Error)]
pub enum HirewireError {
    /// Configuration errors (missing webhook secret, invalid values).
    #[error("configuration error: {0}")]
    Config(String),

    /// The request could not be authenticated (missing or invalid signature).
    #[error("unauthenticated: {0}")]
    Unauthenticated(String),

    /// The request body could not be decoded.
    #[error("invalid payload: {0}")]
    Payload(String),

    /// Storage backend errors. The unit of work that raised it was rolled back.
    #[error("storage error: {source}")]
    Storage {
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// A requested record does not exist.
    #[error("not found: {0}")]
    NotFound(String),

    /// The write would overwrite a value that is already set differently.
    #[error("conflict: {0}")]
    Conflict(String),

    /// Internal or unexpected errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl HirewireError {
    /// Wraps any storage-layer error.
    pub fn storage<E>(err: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        HirewireError::Storage {
            source: Box::new(err),
        }
    }
}
