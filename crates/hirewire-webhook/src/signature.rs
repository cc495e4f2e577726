// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Webhook signature verification.
//!
//! The provider sends `elevenlabs-signature: t=<unix-seconds>,v0=<hex>` where
//! the hex digest is HMAC-SHA256 of `"<t>.<raw body>"` keyed by the shared
//! secret. The MAC is always computed over the bytes exactly as received.

use hirewire_config::model::WebhookConfig;
use hirewire_core::HirewireError;
use hmac::{Hmac, Mac};
use sha2::Sha256;

type HmacSha256 = Hmac<Sha256>;

/// Request header carrying the signature.
pub const SIGNATURE_HEADER: &str = "elevenlabs-signature";

/// Verifies inbound webhook signatures against the configured secret.
#[derive(Clone)]
pub struct SignatureVerifier {
    secret: Option<String>,
    tolerance_secs: i64,
}

impl std::fmt::Debug for SignatureVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignatureVerifier")
            .field("secret", &self.secret.as_ref().map(|_| "[redacted]"))
            .field("tolerance_secs", &self.tolerance_secs)
            .finish()
    }
}

impl SignatureVerifier {
    pub fn new(secret: Option<String>, tolerance_secs: u64) -> Self {
        Self {
            secret: secret.filter(|s| !s.trim().is_empty()),
            tolerance_secs: i64::try_from(tolerance_secs).unwrap_or(i64::MAX),
        }
    }

    pub fn from_config(config: &WebhookConfig) -> Self {
        Self::new(config.secret.clone(), config.signature_tolerance_secs)
    }

    /// Whether a secret is configured at all.
    pub fn is_configured(&self) -> bool {
        self.secret.is_some()
    }

    /// Verifies `header` for `body` against the current clock.
    pub fn verify(&self, body: &[u8], header: Option<&str>) -> Result<(), HirewireError> {
        self.verify_at(body, header, chrono::Utc::now().timestamp())
    }

    /// Verifies `header` for `body` as of `now` (unix seconds).
    pub fn verify_at(
        &self,
        body: &[u8],
        header: Option<&str>,
        now: i64,
    ) -> Result<(), HirewireError> {
        let secret = self
            .secret
            .as_deref()
            .ok_or_else(|| HirewireError::Config("webhook secret not configured".into()))?;

        let header = header
            .map(str::trim)
            .filter(|h| !h.is_empty())
            .ok_or_else(|| HirewireError::Unauthenticated("missing webhook signature".into()))?;

        let parsed = ParsedHeader::parse(header)
            .ok_or_else(|| HirewireError::Unauthenticated("malformed webhook signature".into()))?;

        if parsed.timestamp < now.saturating_sub(self.tolerance_secs) {
            return Err(HirewireError::Unauthenticated(
                "webhook signature timestamp outside tolerance".into(),
            ));
        }

        let verified = parsed.signatures.iter().any(|candidate| {
            let Ok(expected) = hex::decode(candidate) else {
                return false;
            };
            let Ok(mut mac) = HmacSha256::new_from_slice(secret.as_bytes()) else {
                return false;
            };
            mac.update(parsed.timestamp_raw.as_bytes());
            mac.update(b".");
            mac.update(body);
            mac.verify_slice(&expected).is_ok()
        });

        if verified {
            Ok(())
        } else {
            Err(HirewireError::Unauthenticated(
                "invalid webhook signature".into(),
            ))
        }
    }
}

struct ParsedHeader<'a> {
    timestamp_raw: &'a str,
    timestamp: i64,
    signatures: Vec<&'a str>,
}

impl<'a> ParsedHeader<'a> {
    fn parse(header: &'a str) -> Option<Self> {
        let mut timestamp_raw = None;
        let mut signatures = Vec::new();
        for part in header.split(',') {
            match part.trim().split_once('=') {
                Some(("t", value)) => timestamp_raw = Some(value.trim()),
                Some(("v0", value)) => signatures.push(value.trim()),
                _ => {}
            }
        }
        let timestamp_raw = timestamp_raw?;
        let timestamp = timestamp_raw.parse().ok()?;
        if signatures.is_empty() {
            return None;
        }
        Some(Self {
            timestamp_raw,
            timestamp,
            signatures,
        })
    }
}
