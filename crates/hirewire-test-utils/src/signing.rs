// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Signs payloads the way the voice platform does.

use hmac::{Hmac, Mac};
use sha2::Sha256;

/// Webhook secret used by [`crate::TestHarness`] unless overridden.
pub const TEST_SECRET: &str = "wsec_test_secret";

/// `t=<timestamp>,v0=<hex hmac of "<timestamp>.<body>">`.
pub fn sign_payload(secret: &str, timestamp: i64, body: &[u8]) -> String {
    let mut mac =
        Hmac::<Sha256>::new_from_slice(secret.as_bytes()).expect("HMAC accepts any key length");
    mac.update(format!("{timestamp}.").as_bytes());
    mac.update(body);
    format!(
        "t={timestamp},v0={}",
        hex::encode(mac.finalize().into_bytes())
    )
}

/// Signs `body` with the current time.
pub fn sign_payload_now(secret: &str, body: &[u8]) -> String {
    sign_payload(secret, chrono::Utc::now().timestamp(), body)
}
