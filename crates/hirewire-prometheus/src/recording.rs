// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Metric registration and recording helpers.
//!
//! Uses the metrics-rs facade so any recorder (Prometheus, statsd, etc.)
//! can collect these metrics. Without an installed recorder every call is a no-op.

use metrics::{describe_counter, describe_histogram};

pub const WEBHOOKS_TOTAL: &str = "hirewire_webhooks_total";
pub const MESSAGES_INGESTED_TOTAL: &str = "hirewire_messages_ingested_total";
pub const FOLLOW_UPS_CREATED_TOTAL: &str = "hirewire_follow_ups_created_total";
pub const WEBHOOK_DURATION_SECONDS: &str = "hirewire_webhook_duration_seconds";

/// Register all Hirewire metric descriptions.
///
/// Called once at startup after the recorder is installed.
pub fn register_metrics() {
    describe_counter!(WEBHOOKS_TOTAL, "Webhook deliveries by outcome");
    describe_counter!(
        MESSAGES_INGESTED_TOTAL,
        "Transcript messages written by webhook ingestion"
    );
    describe_counter!(
        FOLLOW_UPS_CREATED_TOTAL,
        "HR follow-up items created from transcripts"
    );
    describe_histogram!(
        WEBHOOK_DURATION_SECONDS,
        "Webhook handling latency in seconds"
    );
}

/// Record one delivery with its outcome label (`processed`, `ignored`, `rejected`, ...).
pub fn record_webhook(outcome: &str) {
    metrics::counter!(WEBHOOKS_TOTAL, "outcome" => outcome.to_string()).increment(1);
}

pub fn record_messages_ingested(count: u64) {
    metrics::counter!(MESSAGES_INGESTED_TOTAL).increment(count);
}

pub fn record_follow_ups_created(count: u64) {
    metrics::counter!(FOLLOW_UPS_CREATED_TOTAL).increment(count);
}

/// Record webhook handling latency.
pub fn record_webhook_latency(seconds: f64) {
    metrics::histogram!(WEBHOOK_DURATION_SECONDS).record(seconds);
}
