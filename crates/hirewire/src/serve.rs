// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! `hirewire serve` command implementation.
//!
//! Opens SQLite storage, installs the Prometheus recorder, wires the webhook
//! pipeline into the gateway, and serves until SIGTERM/SIGINT.

use std::sync::Arc;

use hirewire_config::HirewireConfig;
use hirewire_core::{HirewireError, StorageAdapter};
use hirewire_gateway::{AuthConfig, GatewayState, HealthState, ServerConfig, start_server};
use hirewire_storage::SqliteStorage;
use hirewire_webhook::{SignatureVerifier, WebhookPipeline};
use tracing::{info, warn};

use crate::shutdown;

/// Runs the service until a shutdown signal arrives.
pub async fn run_serve(config: HirewireConfig) -> Result<(), HirewireError> {
    init_tracing(&config.server.log_level);
    info!(
        version = env!("CARGO_PKG_VERSION"),
        database = %config.storage.database_path,
        "starting hirewire"
    );

    let storage = Arc::new(SqliteStorage::new(config.storage.clone()));
    storage.initialize().await?;
    info!("storage initialized");

    let prometheus_render = init_metrics();

    let verifier = SignatureVerifier::from_config(&config.webhook);
    let pipeline = Arc::new(WebhookPipeline::new(verifier, storage.clone()));

    if config.server.bearer_token.is_none() {
        warn!("server.bearer_token not set; /v1 API will reject every request");
    }

    let state = GatewayState {
        storage: storage.clone(),
        pipeline,
        auth: AuthConfig {
            bearer_token: config.server.bearer_token.clone(),
        },
        health: HealthState {
            start_time: std::time::Instant::now(),
            prometheus_render,
        },
        webhook_body_limit: config.webhook.max_body_bytes,
    };
    let server_config = ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
    };

    let cancel = shutdown::install_signal_handler();
    let served = start_server(&server_config, state, cancel.cancelled_owned()).await;

    if let Err(e) = storage.close().await {
        warn!(error = %e, "failed to close storage cleanly");
    }
    served?;

    info!("hirewire serve shutdown complete");
    Ok(())
}

#[cfg(feature = "prometheus")]
fn init_metrics() -> Option<Arc<dyn Fn() -> String + Send + Sync>> {
    match hirewire_prometheus::PrometheusAdapter::new() {
        Ok(adapter) => {
            let adapter = Arc::new(adapter);
            Some(Arc::new(move || adapter.render()))
        }
        Err(e) => {
            warn!(error = %e, "prometheus metrics disabled");
            None
        }
    }
}

#[cfg(not(feature = "prometheus"))]
fn init_metrics() -> Option<Arc<dyn Fn() -> String + Send + Sync>> {
    None
}

/// Initializes the tracing subscriber with the given log level.
///
/// Logs go to stderr so command output on stdout stays machine-readable.
pub(crate) fn init_tracing(log_level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("hirewire={log_level},warn")));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_names(false)
        .with_writer(std::io::stderr)
        .init();
}
