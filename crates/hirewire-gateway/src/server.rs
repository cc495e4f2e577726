// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Gateway HTTP server built on axum.
//!
//! Sets up routes, middleware, and shared state for the gateway.

use std::future::Future;
use std::sync::Arc;

use axum::{
    Router,
    extract::DefaultBodyLimit,
    middleware as axum_middleware,
    routing::{delete, get, post},
};
use hirewire_core::{HirewireError, StorageAdapter};
use hirewire_webhook::WebhookPipeline;
use tower_http::trace::TraceLayer;

use crate::auth::{AuthConfig, auth_middleware};
use crate::handlers;

/// Health state for unauthenticated health/metrics endpoints.
#[derive(Clone)]
pub struct HealthState {
    /// Process start time for uptime calculation.
    pub start_time: std::time::Instant,
    /// Optional Prometheus metrics render function.
    pub prometheus_render: Option<Arc<dyn Fn() -> String + Send + Sync>>,
}

/// Shared state for axum request handlers.
#[derive(Clone)]
pub struct GatewayState {
    /// Read side and registration.
    pub storage: Arc<dyn StorageAdapter>,
    /// Webhook verification and ingestion.
    pub pipeline: Arc<WebhookPipeline>,
    /// Authentication configuration for `/v1`.
    pub auth: AuthConfig,
    /// Health state for unauthenticated endpoints.
    pub health: HealthState,
    /// Largest webhook body accepted, in bytes.
    pub webhook_body_limit: usize,
}

/// Address the gateway binds to.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

/// Builds the gateway router.
///
/// - GET /health, GET /metrics (public)
/// - POST /webhooks/elevenlabs (authenticated by signature, not middleware;
///   body capped at `webhook_body_limit` instead of axum's 2 MiB default)
/// - POST /v1/conversations, GET /v1/conversations/{id},
///   POST /v1/conversations/{id}/external-id,
///   PATCH and DELETE /v1/follow-ups/{id} (bearer token)
pub fn router(state: GatewayState) -> Router {
    let auth_state = state.auth.clone();

    let public_routes = Router::new()
        .route("/health", get(handlers::get_public_health))
        .route("/metrics", get(handlers::get_public_metrics))
        .route(
            "/webhooks/elevenlabs",
            post(handlers::post_elevenlabs_webhook)
                .layer(DefaultBodyLimit::max(state.webhook_body_limit)),
        )
        .with_state(state.clone());

    let api_routes = Router::new()
        .route("/v1/conversations", post(handlers::post_conversation))
        .route("/v1/conversations/{id}", get(handlers::get_conversation))
        .route(
            "/v1/conversations/{id}/external-id",
            post(handlers::post_external_id),
        )
        .route(
            "/v1/follow-ups/{id}",
            delete(handlers::delete_follow_up).patch(handlers::patch_follow_up),
        )
        .route_layer(axum_middleware::from_fn_with_state(
            auth_state,
            auth_middleware,
        ))
        .with_state(state);

    Router::new()
        .merge(public_routes)
        .merge(api_routes)
        .layer(TraceLayer::new_for_http())
}

/// Start the gateway HTTP server and serve until `shutdown` resolves.
pub async fn start_server<F>(
    config: &ServerConfig,
    state: GatewayState,
    shutdown: F,
) -> Result<(), HirewireError>
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = router(state);

    let addr = format!("{}:{}", config.host, config.port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| HirewireError::Internal(format!("failed to bind gateway to {addr}: {e}")))?;

    tracing::info!("gateway server listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| HirewireError::Internal(format!("gateway server error: {e}")))?;

    tracing::info!("gateway server stopped");
    Ok(())
}
