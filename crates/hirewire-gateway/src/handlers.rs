// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! HTTP request handlers for the gateway.
//!
//! Handles the voice-platform webhook, conversation registration and
//! inspection, provider id linking, follow-up triage, and the public
//! health/metrics endpoints.

use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use hirewire_core::{
    Conversation, FollowUp, FollowUpStatus, HealthStatus, HirewireError, Message, PluginAdapter,
    StorageAdapter,
};
use hirewire_webhook::{Outcome, SIGNATURE_HEADER};
use serde::{Deserialize, Serialize};

use crate::server::{GatewayState, HealthState};

/// Request body for POST /v1/conversations.
#[derive(Debug, Deserialize)]
pub struct RegisterConversationRequest {
    pub new_hire_id: String,
    pub session_id: String,
    #[serde(default = "default_language")]
    pub language: String,
    #[serde(default)]
    pub agent_id: Option<String>,
}

fn default_language() -> String {
    "en".to_string()
}

/// Request body for POST /v1/conversations/{id}/external-id.
#[derive(Debug, Deserialize)]
pub struct LinkExternalIdRequest {
    pub external_conversation_id: String,
}

/// Request body for PATCH /v1/follow-ups/{id}.
#[derive(Debug, Deserialize)]
pub struct UpdateFollowUpRequest {
    pub status: FollowUpStatus,
}

/// Response body for GET /v1/conversations/{id}.
#[derive(Debug, Serialize)]
pub struct ConversationDetail {
    pub conversation: Conversation,
    /// Ordered by sequence number.
    pub messages: Vec<Message>,
    /// Live follow-ups, oldest first.
    pub follow_ups: Vec<FollowUp>,
}

/// Response body for POST /webhooks/elevenlabs.
#[derive(Debug, Serialize)]
pub struct WebhookResponse {
    pub status: Outcome,
}

/// Response body for GET /health.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// `ok`, `degraded` or `unhealthy`.
    pub status: String,
    /// Binary version.
    pub version: String,
    pub uptime_secs: u64,
    /// Detail from the storage health check, when not healthy.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
}

/// Error response body.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error description.
    pub error: String,
}

/// Maps [`HirewireError`] onto HTTP responses, logging at the boundary.
#[derive(Debug)]
pub struct ApiError(pub HirewireError);

impl From<HirewireError> for ApiError {
    fn from(err: HirewireError) -> Self {
        ApiError(err)
    }
}

impl ApiError {
    fn status(&self) -> StatusCode {
        match &self.0 {
            HirewireError::Unauthenticated(_) => StatusCode::UNAUTHORIZED,
            HirewireError::Payload(_) => StatusCode::BAD_REQUEST,
            HirewireError::NotFound(_) => StatusCode::NOT_FOUND,
            HirewireError::Conflict(_) => StatusCode::CONFLICT,
            HirewireError::Config(_)
            | HirewireError::Storage { .. }
            | HirewireError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = match &self.0 {
            HirewireError::Config(msg) => {
                tracing::error!(error = %msg, "request refused: configuration error");
                "service misconfigured".to_string()
            }
            HirewireError::Storage { .. } | HirewireError::Internal(_) => {
                tracing::error!(error = %self.0, "request failed");
                "internal error".to_string()
            }
            HirewireError::Unauthenticated(_) => {
                tracing::warn!(error = %self.0, "request rejected");
                self.0.to_string()
            }
            HirewireError::Payload(_)
            | HirewireError::NotFound(_)
            | HirewireError::Conflict(_) => {
                tracing::debug!(error = %self.0, "request rejected");
                self.0.to_string()
            }
        };
        (status, Json(ErrorResponse { error: message })).into_response()
    }
}

/// POST /webhooks/elevenlabs
///
/// The body is taken as raw bytes: the signature covers them exactly.
pub async fn post_elevenlabs_webhook(
    State(state): State<GatewayState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<WebhookResponse>, ApiError> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok());
    let report = state.pipeline.handle(&body, signature).await?;
    Ok(Json(WebhookResponse {
        status: report.outcome,
    }))
}

/// POST /v1/conversations
///
/// Registers a voice session. Re-registering a known session id returns the
/// stored conversation with 200 instead of 201.
pub async fn post_conversation(
    State(state): State<GatewayState>,
    Json(body): Json<RegisterConversationRequest>,
) -> Result<(StatusCode, Json<Conversation>), ApiError> {
    let new_hire_id = body.new_hire_id.trim();
    let session_id = body.session_id.trim();
    if new_hire_id.is_empty() || session_id.is_empty() {
        return Err(HirewireError::Payload(
            "new_hire_id and session_id must not be empty".to_string(),
        )
        .into());
    }

    let mut conversation = Conversation::new(
        new_hire_id,
        session_id,
        body.language.trim(),
        Some(chrono::Utc::now()),
    );
    conversation.agent_id = body.agent_id.filter(|a| !a.trim().is_empty());

    let stored = state.storage.register_conversation(&conversation).await?;
    let status = if stored.id == conversation.id {
        tracing::info!(conversation_id = %stored.id, session_id, "conversation registered");
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, Json(stored)))
}

/// GET /v1/conversations/{id}
pub async fn get_conversation(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<Json<ConversationDetail>, ApiError> {
    let conversation = state
        .storage
        .get_conversation(&id)
        .await?
        .ok_or_else(|| HirewireError::NotFound(format!("conversation {id}")))?;
    let messages = state.storage.get_messages(&id).await?;
    let follow_ups = state.storage.get_follow_ups(&id).await?;
    Ok(Json(ConversationDetail {
        conversation,
        messages,
        follow_ups,
    }))
}

/// POST /v1/conversations/{id}/external-id
///
/// Attaches the voice platform's conversation id so later webhooks resolve
/// without a session id. Re-sending the stored id is a 200; a different id
/// is a 409.
pub async fn post_external_id(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(body): Json<LinkExternalIdRequest>,
) -> Result<Json<Conversation>, ApiError> {
    let external_id = body.external_conversation_id.trim();
    if external_id.is_empty() {
        return Err(
            HirewireError::Payload("external_conversation_id must not be empty".to_string()).into(),
        );
    }
    let conversation = state.storage.link_external_id(&id, external_id).await?;
    tracing::info!(conversation_id = %id, external_id, "conversation linked");
    Ok(Json(conversation))
}

/// PATCH /v1/follow-ups/{id}
pub async fn patch_follow_up(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
    Json(body): Json<UpdateFollowUpRequest>,
) -> Result<Json<FollowUp>, ApiError> {
    let updated = state
        .storage
        .set_follow_up_status(&id, body.status)
        .await?
        .ok_or_else(|| HirewireError::NotFound(format!("follow-up {id}")))?;
    tracing::info!(follow_up_id = %id, status = %updated.status, "follow-up status changed");
    Ok(Json(updated))
}

/// DELETE /v1/follow-ups/{id}
pub async fn delete_follow_up(
    State(state): State<GatewayState>,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    if state.storage.delete_follow_up(&id).await? {
        tracing::info!(follow_up_id = %id, "follow-up dismissed");
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(HirewireError::NotFound(format!("follow-up {id}")).into())
    }
}

/// GET /health
///
/// Unauthenticated. 503 when the storage health check fails.
pub async fn get_public_health(State(state): State<GatewayState>) -> Response {
    let (status_code, status, detail) = match state.storage.health_check().await {
        Ok(HealthStatus::Healthy) => (StatusCode::OK, "ok", None),
        Ok(HealthStatus::Degraded(reason)) => (StatusCode::OK, "degraded", Some(reason)),
        Ok(HealthStatus::Unhealthy(reason)) => {
            (StatusCode::SERVICE_UNAVAILABLE, "unhealthy", Some(reason))
        }
        Err(e) => {
            tracing::warn!(error = %e, "storage health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                "unhealthy",
                Some(e.to_string()),
            )
        }
    };
    let body = HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_secs: uptime_secs(&state.health),
        detail,
    };
    (status_code, Json(body)).into_response()
}

/// GET /metrics
///
/// Prometheus text exposition. 404 when no recorder is installed.
pub async fn get_public_metrics(State(state): State<GatewayState>) -> Response {
    match &state.health.prometheus_render {
        Some(render) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
            render(),
        )
            .into_response(),
        None => (StatusCode::NOT_FOUND, "metrics not enabled").into_response(),
    }
}

fn uptime_secs(health: &HealthState) -> u64 {
    health.start_time.elapsed().as_secs()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_request_defaults_language() {
        let json = r#"{"new_hire_id": "hire-1", "session_id": "sess-1"}"#;
        let req: RegisterConversationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.language, "en");
        assert!(req.agent_id.is_none());
    }

    #[test]
    fn register_request_deserializes_with_all_fields() {
        let json = r#"{
            "new_hire_id": "hire-1",
            "session_id": "sess-1",
            "language": "fr",
            "agent_id": "agent-9"
        }"#;
        let req: RegisterConversationRequest = serde_json::from_str(json).unwrap();
        assert_eq!(req.language, "fr");
        assert_eq!(req.agent_id.as_deref(), Some("agent-9"));
    }

    #[test]
    fn update_request_accepts_snake_case_statuses() {
        let req: UpdateFollowUpRequest =
            serde_json::from_str(r#"{"status": "answered"}"#).unwrap();
        assert_eq!(req.status, FollowUpStatus::Answered);
        assert!(serde_json::from_str::<UpdateFollowUpRequest>(r#"{"status": "closed"}"#).is_err());
    }

    #[test]
    fn webhook_response_serializes_outcome() {
        let json = serde_json::to_string(&WebhookResponse {
            status: Outcome::Processed,
        })
        .unwrap();
        assert_eq!(json, r#"{"status":"processed"}"#);
    }

    #[test]
    fn api_error_status_mapping() {
        let cases = [
            (HirewireError::Config("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
            (HirewireError::Unauthenticated("x".into()), StatusCode::UNAUTHORIZED),
            (HirewireError::Payload("x".into()), StatusCode::BAD_REQUEST),
            (HirewireError::NotFound("x".into()), StatusCode::NOT_FOUND),
            (HirewireError::Conflict("x".into()), StatusCode::CONFLICT),
            (
                HirewireError::storage(std::io::Error::other("disk")),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (HirewireError::Internal("x".into()), StatusCode::INTERNAL_SERVER_ERROR),
        ];
        for (err, expected) in cases {
            assert_eq!(ApiError(err).into_response().status(), expected);
        }
    }

    #[test]
    fn health_response_omits_empty_detail() {
        let resp = HealthResponse {
            status: "ok".to_string(),
            version: "0.1.0".to_string(),
            uptime_secs: 42,
            detail: None,
        };
        let json = serde_json::to_string(&resp).unwrap();
        assert!(json.contains("\"uptime_secs\":42"));
        assert!(!json.contains("detail"));
    }
}
