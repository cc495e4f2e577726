// SPDX-FileCopyrightText: 2026 Hirewire Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! End-to-end tests for the complete Hirewire service.
//!
//! HTTP tests drive the gateway router over a temp database; CLI tests run
//! the compiled `hirewire` binary against the same kind of database.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};
use std::sync::Arc;

use axum::body::Body;
use http::{Request, StatusCode};
use hirewire_core::StorageAdapter;
use hirewire_gateway::{AuthConfig, GatewayState, HealthState, router};
use hirewire_prometheus::PrometheusAdapter;
use hirewire_test_utils::{PayloadBuilder, TEST_SECRET, TestHarness, sign_payload_now};
use hirewire_webhook::{SIGNATURE_HEADER, SignatureVerifier, WebhookPipeline};
use serde_json::Value;
use tower::ServiceExt;

const TOKEN: &str = "e2e-token";

fn call_payload(session_id: &str) -> PayloadBuilder {
    PayloadBuilder::new()
        .conversation_id("conv_e2e")
        .session_id(session_id)
        .start_time(1_767_225_600)
        .duration(95.0)
        .summary("Candidate asked about relocation and equipment.")
        .call_successful("success")
        .agent("Hi! Welcome to the onboarding call.")
        .user("Is there a relocation package available, this is urgent?")
        .agent("Good question, I'll note that for HR.")
        .user("Thanks. When do I get my laptop?")
        .agent("Great question. I'll pass that to HR so they can confirm.")
}

// ---- HTTP: register, deliver, inspect, scrape ----

#[tokio::test]
async fn webhook_flow_through_http_with_metrics() {
    let harness = TestHarness::builder()
        .with_bearer_token(TOKEN)
        .build()
        .await
        .unwrap();
    let prometheus = Arc::new(PrometheusAdapter::new().unwrap());
    let render_source = prometheus.clone();

    let storage: Arc<dyn StorageAdapter> = harness.storage.clone();
    let pipeline = WebhookPipeline::new(
        SignatureVerifier::from_config(&harness.config.webhook),
        harness.storage.clone(),
    );
    let app = router(GatewayState {
        storage,
        pipeline: Arc::new(pipeline),
        auth: AuthConfig {
            bearer_token: Some(TOKEN.to_string()),
        },
        health: HealthState {
            start_time: std::time::Instant::now(),
            prometheus_render: Some(Arc::new(move || render_source.render())),
        },
        webhook_body_limit: harness.config.webhook.max_body_bytes,
    });

    let register = Request::builder()
        .method("POST")
        .uri("/v1/conversations")
        .header("authorization", format!("Bearer {TOKEN}"))
        .header("content-type", "application/json")
        .body(Body::from(
            r#"{"new_hire_id":"hire-42","session_id":"sess-e2e","language":"en"}"#,
        ))
        .unwrap();
    let response = app.clone().oneshot(register).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let created: Value = serde_json::from_slice(
        &axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap(),
    )
    .unwrap();
    let id = created["id"].as_str().unwrap().to_string();

    let body = call_payload("sess-e2e").to_bytes();
    for _ in 0..2 {
        let webhook = Request::builder()
            .method("POST")
            .uri("/webhooks/elevenlabs")
            .header(SIGNATURE_HEADER, sign_payload_now(TEST_SECRET, &body))
            .body(Body::from(body.clone()))
            .unwrap();
        let response = app.clone().oneshot(webhook).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    let conversation = harness.conversation(&id).await.unwrap();
    assert_eq!(conversation.external_conversation_id.as_deref(), Some("conv_e2e"));
    assert_eq!(conversation.duration_seconds, Some(95));
    assert!(conversation.transcript_ingested());
    assert!(
        conversation
            .full_transcript
            .as_deref()
            .unwrap()
            .starts_with("Agent: Hi! Welcome")
    );

    let messages = harness.messages(&id).await.unwrap();
    assert_eq!(messages.len(), 5);
    let sequence: Vec<i64> = messages.iter().map(|m| m.sequence_number).collect();
    assert_eq!(sequence, vec![1, 2, 3, 4, 5]);

    let follow_ups = harness.follow_ups(&id).await.unwrap();
    let questions: Vec<&str> = follow_ups.iter().map(|f| f.question.as_str()).collect();
    assert_eq!(
        questions,
        vec![
            "Is there a relocation package available, this is urgent?",
            "Thanks. When do I get my laptop?",
        ]
    );
    assert!(follow_ups.iter().all(|f| f.new_hire_id == "hire-42"));

    let response = app
        .oneshot(Request::builder().uri("/metrics").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let text = String::from_utf8(
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec(),
    )
    .unwrap();
    assert!(text.contains(r#"hirewire_webhooks_total{outcome="processed"} 2"#), "{text}");
    assert!(text.contains("hirewire_follow_ups_created_total 2"), "{text}");
    assert!(text.contains("hirewire_messages_ingested_total 5"), "{text}");
}

// ---- CLI ----

fn write_config(dir: &Path, database_path: &str) -> PathBuf {
    let path = dir.join("hirewire.toml");
    std::fs::write(
        &path,
        format!(
            "[storage]\ndatabase_path = '{database_path}'\n\n[webhook]\nsecret = 'wsec_cli'\n"
        ),
    )
    .unwrap();
    path
}

fn hirewire(args: &[&str], config: &Path) -> Output {
    Command::new(env!("CARGO_BIN_EXE_hirewire"))
        .arg("--config")
        .arg(config)
        .args(args)
        .env("RUST_LOG", "warn")
        .output()
        .unwrap()
}

#[tokio::test]
async fn check_config_passes_on_fresh_database() {
    let dir = tempfile::tempdir().unwrap();
    let db_path = dir.path().join("fresh.db");
    let config = write_config(dir.path(), &db_path.to_string_lossy());

    let output = hirewire(&["check-config", "--plain"], &config);
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "stdout: {stdout}");
    assert!(stdout.contains("0 conversations"), "{stdout}");
    assert!(!stdout.contains("wsec_cli"));
    assert!(db_path.exists());
}

#[tokio::test]
async fn invalid_config_exits_nonzero() {
    let dir = tempfile::tempdir().unwrap();
    let config = dir.path().join("hirewire.toml");
    std::fs::write(&config, "[webhook]\nscret = 'x'\n").unwrap();

    let output = hirewire(&["check-config", "--plain"], &config);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("scret"));
}

#[tokio::test]
async fn replay_restores_dismissed_follow_up_once() {
    let harness = TestHarness::new().await.unwrap();
    let conv = harness.register("hire-9", "sess-replay").await.unwrap();
    hirewire_webhook::ingest(
        harness.database(),
        hirewire_webhook::WebhookEvent::from_value(&call_payload("sess-replay").build()),
    )
    .await
    .unwrap();
    let before = harness.follow_ups(&conv.id).await.unwrap();
    assert_eq!(before.len(), 2);
    assert!(harness.storage.delete_follow_up(&before[0].id).await.unwrap());

    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &harness.config.storage.database_path);
    let payload = dir.path().join("call.json");
    std::fs::write(&payload, call_payload("sess-replay").to_bytes()).unwrap();
    let payload = payload.to_string_lossy().to_string();

    let output = hirewire(&["replay", &payload], &config);
    assert!(output.status.success(), "stderr: {}", String::from_utf8_lossy(&output.stderr));
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["outcome"], "processed");
    assert_eq!(report["follow_ups_created"], 1);
    assert_eq!(report["messages_inserted"], 0);

    let output = hirewire(&["replay", &payload], &config);
    let report: Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["follow_ups_created"], 0);

    assert_eq!(harness.follow_ups(&conv.id).await.unwrap().len(), 2);
    assert_eq!(harness.messages(&conv.id).await.unwrap().len(), 5);
}

#[tokio::test]
async fn replay_of_unknown_conversation_fails() {
    let harness = TestHarness::new().await.unwrap();
    let dir = tempfile::tempdir().unwrap();
    let config = write_config(dir.path(), &harness.config.storage.database_path);
    let payload = dir.path().join("call.json");
    std::fs::write(&payload, call_payload("sess-nobody").to_bytes()).unwrap();

    let output = hirewire(&["replay", &payload.to_string_lossy()], &config);
    assert!(!output.status.success());
    assert!(String::from_utf8_lossy(&output.stderr).contains("registered conversation"));
    assert_eq!(harness.row_counts().await.unwrap(), (0, 0, 0));
}
