//! API Integration Tests
//!
//! These tests require:
//! - Running PostgreSQL instance
//! - Environment variables: DATABASE_URL, JWT_SECRET, API_PORT
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;
use serde_json::Value;

async fn submit_mural(server: &TestServer) -> String {
    let response = server
        .post("/api/v1/murals", &SubmitMural::unique())
        .await
        .unwrap();
    let receipt: Receipt = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(receipt.state, "pending");
    receipt.id
}

async fn approved_mural(server: &TestServer) -> String {
    let id = submit_mural(server).await;
    let response = server
        .admin_patch(&format!("/api/v1/admin/murals/{id}"), &Decision::approve())
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();
    id
}

async fn submit_modification(server: &TestServer, mural_id: &str) -> ModificationRequest {
    let response = server
        .post(
            &format!("/api/v1/murals/{mural_id}/modification-requests"),
            &SubmitModification::unique(),
        )
        .await
        .unwrap();
    assert_json(response, StatusCode::CREATED).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_check() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

#[tokio::test]
async fn test_health_ready() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.expect("Request failed");
    assert_status(response, StatusCode::OK).await.unwrap();
}

// ============================================================================
// Mural Lifecycle
// ============================================================================

#[tokio::test]
async fn test_submitted_mural_is_previewable_but_not_listed() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let id = submit_mural(&server).await;

    let response = server.get(&format!("/api/v1/murals/{id}")).await.unwrap();
    let detail: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail["state"], "pending");

    let response = server.get("/api/v1/murals").await.unwrap();
    let public: Vec<Mural> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(public.iter().all(|m| m.id != id));
}

#[tokio::test]
async fn test_approve_then_reject_overwrites() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let id = approved_mural(&server).await;

    let response = server.get("/api/v1/murals").await.unwrap();
    let public: Vec<Mural> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(public.iter().any(|m| m.id == id));

    let response = server
        .admin_patch(&format!("/api/v1/admin/murals/{id}"), &Decision::reject())
        .await
        .unwrap();
    let mural: Mural = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(mural.state, "rejected");

    let response = server.get(&format!("/api/v1/murals/{id}")).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

#[tokio::test]
async fn test_override_back_to_pending() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let id = approved_mural(&server).await;

    let response = server
        .admin_put(
            &format!("/api/v1/admin/murals/{id}/state"),
            &OverrideState { state: "pending" },
        )
        .await
        .unwrap();
    let mural: Mural = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(mural.state, "pending");

    let response = server
        .admin_get(&format!("/api/v1/admin/audit?entity_id={id}"))
        .await
        .unwrap();
    let page: AuditPage = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.data[0].action, "update_state");
    assert_eq!(page.data[1].action, "approve_mural");
}

// ============================================================================
// Modification Requests
// ============================================================================

#[tokio::test]
async fn test_approving_modification_cascades_and_finalizes() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mural_id = approved_mural(&server).await;
    let winner = submit_modification(&server, &mural_id).await;
    let loser = submit_modification(&server, &mural_id).await;
    assert_eq!(winner.mural_id, mural_id);

    let response = server
        .admin_patch(
            &format!(
                "/api/v1/admin/murals/{mural_id}/modification-requests/{}",
                winner.id
            ),
            &Decision::approve(),
        )
        .await
        .unwrap();
    let outcome: ModificationDecision = assert_json(response, StatusCode::OK).await.unwrap();

    assert_eq!(outcome.request.state, "approved");
    assert!(outcome.request.original_image_url.is_some());
    let mural = outcome.mural.expect("approval returns the mural");
    assert_eq!(mural.state, "modification_approved");
    assert_eq!(outcome.cascade_rejected, vec![loser.id.clone()]);

    // the sibling is now terminal
    let response = server
        .admin_patch(
            &format!(
                "/api/v1/admin/murals/{mural_id}/modification-requests/{}",
                loser.id
            ),
            &Decision::approve(),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    // and the mural takes no further reports
    let response = server
        .post(
            &format!("/api/v1/murals/{mural_id}/modification-requests"),
            &SubmitModification::unique(),
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::CONFLICT).await.unwrap();

    let response = server
        .admin_get(&format!(
            "/api/v1/admin/audit?entity_id={}&entity_kind=modification_request",
            loser.id
        ))
        .await
        .unwrap();
    let page: AuditPage = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.data.len(), 1);
    assert_eq!(page.data[0].action, "reject_modification");
    assert_eq!(page.data[0].entity_type, "modification_request");
    assert_eq!(page.data[0].entity_id, loser.id);
    assert!(page.data[0]
        .note
        .as_deref()
        .is_some_and(|n| n.contains(&winner.id)));
}

#[tokio::test]
async fn test_rejecting_modification_leaves_mural_alone() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let mural_id = approved_mural(&server).await;
    let request = submit_modification(&server, &mural_id).await;

    let response = server
        .admin_patch(
            &format!(
                "/api/v1/admin/murals/{mural_id}/modification-requests/{}",
                request.id
            ),
            &Decision::reject(),
        )
        .await
        .unwrap();
    let outcome: ModificationDecision = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(outcome.request.state, "rejected");
    assert!(outcome.mural.is_none());
    assert!(outcome.cascade_rejected.is_empty());

    let response = server.get(&format!("/api/v1/murals/{mural_id}")).await.unwrap();
    let detail: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(detail["state"], "approved");

    let response = server
        .admin_get(&format!("/api/v1/admin/audit?entity_id={}", request.id))
        .await
        .unwrap();
    let page: AuditPage = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(page.data[0].before_state["request_state"], "pending");
    assert_eq!(page.data[0].after_state["request_state"], "rejected");
}

// ============================================================================
// Moderation Surface
// ============================================================================

#[tokio::test]
async fn test_admin_requires_token() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/api/v1/admin/stats").await.unwrap();
    assert_status(response, StatusCode::UNAUTHORIZED).await.unwrap();
}

#[tokio::test]
async fn test_pending_queue_contains_new_submission() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let id = submit_mural(&server).await;

    let response = server
        .admin_get("/api/v1/admin/murals?filter=pending")
        .await
        .unwrap();
    let queue: Vec<Value> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(queue.iter().any(|m| m["id"] == id.as_str()));
    assert!(queue.iter().all(|m| m["state"] == "pending"));

    let response = server.admin_get("/api/v1/admin/stats").await.unwrap();
    let stats: Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(stats["pending"].as_i64().unwrap_or_default() >= 1);
}
