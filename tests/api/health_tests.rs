//! Health and metrics endpoint tests

use axum::http::StatusCode;
use serde_json::json;

use crate::common::{json_body, text_body, TestApp};

#[tokio::test]
async fn test_health_check_returns_ok() {
    let app = TestApp::new();

    let response = app.get("/health").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert!(body.get("version").is_some());
}

#[tokio::test]
async fn test_liveness_probe() {
    let app = TestApp::new();

    let response = app.get("/health/live").await;

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(json_body(response).await, json!({ "status": "alive" }));
}

#[tokio::test]
async fn test_readiness_without_probes_is_healthy() {
    let app = TestApp::new();

    let response = app.get("/health/ready").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["checks"], json!({}));
}

#[tokio::test]
async fn test_metrics_count_rpc_calls_by_code() {
    let app = TestApp::new();
    app.rpc("CanChat", json!({ "userId": 31, "friendId": 31 })).await;

    let response = app.get("/metrics").await;

    assert_eq!(response.status(), StatusCode::OK);
    let body = text_body(response).await;
    assert!(body.contains("social_network_rpc_requests_total"));
    assert!(body.contains("method=\"CanChat\""));
    assert!(body.contains("code=\"INVALID_ARGUMENT\""));
}
