//! Chat RPC tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{json_body, TestApp};

#[tokio::test]
async fn test_save_and_read_direct_room() {
    let app = TestApp::new();

    let body = json_body(
        app.rpc(
            "SaveMessage",
            json!({ "message": { "roomId": "dm:5:9", "userId": 5, "content": "ping" } }),
        )
        .await,
    )
    .await;
    assert_eq!(body, json!({ "success": true }));

    let response = app.rpc("GetMessage", json!({ "roomId": "dm:5:9", "userId": 9 })).await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let message = &body["message"][0];
    assert_eq!(message["content"], "ping");
    assert_eq!(message["userId"], 5);
    assert_eq!(message["realname"], "User 5");
    assert!(message["create_at"].as_str().unwrap().contains('/'));
}

#[tokio::test]
async fn test_outsider_is_denied() {
    let app = TestApp::new();

    let response = app.rpc("GetMessage", json!({ "roomId": "dm:5:9", "userId": 6 })).await;

    assert_eq!(response.status(), StatusCode::FORBIDDEN);
    assert_eq!(json_body(response).await["code"], "PERMISSION_DENIED");
}

#[tokio::test]
async fn test_save_message_without_content_is_invalid() {
    let app = TestApp::new();

    let response = app
        .rpc("SaveMessage", json!({ "message": { "roomId": "dm:5:9", "userId": 5 } }))
        .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], "INVALID_ARGUMENT");
}
