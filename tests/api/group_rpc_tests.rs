//! Group RPC tests

use axum::http::StatusCode;
use pretty_assertions::assert_eq;
use serde_json::json;

use crate::common::{json_body, TestApp};

#[tokio::test]
async fn test_group_capacity_over_rpc() {
    let app = TestApp::new();

    let response = app
        .rpc(
            "CreateGroup",
            json!({ "name": "Trio", "ownerId": 1, "maxMember": 2, "description": "small" }),
        )
        .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let group_id = body["group"]["id"].as_i64().unwrap();
    assert_eq!(body["group"]["memberCount"], 1);
    assert_eq!(body["group"]["maxMember"], 2);

    let body = json_body(
        app.rpc("AddUserToGroup", json!({ "userId": 2, "groupId": group_id, "role": "member" }))
            .await,
    )
    .await;
    assert_eq!(body["members"][0]["userId"], 2);
    assert_eq!(body["members"][0]["role"], "member");

    let response = app
        .rpc("AddUserToGroup", json!({ "userId": 3, "groupId": group_id }))
        .await;
    assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);
    assert_eq!(json_body(response).await["code"], "RESOURCE_EXHAUSTED");

    let body = json_body(
        app.rpc("CheckGroupUser", json!({ "userId": 3, "groupId": group_id }))
            .await,
    )
    .await;
    assert_eq!(body, json!({ "isMember": false }));
}

#[tokio::test]
async fn test_bulk_add_and_listing_over_rpc() {
    let app = TestApp::new();
    let body = json_body(
        app.rpc("CreateGroup", json!({ "name": "Crew", "ownerId": 1, "initialUserIds": [2] }))
            .await,
    )
    .await;
    let group_id = body["group"]["id"].as_i64().unwrap();

    let body = json_body(
        app.rpc("AddUsersToGroup", json!({ "userIds": [2, 3, 4], "groupId": group_id }))
            .await,
    )
    .await;
    let added: Vec<i64> = body["members"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["userId"].as_i64().unwrap())
        .collect();
    assert_eq!(added, vec![3, 4]);

    let body = json_body(app.rpc("GetAllGroup", json!({ "userId": 4 })).await).await;
    assert_eq!(body["groups"][0]["id"], group_id);
    assert_eq!(body["groups"][0]["name"], "Crew");

    let body = json_body(app.rpc("GetAllGroup", json!({ "userId": 99 })).await).await;
    assert_eq!(body, json!({ "groups": [] }));
}

#[tokio::test]
async fn test_create_group_without_name_is_invalid() {
    let app = TestApp::new();

    let response = app.rpc("CreateGroup", json!({ "ownerId": 1 })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["code"], "INVALID_ARGUMENT");
}
