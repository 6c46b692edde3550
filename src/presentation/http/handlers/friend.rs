//! Friend Handlers
//!
//! RPC endpoints of the relationship engine.

use axum::{extract::State, Json};

use crate::application::dto::request::{FriendPairRequest, RelationActionRequest, UserIdRequest};
use crate::application::dto::response::{
    AcceptFriendResponse, CanChatResponse, FriendListResponse, FriendRequestListResponse,
    RelationResponse, SuccessResponse,
};
use crate::presentation::http::extractors::RpcJson;
use crate::shared::error::AppError;
use crate::startup::AppState;

/// Send a friend request
pub async fn add_friend(
    State(state): State<AppState>,
    RpcJson(body): RpcJson<FriendPairRequest>,
) -> Result<Json<RelationResponse>, AppError> {
    let relation = state
        .relationships
        .add_friend(body.user_id, body.friend_id)
        .await?;

    Ok(Json(RelationResponse { relation }))
}

/// Pending requests the user sent
pub async fn get_sent_friend(
    State(state): State<AppState>,
    RpcJson(body): RpcJson<UserIdRequest>,
) -> Result<Json<FriendRequestListResponse>, AppError> {
    let relation_friend_info = state.relationships.get_sent_friend(body.user_id).await?;
    Ok(Json(FriendRequestListResponse { relation_friend_info }))
}

/// Pending requests the user received
pub async fn get_incoming_friend(
    State(state): State<AppState>,
    RpcJson(body): RpcJson<UserIdRequest>,
) -> Result<Json<FriendRequestListResponse>, AppError> {
    let relation_friend_info = state.relationships.get_incoming_friend(body.user_id).await?;
    Ok(Json(FriendRequestListResponse { relation_friend_info }))
}

/// Accept a pending request
pub async fn accept_friend(
    State(state): State<AppState>,
    RpcJson(body): RpcJson<RelationActionRequest>,
) -> Result<Json<AcceptFriendResponse>, AppError> {
    let relation_friend_info = state
        .relationships
        .accept_friend(body.relation_id, body.user_id)
        .await?;

    Ok(Json(AcceptFriendResponse { relation_friend_info }))
}

/// Cancel or decline a pending request
pub async fn reject_friend(
    State(state): State<AppState>,
    RpcJson(body): RpcJson<RelationActionRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    state
        .relationships
        .reject_friend(body.relation_id, body.user_id)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// Accepted friends
pub async fn get_all_friend(
    State(state): State<AppState>,
    RpcJson(body): RpcJson<UserIdRequest>,
) -> Result<Json<FriendListResponse>, AppError> {
    let friend_info = state.relationships.get_all_friend(body.user_id).await?;
    Ok(Json(FriendListResponse { friend_info }))
}

pub async fn unfriend(
    State(state): State<AppState>,
    RpcJson(body): RpcJson<FriendPairRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.relationships.unfriend(body.user_id, body.friend_id).await?;
    Ok(Json(SuccessResponse::ok()))
}

pub async fn block_user(
    State(state): State<AppState>,
    RpcJson(body): RpcJson<FriendPairRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.relationships.block_user(body.user_id, body.friend_id).await?;
    Ok(Json(SuccessResponse::ok()))
}

pub async fn can_chat(
    State(state): State<AppState>,
    RpcJson(body): RpcJson<FriendPairRequest>,
) -> Result<Json<CanChatResponse>, AppError> {
    let can_chat = state.relationships.can_chat(body.user_id, body.friend_id).await?;
    Ok(Json(CanChatResponse { can_chat }))
}
