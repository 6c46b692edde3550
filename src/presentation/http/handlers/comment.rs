//! Comment Handlers
//!
//! RPC endpoints of the comment-thread engine.

use axum::{extract::State, Json};

use crate::application::dto::request::{
    CommentActionRequest, CreateCommentRequest, GetAllCommentRequest, GetCommentRequest,
    UpdateCommentRequest,
};
use crate::application::dto::response::{CommentListResponse, CommentResponse, SuccessResponse};
use crate::presentation::http::extractors::RpcJson;
use crate::shared::error::AppError;
use crate::shared::validation::validate_request;
use crate::startup::AppState;

/// Create a root comment or a reply
pub async fn create_comment(
    State(state): State<AppState>,
    RpcJson(body): RpcJson<CreateCommentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    validate_request(&body)?;

    let comment = state
        .comments
        .create_comment(body.post_id, body.parent_id, body.user_id, &body.content)
        .await?;

    Ok(Json(CommentResponse { comment }))
}

/// The full thread of a post as a forest
pub async fn get_all_comment(
    State(state): State<AppState>,
    RpcJson(body): RpcJson<GetAllCommentRequest>,
) -> Result<Json<CommentListResponse>, AppError> {
    let comments = state
        .comments
        .get_all_comment(body.post_id, body.user_id)
        .await?;

    Ok(Json(CommentListResponse { comments }))
}

pub async fn get_comment(
    State(state): State<AppState>,
    RpcJson(body): RpcJson<GetCommentRequest>,
) -> Result<Json<CommentResponse>, AppError> {
    let comment = state.comments.get_comment(body.comment_id).await?;
    Ok(Json(CommentResponse { comment }))
}

/// Edit content; author only
pub async fn update_comment(
    State(state): State<AppState>,
    RpcJson(body): RpcJson<UpdateCommentRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    validate_request(&body)?;

    state
        .comments
        .update_comment(body.comment_id, body.user_id, &body.content)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// Soft delete; author only
pub async fn delete_comment(
    State(state): State<AppState>,
    RpcJson(body): RpcJson<CommentActionRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    state
        .comments
        .delete_comment(body.comment_id, body.user_id)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

pub async fn like_comment(
    State(state): State<AppState>,
    RpcJson(body): RpcJson<CommentActionRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.comments.like_comment(body.comment_id, body.user_id).await?;
    Ok(Json(SuccessResponse::ok()))
}

pub async fn unlike_comment(
    State(state): State<AppState>,
    RpcJson(body): RpcJson<CommentActionRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    state.comments.unlike_comment(body.comment_id, body.user_id).await?;
    Ok(Json(SuccessResponse::ok()))
}
