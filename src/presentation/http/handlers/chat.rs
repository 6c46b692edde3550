//! Chat Handlers

use axum::{extract::State, Json};

use crate::application::dto::request::{GetMessageRequest, SaveMessageRequest};
use crate::application::dto::response::{MessageListResponse, SuccessResponse};
use crate::presentation::http::extractors::RpcJson;
use crate::shared::error::AppError;
use crate::shared::validation::validate_request;
use crate::startup::AppState;

/// Persist a chat message
pub async fn save_message(
    State(state): State<AppState>,
    RpcJson(body): RpcJson<SaveMessageRequest>,
) -> Result<Json<SuccessResponse>, AppError> {
    validate_request(&body)?;

    let message = body.message;
    state
        .chat
        .save_message(&message.room_id, message.user_id, &message.content)
        .await?;

    Ok(Json(SuccessResponse::ok()))
}

/// Room history, oldest first
pub async fn get_message(
    State(state): State<AppState>,
    RpcJson(body): RpcJson<GetMessageRequest>,
) -> Result<Json<MessageListResponse>, AppError> {
    let message = state.chat.get_message(&body.room_id, body.user_id).await?;
    Ok(Json(MessageListResponse { message }))
}
