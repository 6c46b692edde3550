//! Route Configuration
//!
//! Configures all HTTP routes for the API.
//!
//! Every RPC method is served as `POST /rpc/<MethodName>`.

use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};

use super::handlers::{chat, comment, friend, group, health};
use crate::infrastructure::metrics;
use crate::presentation::middleware::track_rpc_metrics;
use crate::startup::AppState;

/// Create the main API router
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .nest("/rpc", rpc_routes())
        // Health check endpoints
        .route("/health", get(health::health_check))
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        // Prometheus metrics endpoint
        .route("/metrics", get(metrics_handler))
        .with_state(state)
}

/// Prometheus metrics endpoint handler
async fn metrics_handler() -> Response {
    match metrics::gather_metrics() {
        Ok(body) => (
            [(
                axum::http::header::CONTENT_TYPE,
                "text/plain; version=0.0.4; charset=utf-8",
            )],
            body,
        )
            .into_response(),
        Err(e) => {
            tracing::error!("Failed to encode metrics: {}", e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

/// RPC routes, one per service method
fn rpc_routes() -> Router<AppState> {
    Router::new()
        .merge(friend_routes())
        .merge(chat_routes())
        .merge(group_routes())
        .merge(comment_routes())
        .route_layer(middleware::from_fn(track_rpc_metrics))
}

fn friend_routes() -> Router<AppState> {
    Router::new()
        .route("/AddFriend", post(friend::add_friend))
        .route("/GetSentFriend", post(friend::get_sent_friend))
        .route("/GetIncomingFriend", post(friend::get_incoming_friend))
        .route("/AcceptFriend", post(friend::accept_friend))
        .route("/RejectFriend", post(friend::reject_friend))
        .route("/GetAllFriend", post(friend::get_all_friend))
        .route("/Unfriend", post(friend::unfriend))
        .route("/BlockUser", post(friend::block_user))
        .route("/CanChat", post(friend::can_chat))
}

fn chat_routes() -> Router<AppState> {
    Router::new()
        .route("/SaveMessage", post(chat::save_message))
        .route("/GetMessage", post(chat::get_message))
}

fn group_routes() -> Router<AppState> {
    Router::new()
        .route("/CreateGroup", post(group::create_group))
        .route("/AddUserToGroup", post(group::add_user_to_group))
        .route("/AddUsersToGroup", post(group::add_users_to_group))
        .route("/CheckGroupUser", post(group::check_group_user))
        .route("/GetAllGroup", post(group::get_all_group))
}

fn comment_routes() -> Router<AppState> {
    Router::new()
        .route("/CreateComment", post(comment::create_comment))
        .route("/GetAllComment", post(comment::get_all_comment))
        .route("/GetComment", post(comment::get_comment))
        .route("/UpdateComment", post(comment::update_comment))
        .route("/DeleteComment", post(comment::delete_comment))
        .route("/LikeComment", post(comment::like_comment))
        .route("/UnlikeComment", post(comment::unlike_comment))
}
