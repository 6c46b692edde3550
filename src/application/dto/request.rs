//! Request DTOs
//!
//! RPC request bodies. Every field defaults when absent (`0`, `""`, `[]`), so
//! "missing" is decided by the services, the same way a proto3 transport
//! would hand it over.

use serde::Deserialize;
use validator::Validate;

/// A user id alone (GetSentFriend, GetIncomingFriend, GetAllFriend, GetAllGroup)
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserIdRequest {
    pub user_id: i64,
}

/// Two users (AddFriend, Unfriend, BlockUser, CanChat)
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FriendPairRequest {
    pub user_id: i64,
    pub friend_id: i64,
}

/// Acting on a pending request (AcceptFriend, RejectFriend)
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RelationActionRequest {
    pub relation_id: i64,
    pub user_id: i64,
}

/// Message payload of SaveMessage
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct ChatMessageInput {
    #[validate(length(max = 128, message = "roomId must be at most 128 characters"))]
    pub room_id: String,

    pub user_id: i64,

    #[validate(length(max = 4000, message = "content must be at most 4000 characters"))]
    pub content: String,
}

/// SaveMessage request
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SaveMessageRequest {
    #[validate(nested)]
    pub message: ChatMessageInput,
}

/// GetMessage request
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GetMessageRequest {
    pub room_id: String,
    pub user_id: i64,
}

/// CreateGroup request
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateGroupRequest {
    #[validate(length(max = 255, message = "name must be at most 255 characters"))]
    pub name: String,

    pub avatar_url: String,

    #[validate(length(max = 1000, message = "description must be at most 1000 characters"))]
    pub description: String,

    pub owner_id: i64,
    pub max_member: i32,
    pub initial_user_ids: Vec<i64>,
}

/// AddUserToGroup request
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AddUserToGroupRequest {
    pub user_id: i64,
    pub group_id: i64,
    /// "owner" or "member"; owners are only made at creation
    pub role: String,
}

/// AddUsersToGroup request
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AddUsersToGroupRequest {
    pub user_ids: Vec<i64>,
    pub group_id: i64,
}

/// CheckGroupUser request
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CheckGroupUserRequest {
    pub user_id: i64,
    pub group_id: i64,
}

/// CreateComment request
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct CreateCommentRequest {
    pub post_id: i64,
    pub parent_id: i64,
    pub user_id: i64,

    #[validate(length(max = 5000, message = "content must be at most 5000 characters"))]
    pub content: String,
}

/// GetAllComment request
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GetAllCommentRequest {
    pub post_id: i64,
    pub user_id: i64,
}

/// GetComment request
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GetCommentRequest {
    pub comment_id: i64,
}

/// UpdateComment request
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default, rename_all = "camelCase")]
pub struct UpdateCommentRequest {
    pub comment_id: i64,
    pub user_id: i64,

    #[validate(length(max = 5000, message = "content must be at most 5000 characters"))]
    pub content: String,
}

/// Acting on a comment (DeleteComment, LikeComment, UnlikeComment)
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CommentActionRequest {
    pub comment_id: i64,
    pub user_id: i64,
}
