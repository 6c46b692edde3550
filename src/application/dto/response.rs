//! Response DTOs
//!
//! RPC response envelopes around the service DTOs.

use serde::Serialize;

use crate::application::services::{
    CommentNodeDto, FriendDto, FriendRequestDto, GroupDto, MembershipDto, MessageDto, RelationDto,
};

/// Acknowledgement of a write with nothing else to report
#[derive(Debug, Serialize)]
pub struct SuccessResponse {
    pub success: bool,
}

impl SuccessResponse {
    pub fn ok() -> Self {
        Self { success: true }
    }
}

/// AddFriend response
#[derive(Debug, Serialize)]
pub struct RelationResponse {
    pub relation: RelationDto,
}

/// GetSentFriend / GetIncomingFriend response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestListResponse {
    pub relation_friend_info: Vec<FriendRequestDto>,
}

/// AcceptFriend response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AcceptFriendResponse {
    pub relation_friend_info: FriendRequestDto,
}

/// GetAllFriend response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendListResponse {
    pub friend_info: Vec<FriendDto>,
}

/// CanChat response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CanChatResponse {
    pub can_chat: bool,
}

/// GetMessage response
#[derive(Debug, Serialize)]
pub struct MessageListResponse {
    pub message: Vec<MessageDto>,
}

/// CreateGroup response
#[derive(Debug, Serialize)]
pub struct GroupResponse {
    pub group: GroupDto,
}

/// GetAllGroup response
#[derive(Debug, Serialize)]
pub struct GroupListResponse {
    pub groups: Vec<GroupDto>,
}

/// AddUserToGroup / AddUsersToGroup response
#[derive(Debug, Serialize)]
pub struct MembershipListResponse {
    pub members: Vec<MembershipDto>,
}

/// CheckGroupUser response
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckGroupUserResponse {
    pub is_member: bool,
}

/// CreateComment / GetComment response
#[derive(Debug, Serialize)]
pub struct CommentResponse {
    pub comment: CommentNodeDto,
}

/// GetAllComment response
#[derive(Debug, Serialize)]
pub struct CommentListResponse {
    pub comments: Vec<CommentNodeDto>,
}
