//! Group Handlers

use axum::{extract::State, Json};

use crate::application::dto::request::{
    AddUserToGroupRequest, AddUsersToGroupRequest, CheckGroupUserRequest, CreateGroupRequest,
    UserIdRequest,
};
use crate::application::dto::response::{
    CheckGroupUserResponse, GroupListResponse, GroupResponse, MembershipListResponse,
};
use crate::application::services::CreateGroupDto;
use crate::domain::MemberRole;
use crate::presentation::http::extractors::RpcJson;
use crate::shared::error::AppError;
use crate::shared::validation::validate_request;
use crate::startup::AppState;

/// Create a group with its owner and initial roster
pub async fn create_group(
    State(state): State<AppState>,
    RpcJson(body): RpcJson<CreateGroupRequest>,
) -> Result<Json<GroupResponse>, AppError> {
    validate_request(&body)?;

    let request = CreateGroupDto {
        name: body.name,
        avatar_url: body.avatar_url,
        description: body.description,
        owner_id: body.owner_id,
        max_member: body.max_member,
        initial_user_ids: body.initial_user_ids,
    };

    let group = state.groups.create_group(request).await?;
    Ok(Json(GroupResponse { group }))
}

/// Add one user to a group
pub async fn add_user_to_group(
    State(state): State<AppState>,
    RpcJson(body): RpcJson<AddUserToGroupRequest>,
) -> Result<Json<MembershipListResponse>, AppError> {
    let role = MemberRole::from_str(&body.role);

    let members = state
        .groups
        .add_user_to_group(body.user_id, body.group_id, role)
        .await?;

    Ok(Json(MembershipListResponse { members }))
}

/// Add several users to a group
pub async fn add_users_to_group(
    State(state): State<AppState>,
    RpcJson(body): RpcJson<AddUsersToGroupRequest>,
) -> Result<Json<MembershipListResponse>, AppError> {
    let members = state
        .groups
        .add_users_to_group(body.user_ids, body.group_id)
        .await?;

    Ok(Json(MembershipListResponse { members }))
}

pub async fn check_group_user(
    State(state): State<AppState>,
    RpcJson(body): RpcJson<CheckGroupUserRequest>,
) -> Result<Json<CheckGroupUserResponse>, AppError> {
    let is_member = state
        .groups
        .check_group_user(body.user_id, body.group_id)
        .await?;

    Ok(Json(CheckGroupUserResponse { is_member }))
}

pub async fn get_all_group(
    State(state): State<AppState>,
    RpcJson(body): RpcJson<UserIdRequest>,
) -> Result<Json<GroupListResponse>, AppError> {
    let groups = state.groups.get_all_group(body.user_id).await?;
    Ok(Json(GroupListResponse { groups }))
}
