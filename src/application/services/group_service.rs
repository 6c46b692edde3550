//! Group Service
//!
//! Group creation and capacity-bounded roster management.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::domain::services::AdmissionMode;
use crate::domain::{Group, GroupRepository, MemberRole, Membership, MembershipRepository, NewGroup};
use crate::shared::error::AppError;
use crate::shared::time::to_iso;
use crate::shared::validation::{require_id, require_text};

/// Group service trait
#[async_trait]
pub trait GroupService: Send + Sync {
    /// Create a group with its owner and initial members, all or nothing
    async fn create_group(&self, request: CreateGroupDto) -> Result<GroupDto, AppError>;

    /// Add one user
    async fn add_user_to_group(
        &self,
        user_id: i64,
        group_id: i64,
        role: MemberRole,
    ) -> Result<Vec<MembershipDto>, AppError>;

    /// Add several users, skipping those already in the group
    async fn add_users_to_group(
        &self,
        user_ids: Vec<i64>,
        group_id: i64,
    ) -> Result<Vec<MembershipDto>, AppError>;

    /// Membership predicate; absence is `false`, not an error
    async fn check_group_user(&self, user_id: i64, group_id: i64) -> Result<bool, AppError>;

    /// Every group the user belongs to
    async fn get_all_group(&self, user_id: i64) -> Result<Vec<GroupDto>, AppError>;
}

/// Create group request
#[derive(Debug, Clone, Default)]
pub struct CreateGroupDto {
    pub name: String,
    pub avatar_url: String,
    pub description: String,
    pub owner_id: i64,
    /// `0` selects the configured default
    pub max_member: i32,
    pub initial_user_ids: Vec<i64>,
}

/// Group summary
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDto {
    pub id: i64,
    pub name: String,
    pub avatar_url: String,
    pub description: String,
    pub owner_id: i64,
    pub max_member: i32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_count: Option<i64>,
    pub created_at: String,
}

impl GroupDto {
    pub fn from_group(group: Group, member_count: Option<i64>) -> Self {
        Self {
            id: group.id,
            name: group.name,
            avatar_url: group.avatar_url.unwrap_or_default(),
            description: group.description,
            owner_id: group.owner_id,
            max_member: group.max_member,
            member_count,
            created_at: to_iso(group.created_at),
        }
    }
}

/// Membership data transfer object
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MembershipDto {
    pub id: i64,
    pub group_id: i64,
    pub user_id: i64,
    pub role: String,
    pub joined_at: String,
}

impl From<Membership> for MembershipDto {
    fn from(membership: Membership) -> Self {
        Self {
            id: membership.id,
            group_id: membership.group_id,
            user_id: membership.user_id,
            role: membership.role.as_str().to_string(),
            joined_at: to_iso(membership.joined_at),
        }
    }
}

/// GroupService implementation
pub struct GroupServiceImpl<G, M>
where
    G: GroupRepository,
    M: MembershipRepository,
{
    group_repo: Arc<G>,
    membership_repo: Arc<M>,
    default_max_member: i32,
}

impl<G, M> GroupServiceImpl<G, M>
where
    G: GroupRepository,
    M: MembershipRepository,
{
    pub fn new(group_repo: Arc<G>, membership_repo: Arc<M>, default_max_member: i32) -> Self {
        Self {
            group_repo,
            membership_repo,
            default_max_member,
        }
    }

    fn capacity(&self, requested: i32) -> Result<i32, AppError> {
        match requested {
            0 => Ok(self.default_max_member),
            n if n < 0 => Err(AppError::InvalidArgument(format!(
                "maxMember must be positive, got {}",
                n
            ))),
            n => Ok(n),
        }
    }
}

#[async_trait]
impl<G, M> GroupService for GroupServiceImpl<G, M>
where
    G: GroupRepository + 'static,
    M: MembershipRepository + 'static,
{
    #[instrument(skip(self, request), fields(owner_id = request.owner_id, initial = request.initial_user_ids.len()))]
    async fn create_group(&self, request: CreateGroupDto) -> Result<GroupDto, AppError> {
        let name = require_text(&request.name, "name")?.trim().to_string();
        let owner_id = require_id(request.owner_id, "ownerId")?;
        let max_member = self.capacity(request.max_member)?;

        // The owner is admitted separately with the OWNER role
        let initial: Vec<i64> = request
            .initial_user_ids
            .iter()
            .copied()
            .filter(|id| *id != owner_id)
            .collect();

        if initial.iter().any(|id| *id <= 0) {
            return Err(AppError::InvalidArgument("initialUserIds must be positive".into()));
        }

        let new_group = NewGroup {
            name,
            avatar_url: Some(request.avatar_url).filter(|url| !url.is_empty()),
            description: request.description,
            owner_id,
            max_member,
        };

        let (group, members) = self
            .group_repo
            .create_with_roster(&new_group, &initial)
            .await?;

        info!(group_id = group.id, members = members.len(), "Group created");
        Ok(GroupDto::from_group(group, Some(members.len() as i64)))
    }

    #[instrument(skip(self))]
    async fn add_user_to_group(
        &self,
        user_id: i64,
        group_id: i64,
        role: MemberRole,
    ) -> Result<Vec<MembershipDto>, AppError> {
        require_id(user_id, "userId")?;
        require_id(group_id, "groupId")?;

        if role == MemberRole::Owner {
            debug!("OWNER role is only granted at creation, admitting as MEMBER");
        }

        let admitted = self
            .membership_repo
            .admit(group_id, &[user_id], MemberRole::Member, AdmissionMode::Single)
            .await?;

        info!(group_id, user_id, "User added to group");
        Ok(admitted.into_iter().map(MembershipDto::from).collect())
    }

    #[instrument(skip(self, user_ids), fields(requested = user_ids.len()))]
    async fn add_users_to_group(
        &self,
        user_ids: Vec<i64>,
        group_id: i64,
    ) -> Result<Vec<MembershipDto>, AppError> {
        require_id(group_id, "groupId")?;
        if user_ids.is_empty() {
            return Err(AppError::InvalidArgument("userIds must not be empty".into()));
        }
        if user_ids.iter().any(|id| *id <= 0) {
            return Err(AppError::InvalidArgument("userIds must be positive".into()));
        }

        let admitted = self
            .membership_repo
            .admit(group_id, &user_ids, MemberRole::Member, AdmissionMode::Bulk)
            .await?;

        info!(group_id, admitted = admitted.len(), "Users added to group");
        Ok(admitted.into_iter().map(MembershipDto::from).collect())
    }

    #[instrument(skip(self))]
    async fn check_group_user(&self, user_id: i64, group_id: i64) -> Result<bool, AppError> {
        self.membership_repo.exists(group_id, user_id).await
    }

    #[instrument(skip(self))]
    async fn get_all_group(&self, user_id: i64) -> Result<Vec<GroupDto>, AppError> {
        let group_ids = self.membership_repo.find_group_ids_by_user(user_id).await?;
        if group_ids.is_empty() {
            return Ok(Vec::new());
        }

        let groups = self.group_repo.find_by_ids(&group_ids).await?;
        Ok(groups
            .into_iter()
            .map(|group| GroupDto::from_group(group, None))
            .collect())
    }
}
