//! Relationship Service
//!
//! Friend-request lifecycle and blocking.
//!
//! A pair of users has at most one relation row. `PENDING` rows point from
//! requester to recipient, `BLOCKED` rows from blocker to blocked.

use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::application::services::enrichment::IdentityEnricher;
use crate::domain::{FriendRelation, RelationRepository, RelationStatus};
use crate::shared::error::AppError;
use crate::shared::time::to_iso;
use crate::shared::validation::require_id;

/// Relationship service trait
#[async_trait]
pub trait RelationshipService: Send + Sync {
    /// Send a friend request from `user_id` to `friend_id`
    async fn add_friend(&self, user_id: i64, friend_id: i64) -> Result<RelationDto, AppError>;

    /// Pending requests sent by the user, newest first
    async fn get_sent_friend(&self, user_id: i64) -> Result<Vec<FriendRequestDto>, AppError>;

    /// Pending requests received by the user, newest first
    async fn get_incoming_friend(&self, user_id: i64) -> Result<Vec<FriendRequestDto>, AppError>;

    /// Accept a pending request; only the recipient may do this
    async fn accept_friend(&self, relation_id: i64, user_id: i64)
        -> Result<FriendRequestDto, AppError>;

    /// Cancel or decline a pending request; either side may do this
    async fn reject_friend(&self, relation_id: i64, user_id: i64) -> Result<(), AppError>;

    /// All accepted friends of the user
    async fn get_all_friend(&self, user_id: i64) -> Result<Vec<FriendDto>, AppError>;

    /// Remove an accepted friendship
    async fn unfriend(&self, user_id: i64, friend_id: i64) -> Result<(), AppError>;

    /// Block `friend_id`, overwriting whatever relation the pair had
    async fn block_user(&self, user_id: i64, friend_id: i64) -> Result<(), AppError>;

    /// Whether the two users are friends
    async fn can_chat(&self, user_id: i64, friend_id: i64) -> Result<bool, AppError>;
}

/// A relation as stored.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationDto {
    pub relation_id: i64,
    pub user_id: i64,
    pub friend_id: i64,
    pub status: i16,
    #[serde(rename = "create_at")]
    pub created_at: String,
}

impl From<FriendRelation> for RelationDto {
    fn from(relation: FriendRelation) -> Self {
        Self {
            relation_id: relation.id,
            user_id: relation.user_id,
            friend_id: relation.friend_id,
            status: relation.status.code(),
            created_at: to_iso(relation.created_at),
        }
    }
}

/// A pending (or just accepted) request seen from one side.
/// `friend_id` is always the other party.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendRequestDto {
    pub relation_id: i64,
    pub friend_id: i64,
    pub friend_realname: String,
    pub avatar_url: String,
    pub status: i16,
    #[serde(rename = "create_at")]
    pub created_at: String,
}

/// An accepted friend.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FriendDto {
    pub friend_id: i64,
    pub friend_realname: String,
    pub avatar_url: String,
    pub status: i16,
}

/// RelationshipService implementation
pub struct RelationshipServiceImpl<R>
where
    R: RelationRepository,
{
    relation_repo: Arc<R>,
    enricher: IdentityEnricher,
}

impl<R> RelationshipServiceImpl<R>
where
    R: RelationRepository,
{
    pub fn new(relation_repo: Arc<R>, enricher: IdentityEnricher) -> Self {
        Self {
            relation_repo,
            enricher,
        }
    }

    fn distinct_pair(user_id: i64, friend_id: i64, action: &str) -> Result<(), AppError> {
        require_id(user_id, "userId")?;
        require_id(friend_id, "friendId")?;
        if user_id == friend_id {
            return Err(AppError::InvalidArgument(format!("Cannot {} yourself", action)));
        }
        Ok(())
    }

    /// Enrich pending rows with the identity of the other party.
    async fn pending_view(
        &self,
        rows: Vec<FriendRelation>,
        viewer_id: i64,
    ) -> Result<Vec<FriendRequestDto>, AppError> {
        let identities = self
            .enricher
            .lookup(rows.iter().map(|r| r.counterpart(viewer_id)))
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                let other = r.counterpart(viewer_id);
                let identity = identities.get(other);
                FriendRequestDto {
                    relation_id: r.id,
                    friend_id: other,
                    friend_realname: identity.realname.clone(),
                    avatar_url: identity.avatar_url.clone(),
                    status: r.status.code(),
                    created_at: to_iso(r.created_at),
                }
            })
            .collect())
    }

    async fn find_pending(&self, relation_id: i64) -> Result<FriendRelation, AppError> {
        self.relation_repo
            .find_by_id_with_status(relation_id, RelationStatus::Pending)
            .await?
            .ok_or_else(|| AppError::NotFound("Pending friend request not found".into()))
    }
}

#[async_trait]
impl<R> RelationshipService for RelationshipServiceImpl<R>
where
    R: RelationRepository + 'static,
{
    #[instrument(skip(self))]
    async fn add_friend(&self, user_id: i64, friend_id: i64) -> Result<RelationDto, AppError> {
        Self::distinct_pair(user_id, friend_id, "send a friend request to")?;

        if self.relation_repo.find_between(user_id, friend_id).await?.is_some() {
            debug!("Relation already exists for pair");
            return Err(AppError::AlreadyExists(
                "A relation or pending request already exists between these users".into(),
            ));
        }

        let relation = self
            .relation_repo
            .create(user_id, friend_id, RelationStatus::Pending)
            .await?;

        info!(relation_id = relation.id, "Friend request sent");
        Ok(relation.into())
    }

    #[instrument(skip(self))]
    async fn get_sent_friend(&self, user_id: i64) -> Result<Vec<FriendRequestDto>, AppError> {
        let rows = self
            .relation_repo
            .find_outgoing(user_id, RelationStatus::Pending)
            .await?;
        self.pending_view(rows, user_id).await
    }

    #[instrument(skip(self))]
    async fn get_incoming_friend(&self, user_id: i64) -> Result<Vec<FriendRequestDto>, AppError> {
        let rows = self
            .relation_repo
            .find_incoming(user_id, RelationStatus::Pending)
            .await?;
        self.pending_view(rows, user_id).await
    }

    #[instrument(skip(self))]
    async fn accept_friend(
        &self,
        relation_id: i64,
        user_id: i64,
    ) -> Result<FriendRequestDto, AppError> {
        let mut relation = self.find_pending(relation_id).await?;

        if !relation.is_recipient(user_id) {
            debug!(requester = relation.user_id, "Only the recipient may accept");
            return Err(AppError::PermissionDenied(
                "Only the recipient can accept this friend request".into(),
            ));
        }

        relation.status = RelationStatus::Accepted;
        let relation = self.relation_repo.update(&relation).await?;

        info!(relation_id, "Friend request accepted");

        // Names are not resolved here; callers refresh the friend list instead
        Ok(FriendRequestDto {
            relation_id: relation.id,
            friend_id: relation.user_id,
            friend_realname: String::new(),
            avatar_url: String::new(),
            status: relation.status.code(),
            created_at: to_iso(relation.created_at),
        })
    }

    #[instrument(skip(self))]
    async fn reject_friend(&self, relation_id: i64, user_id: i64) -> Result<(), AppError> {
        let relation = self.find_pending(relation_id).await?;

        if !relation.involves(user_id) {
            debug!("Caller is not a party to the request");
            return Err(AppError::PermissionDenied(
                "You are not allowed to cancel this friend request".into(),
            ));
        }

        self.relation_repo.delete(relation.id).await?;
        info!(relation_id, "Friend request removed");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn get_all_friend(&self, user_id: i64) -> Result<Vec<FriendDto>, AppError> {
        let rows = self
            .relation_repo
            .find_touching(user_id, RelationStatus::Accepted)
            .await?;

        let identities = self
            .enricher
            .lookup(rows.iter().map(|r| r.counterpart(user_id)))
            .await?;

        Ok(rows
            .into_iter()
            .map(|r| {
                let friend_id = r.counterpart(user_id);
                let identity = identities.get(friend_id);
                FriendDto {
                    friend_id,
                    friend_realname: identity.realname.clone(),
                    avatar_url: identity.avatar_url.clone(),
                    status: r.status.code(),
                }
            })
            .collect())
    }

    #[instrument(skip(self))]
    async fn unfriend(&self, user_id: i64, friend_id: i64) -> Result<(), AppError> {
        let relation = self
            .relation_repo
            .find_between_with_status(user_id, friend_id, RelationStatus::Accepted)
            .await?
            .ok_or_else(|| AppError::NotFound("Friendship not found".into()))?;

        self.relation_repo.delete(relation.id).await?;
        info!(relation_id = relation.id, "Friendship removed");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn block_user(&self, user_id: i64, friend_id: i64) -> Result<(), AppError> {
        Self::distinct_pair(user_id, friend_id, "block")?;

        let relation = self.relation_repo.upsert_blocked(user_id, friend_id).await?;

        info!(relation_id = relation.id, "User blocked");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn can_chat(&self, user_id: i64, friend_id: i64) -> Result<bool, AppError> {
        Self::distinct_pair(user_id, friend_id, "chat with")?;

        // Only ACCEPTED rows are looked up, so a blocked pair reads as "not friends"
        self.relation_repo
            .find_between_with_status(user_id, friend_id, RelationStatus::Accepted)
            .await?
            .ok_or_else(|| AppError::NotFound("Friendship not found".into()))?;

        Ok(true)
    }
}
