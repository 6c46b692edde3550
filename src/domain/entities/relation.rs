//! Friend relation entity and repository trait.
//!
//! Maps to the `friend_relations` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Lifecycle state of a relation.
///
/// Stored as SMALLINT and exposed numerically on the wire:
/// `0 = pending`, `1 = accepted`, `2 = blocked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RelationStatus {
    /// Friend request sent, awaiting the recipient
    Pending,
    /// Both sides are friends
    Accepted,
    /// `user_id` blocked `friend_id`
    Blocked,
}

impl RelationStatus {
    /// Convert from the stored code. Unknown codes are rejected.
    pub fn from_code(code: i16) -> Option<Self> {
        match code {
            0 => Some(Self::Pending),
            1 => Some(Self::Accepted),
            2 => Some(Self::Blocked),
            _ => None,
        }
    }

    /// Stored / wire code.
    pub fn code(&self) -> i16 {
        match self {
            Self::Pending => 0,
            Self::Accepted => 1,
            Self::Blocked => 2,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Blocked => "blocked",
        }
    }
}

impl std::fmt::Display for RelationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An edge of the friend graph.
///
/// Maps to the `friend_relations` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - user_id: BIGINT NOT NULL (requester while pending, blocker once blocked)
/// - friend_id: BIGINT NOT NULL
/// - status: SMALLINT NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
///
/// At most one row exists per unordered `{user_id, friend_id}` pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FriendRelation {
    pub id: i64,
    pub user_id: i64,
    pub friend_id: i64,
    pub status: RelationStatus,
    pub created_at: DateTime<Utc>,
}

impl FriendRelation {
    /// Whether `user_id` is one of the two sides.
    pub fn involves(&self, user_id: i64) -> bool {
        self.user_id == user_id || self.friend_id == user_id
    }

    /// The side that is not `user_id`.
    pub fn counterpart(&self, user_id: i64) -> i64 {
        if self.user_id == user_id {
            self.friend_id
        } else {
            self.user_id
        }
    }

    /// Whether `user_id` received this request.
    pub fn is_recipient(&self, user_id: i64) -> bool {
        self.friend_id == user_id
    }
}

/// Repository trait for friend relation data access operations.
///
/// "Pair" lookups match the unordered pair, i.e. both directions.
#[async_trait]
pub trait RelationRepository: Send + Sync {
    /// Find a relation by ID restricted to one status.
    async fn find_by_id_with_status(
        &self,
        id: i64,
        status: RelationStatus,
    ) -> Result<Option<FriendRelation>, AppError>;

    /// Find the relation for an unordered pair, any status.
    async fn find_between(&self, a: i64, b: i64) -> Result<Option<FriendRelation>, AppError>;

    /// Find the relation for an unordered pair with the given status.
    async fn find_between_with_status(
        &self,
        a: i64,
        b: i64,
        status: RelationStatus,
    ) -> Result<Option<FriendRelation>, AppError>;

    /// Rows where `user_id` is the initiating side, newest first.
    async fn find_outgoing(
        &self,
        user_id: i64,
        status: RelationStatus,
    ) -> Result<Vec<FriendRelation>, AppError>;

    /// Rows where `user_id` is the receiving side, newest first.
    async fn find_incoming(
        &self,
        user_id: i64,
        status: RelationStatus,
    ) -> Result<Vec<FriendRelation>, AppError>;

    /// Rows touching `user_id` on either side with the given status.
    async fn find_touching(
        &self,
        user_id: i64,
        status: RelationStatus,
    ) -> Result<Vec<FriendRelation>, AppError>;

    /// Insert a relation. A pair collision yields `AppError::AlreadyExists`.
    async fn create(
        &self,
        user_id: i64,
        friend_id: i64,
        status: RelationStatus,
    ) -> Result<FriendRelation, AppError>;

    /// Make `blocker_id -> blocked_id` the pair's `BLOCKED` relation, inserting
    /// the row if the pair has none and overwriting it otherwise. Concurrent
    /// calls for one pair converge on a single row.
    async fn upsert_blocked(
        &self,
        blocker_id: i64,
        blocked_id: i64,
    ) -> Result<FriendRelation, AppError>;

    /// Overwrite direction and status of an existing row.
    async fn update(&self, relation: &FriendRelation) -> Result<FriendRelation, AppError>;

    /// Delete a relation by ID.
    async fn delete(&self, id: i64) -> Result<(), AppError>;
}
