//! Group membership entity and repository trait.
//!
//! Maps to the `chat_group_members` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::services::AdmissionMode;
use crate::shared::error::AppError;

/// Role of a member inside a group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum MemberRole {
    Owner,
    #[default]
    Member,
}

impl MemberRole {
    /// Convert from database string representation.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "owner" => Self::Owner,
            _ => Self::Member,
        }
    }

    /// Convert to database string representation.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Owner => "owner",
            Self::Member => "member",
        }
    }
}

impl std::fmt::Display for MemberRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A user's membership in a group.
///
/// Maps to the `chat_group_members` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - group_id: BIGINT NOT NULL REFERENCES chat_groups(id) ON DELETE CASCADE
/// - user_id: BIGINT NOT NULL
/// - role: VARCHAR(16) NOT NULL
/// - joined_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
///
/// `(group_id, user_id)` is unique. Rows are never updated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Membership {
    pub id: i64,
    pub group_id: i64,
    pub user_id: i64,
    pub role: MemberRole,
    pub joined_at: DateTime<Utc>,
}

/// Repository trait for Membership data access operations.
#[async_trait]
pub trait MembershipRepository: Send + Sync {
    /// Admit users into a group under the group's capacity.
    ///
    /// The group row is locked for the duration, so the count, dedup and
    /// inserts form one unit; `mode` selects single or bulk admission rules.
    /// Nothing is inserted when any rule fails.
    async fn admit(
        &self,
        group_id: i64,
        user_ids: &[i64],
        role: MemberRole,
        mode: AdmissionMode,
    ) -> Result<Vec<Membership>, AppError>;

    /// Check if a user is a member of a group.
    async fn exists(&self, group_id: i64, user_id: i64) -> Result<bool, AppError>;

    /// IDs of every group the user belongs to.
    async fn find_group_ids_by_user(&self, user_id: i64) -> Result<Vec<i64>, AppError>;
}
