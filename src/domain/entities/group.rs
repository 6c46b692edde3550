//! Group entity and repository trait.
//!
//! Maps to the `chat_groups` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::entities::Membership;
use crate::shared::error::AppError;

/// Capacity used when none is given.
pub const DEFAULT_MAX_MEMBER: i32 = 500;

/// A chat group with a bounded roster.
///
/// Maps to the `chat_groups` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - name: VARCHAR(255) NOT NULL
/// - avatar_url: TEXT NULL
/// - description: TEXT NOT NULL DEFAULT ''
/// - owner_id: BIGINT NOT NULL
/// - max_member: INTEGER NOT NULL DEFAULT 500
/// - created_at / updated_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Group {
    pub id: i64,
    pub name: String,
    pub avatar_url: Option<String>,
    pub description: String,
    pub owner_id: i64,
    pub max_member: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Fields needed to create a group.
#[derive(Debug, Clone)]
pub struct NewGroup {
    pub name: String,
    pub avatar_url: Option<String>,
    pub description: String,
    pub owner_id: i64,
    pub max_member: i32,
}

/// Repository trait for Group data access operations.
#[async_trait]
pub trait GroupRepository: Send + Sync {
    /// Find groups by ID set. Unknown IDs are skipped.
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Group>, AppError>;

    /// Create a group, admit its owner with the owner role, then bulk-admit
    /// `initial_user_ids` as members. All-or-nothing: any admission failure
    /// leaves no group behind.
    async fn create_with_roster(
        &self,
        group: &NewGroup,
        initial_user_ids: &[i64],
    ) -> Result<(Group, Vec<Membership>), AppError>;
}
