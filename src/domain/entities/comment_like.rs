//! Comment like entity and repository trait.
//!
//! Maps to the `comment_likes` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// One user's like on one comment.
///
/// Maps to the `comment_likes` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - comment_id: BIGINT NOT NULL
/// - user_id: BIGINT NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
///
/// `(user_id, comment_id)` is unique.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommentLike {
    pub id: i64,
    pub comment_id: i64,
    pub user_id: i64,
    pub created_at: DateTime<Utc>,
}

/// Repository trait for CommentLike data access operations.
#[async_trait]
pub trait CommentLikeRepository: Send + Sync {
    /// Insert a like and increment the comment's `like_count` atomically.
    ///
    /// Returns `false` and changes nothing when the like already exists.
    async fn like(&self, comment_id: i64, user_id: i64) -> Result<bool, AppError>;

    /// Remove the like, if any, and decrement `like_count` atomically.
    ///
    /// The counter is decremented even when no like row existed. Returns
    /// whether a row was removed.
    async fn unlike(&self, comment_id: i64, user_id: i64) -> Result<bool, AppError>;

    /// The subset of `comment_ids` liked by `user_id`.
    async fn find_liked_comment_ids(
        &self,
        user_id: i64,
        comment_ids: &[i64],
    ) -> Result<Vec<i64>, AppError>;
}
