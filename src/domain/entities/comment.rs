//! Comment entity and repository trait.
//!
//! Maps to the `comments` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// `parent_id` value marking a root comment.
pub const ROOT_PARENT_ID: i64 = 0;

/// A comment on a post, possibly replying to another comment.
///
/// Maps to the `comments` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - post_id: BIGINT NOT NULL
/// - parent_id: BIGINT NOT NULL DEFAULT 0
/// - user_id: BIGINT NOT NULL
/// - content: TEXT NOT NULL
/// - like_count: INTEGER NOT NULL DEFAULT 0 (cached count of comment_likes rows)
/// - is_delete: BOOLEAN NOT NULL DEFAULT FALSE (soft delete)
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub post_id: i64,
    pub parent_id: i64,
    pub user_id: i64,
    pub content: String,
    pub like_count: i32,
    pub is_delete: bool,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn is_author(&self, user_id: i64) -> bool {
        self.user_id == user_id
    }
}

/// Fields needed to create a comment.
#[derive(Debug, Clone)]
pub struct NewComment {
    pub post_id: i64,
    pub parent_id: i64,
    pub user_id: i64,
    pub content: String,
}

/// Repository trait for Comment data access operations.
#[async_trait]
pub trait CommentRepository: Send + Sync {
    /// Find a comment by ID, deleted or not.
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, AppError>;

    /// All comments of a post, oldest first.
    async fn find_by_post(&self, post_id: i64) -> Result<Vec<Comment>, AppError>;

    /// Insert a comment with zero likes, not deleted.
    async fn create(&self, comment: &NewComment) -> Result<Comment, AppError>;

    /// Replace the content of a comment.
    async fn update_content(&self, id: i64, content: &str) -> Result<(), AppError>;

    /// Set the soft-delete flag.
    async fn mark_deleted(&self, id: i64) -> Result<(), AppError>;
}
