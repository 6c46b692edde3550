//! Chat message entity and repository trait.
//!
//! Maps to the `chat_messages` table in the database schema.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// A message posted to a room.
///
/// Maps to the `chat_messages` table:
/// - id: BIGSERIAL PRIMARY KEY
/// - room_id: VARCHAR(128) NOT NULL ("dm:<a>:<b>" or "group:<id>")
/// - user_id: BIGINT NOT NULL
/// - content: TEXT NOT NULL
/// - created_at: TIMESTAMPTZ NOT NULL DEFAULT NOW()
///
/// Messages are immutable once stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub id: i64,
    pub room_id: String,
    pub user_id: i64,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

/// Repository trait for Message data access operations.
#[async_trait]
pub trait MessageRepository: Send + Sync {
    /// Store a message stamped with `created_at`.
    async fn create(
        &self,
        room_id: &str,
        user_id: i64,
        content: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Message, AppError>;

    /// All messages of a room, oldest first.
    async fn find_by_room(&self, room_id: &str) -> Result<Vec<Message>, AppError>;
}
