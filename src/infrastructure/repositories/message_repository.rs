//! Message Repository Implementation
//!
//! PostgreSQL implementation of chat message storage, keyed by room id.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Message, MessageRepository};
use crate::shared::error::AppError;

/// PostgreSQL message repository implementation.
pub struct PgMessageRepository {
    pool: PgPool,
}

impl PgMessageRepository {
    /// Creates a new PgMessageRepository with the given connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Internal row type for message queries.
#[derive(Debug, sqlx::FromRow)]
struct MessageRow {
    id: i64,
    room_id: String,
    user_id: i64,
    content: String,
    created_at: DateTime<Utc>,
}

impl MessageRow {
    fn into_message(self) -> Message {
        Message {
            id: self.id,
            room_id: self.room_id,
            user_id: self.user_id,
            content: self.content,
            created_at: self.created_at,
        }
    }
}

#[async_trait]
impl MessageRepository for PgMessageRepository {
    async fn create(
        &self,
        room_id: &str,
        user_id: i64,
        content: &str,
        created_at: DateTime<Utc>,
    ) -> Result<Message, AppError> {
        let row = sqlx::query_as::<_, MessageRow>(
            r#"
            INSERT INTO chat_messages (room_id, user_id, content, created_at)
            VALUES ($1, $2, $3, $4)
            RETURNING id, room_id, user_id, content, created_at
            "#,
        )
        .bind(room_id)
        .bind(user_id)
        .bind(content)
        .bind(created_at)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_message())
    }

    /// Oldest first.
    async fn find_by_room(&self, room_id: &str) -> Result<Vec<Message>, AppError> {
        let rows = sqlx::query_as::<_, MessageRow>(
            r#"
            SELECT id, room_id, user_id, content, created_at
            FROM chat_messages
            WHERE room_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(room_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(MessageRow::into_message).collect())
    }
}
