//! Comment Repository Implementation
//!
//! PostgreSQL implementation of the CommentRepository trait. Comments are
//! never physically deleted; `mark_deleted` only sets the soft-delete flag.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{Comment, CommentRepository, NewComment};
use crate::shared::error::AppError;

#[derive(Debug, sqlx::FromRow)]
struct CommentRow {
    id: i64,
    post_id: i64,
    parent_id: i64,
    user_id: i64,
    content: String,
    like_count: i32,
    is_delete: bool,
    created_at: DateTime<Utc>,
}

impl CommentRow {
    fn into_comment(self) -> Comment {
        Comment {
            id: self.id,
            post_id: self.post_id,
            parent_id: self.parent_id,
            user_id: self.user_id,
            content: self.content,
            like_count: self.like_count,
            is_delete: self.is_delete,
            created_at: self.created_at,
        }
    }
}

/// PostgreSQL comment repository implementation.
#[derive(Clone)]
pub struct PgCommentRepository {
    pool: PgPool,
}

impl PgCommentRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    fn expect_updated(rows_affected: u64, id: i64) -> Result<(), AppError> {
        if rows_affected == 0 {
            return Err(AppError::NotFound(format!("Comment {} not found", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl CommentRepository for PgCommentRepository {
    async fn find_by_id(&self, id: i64) -> Result<Option<Comment>, AppError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, parent_id, user_id, content, like_count, is_delete, created_at
            FROM comments
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(CommentRow::into_comment))
    }

    async fn find_by_post(&self, post_id: i64) -> Result<Vec<Comment>, AppError> {
        let rows = sqlx::query_as::<_, CommentRow>(
            r#"
            SELECT id, post_id, parent_id, user_id, content, like_count, is_delete, created_at
            FROM comments
            WHERE post_id = $1
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(post_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(CommentRow::into_comment).collect())
    }

    async fn create(&self, comment: &NewComment) -> Result<Comment, AppError> {
        let row = sqlx::query_as::<_, CommentRow>(
            r#"
            INSERT INTO comments (post_id, parent_id, user_id, content)
            VALUES ($1, $2, $3, $4)
            RETURNING id, post_id, parent_id, user_id, content, like_count, is_delete, created_at
            "#,
        )
        .bind(comment.post_id)
        .bind(comment.parent_id)
        .bind(comment.user_id)
        .bind(&comment.content)
        .fetch_one(&self.pool)
        .await?;

        Ok(row.into_comment())
    }

    async fn update_content(&self, id: i64, content: &str) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE comments SET content = $2 WHERE id = $1")
            .bind(id)
            .bind(content)
            .execute(&self.pool)
            .await?;

        Self::expect_updated(result.rows_affected(), id)
    }

    async fn mark_deleted(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("UPDATE comments SET is_delete = TRUE WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Self::expect_updated(result.rows_affected(), id)
    }
}
