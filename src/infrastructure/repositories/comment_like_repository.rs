//! Comment Like Repository Implementation
//!
//! Likes are unique per `(user_id, comment_id)`; inserts report whether a row
//! was actually written instead of failing on duplicates. The like row and the
//! cached `comments.like_count` change in the same transaction.

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, Transaction};

use crate::domain::CommentLikeRepository;
use crate::infrastructure::database::execute_in_transaction;
use crate::shared::error::AppError;

#[derive(Clone)]
pub struct PgCommentLikeRepository {
    pool: PgPool,
}

impl PgCommentLikeRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CommentLikeRepository for PgCommentLikeRepository {
    async fn like(&self, comment_id: i64, user_id: i64) -> Result<bool, AppError> {
        execute_in_transaction(&self.pool, move |tx| {
            Box::pin(async move {
                let result = sqlx::query(
                    r#"
                    INSERT INTO comment_likes (comment_id, user_id)
                    VALUES ($1, $2)
                    ON CONFLICT (user_id, comment_id) DO NOTHING
                    "#,
                )
                .bind(comment_id)
                .bind(user_id)
                .execute(&mut **tx)
                .await?;

                let inserted = result.rows_affected() == 1;
                if inserted {
                    adjust_like_count(tx, comment_id, 1).await?;
                }

                Ok::<_, AppError>(inserted)
            })
        })
        .await
    }

    async fn unlike(&self, comment_id: i64, user_id: i64) -> Result<bool, AppError> {
        execute_in_transaction(&self.pool, move |tx| {
            Box::pin(async move {
                let result = sqlx::query(
                    "DELETE FROM comment_likes WHERE comment_id = $1 AND user_id = $2",
                )
                .bind(comment_id)
                .bind(user_id)
                .execute(&mut **tx)
                .await?;

                adjust_like_count(tx, comment_id, -1).await?;

                Ok::<_, AppError>(result.rows_affected() > 0)
            })
        })
        .await
    }

    async fn find_liked_comment_ids(
        &self,
        user_id: i64,
        comment_ids: &[i64],
    ) -> Result<Vec<i64>, AppError> {
        if comment_ids.is_empty() {
            return Ok(Vec::new());
        }

        let ids = sqlx::query_scalar::<_, i64>(
            "SELECT comment_id FROM comment_likes WHERE user_id = $1 AND comment_id = ANY($2)",
        )
        .bind(user_id)
        .bind(comment_ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}

async fn adjust_like_count(
    tx: &mut Transaction<'static, Postgres>,
    comment_id: i64,
    delta: i32,
) -> Result<(), AppError> {
    sqlx::query("UPDATE comments SET like_count = like_count + $2 WHERE id = $1")
        .bind(comment_id)
        .bind(delta)
        .execute(&mut **tx)
        .await?;
    Ok(())
}
