//! Relation Repository Implementation
//!
//! PostgreSQL implementation of the RelationRepository trait.
//! Pair lookups match the unordered pair in both directions.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::{FriendRelation, RelationRepository, RelationStatus};
use crate::shared::error::{is_unique_violation, AppError};

/// Database row representation of the friend_relations table.
#[derive(Debug, sqlx::FromRow)]
struct RelationRow {
    id: i64,
    user_id: i64,
    friend_id: i64,
    status: i16,
    created_at: DateTime<Utc>,
}

impl RelationRow {
    fn into_relation(self) -> Result<FriendRelation, AppError> {
        let status = RelationStatus::from_code(self.status).ok_or_else(|| {
            AppError::Internal(format!(
                "Relation {} has unknown status code {}",
                self.id, self.status
            ))
        })?;

        Ok(FriendRelation {
            id: self.id,
            user_id: self.user_id,
            friend_id: self.friend_id,
            status,
            created_at: self.created_at,
        })
    }
}

fn into_relations(rows: Vec<RelationRow>) -> Result<Vec<FriendRelation>, AppError> {
    rows.into_iter().map(RelationRow::into_relation).collect()
}

/// PostgreSQL relation repository implementation.
#[derive(Clone)]
pub struct PgRelationRepository {
    pool: PgPool,
}

impl PgRelationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RelationRepository for PgRelationRepository {
    async fn find_by_id_with_status(
        &self,
        id: i64,
        status: RelationStatus,
    ) -> Result<Option<FriendRelation>, AppError> {
        let row = sqlx::query_as::<_, RelationRow>(
            r#"
            SELECT id, user_id, friend_id, status, created_at
            FROM friend_relations
            WHERE id = $1 AND status = $2
            "#,
        )
        .bind(id)
        .bind(status.code())
        .fetch_optional(&self.pool)
        .await?;

        row.map(RelationRow::into_relation).transpose()
    }

    async fn find_between(&self, a: i64, b: i64) -> Result<Option<FriendRelation>, AppError> {
        let row = sqlx::query_as::<_, RelationRow>(
            r#"
            SELECT id, user_id, friend_id, status, created_at
            FROM friend_relations
            WHERE (user_id = $1 AND friend_id = $2)
               OR (user_id = $2 AND friend_id = $1)
            LIMIT 1
            "#,
        )
        .bind(a)
        .bind(b)
        .fetch_optional(&self.pool)
        .await?;

        row.map(RelationRow::into_relation).transpose()
    }

    async fn find_between_with_status(
        &self,
        a: i64,
        b: i64,
        status: RelationStatus,
    ) -> Result<Option<FriendRelation>, AppError> {
        let row = sqlx::query_as::<_, RelationRow>(
            r#"
            SELECT id, user_id, friend_id, status, created_at
            FROM friend_relations
            WHERE ((user_id = $1 AND friend_id = $2)
                OR (user_id = $2 AND friend_id = $1))
              AND status = $3
            LIMIT 1
            "#,
        )
        .bind(a)
        .bind(b)
        .bind(status.code())
        .fetch_optional(&self.pool)
        .await?;

        row.map(RelationRow::into_relation).transpose()
    }

    async fn find_outgoing(
        &self,
        user_id: i64,
        status: RelationStatus,
    ) -> Result<Vec<FriendRelation>, AppError> {
        let rows = sqlx::query_as::<_, RelationRow>(
            r#"
            SELECT id, user_id, friend_id, status, created_at
            FROM friend_relations
            WHERE user_id = $1 AND status = $2
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .bind(status.code())
        .fetch_all(&self.pool)
        .await?;

        into_relations(rows)
    }

    async fn find_incoming(
        &self,
        user_id: i64,
        status: RelationStatus,
    ) -> Result<Vec<FriendRelation>, AppError> {
        let rows = sqlx::query_as::<_, RelationRow>(
            r#"
            SELECT id, user_id, friend_id, status, created_at
            FROM friend_relations
            WHERE friend_id = $1 AND status = $2
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .bind(status.code())
        .fetch_all(&self.pool)
        .await?;

        into_relations(rows)
    }

    async fn find_touching(
        &self,
        user_id: i64,
        status: RelationStatus,
    ) -> Result<Vec<FriendRelation>, AppError> {
        let rows = sqlx::query_as::<_, RelationRow>(
            r#"
            SELECT id, user_id, friend_id, status, created_at
            FROM friend_relations
            WHERE (user_id = $1 OR friend_id = $1) AND status = $2
            ORDER BY created_at DESC, id DESC
            "#,
        )
        .bind(user_id)
        .bind(status.code())
        .fetch_all(&self.pool)
        .await?;

        into_relations(rows)
    }

    async fn create(
        &self,
        user_id: i64,
        friend_id: i64,
        status: RelationStatus,
    ) -> Result<FriendRelation, AppError> {
        let row = sqlx::query_as::<_, RelationRow>(
            r#"
            INSERT INTO friend_relations (user_id, friend_id, status)
            VALUES ($1, $2, $3)
            RETURNING id, user_id, friend_id, status, created_at
            "#,
        )
        .bind(user_id)
        .bind(friend_id)
        .bind(status.code())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::AlreadyExists("A relation between these users already exists".into())
            } else {
                AppError::Database(e)
            }
        })?;

        row.into_relation()
    }

    async fn upsert_blocked(
        &self,
        blocker_id: i64,
        blocked_id: i64,
    ) -> Result<FriendRelation, AppError> {
        // Conflict target is the unordered-pair unique index
        let row = sqlx::query_as::<_, RelationRow>(
            r#"
            INSERT INTO friend_relations (user_id, friend_id, status)
            VALUES ($1, $2, $3)
            ON CONFLICT ((LEAST(user_id, friend_id)), (GREATEST(user_id, friend_id)))
            DO UPDATE SET user_id = EXCLUDED.user_id,
                          friend_id = EXCLUDED.friend_id,
                          status = EXCLUDED.status
            RETURNING id, user_id, friend_id, status, created_at
            "#,
        )
        .bind(blocker_id)
        .bind(blocked_id)
        .bind(RelationStatus::Blocked.code())
        .fetch_one(&self.pool)
        .await?;

        row.into_relation()
    }

    async fn update(&self, relation: &FriendRelation) -> Result<FriendRelation, AppError> {
        let row = sqlx::query_as::<_, RelationRow>(
            r#"
            UPDATE friend_relations
            SET user_id = $2, friend_id = $3, status = $4
            WHERE id = $1
            RETURNING id, user_id, friend_id, status, created_at
            "#,
        )
        .bind(relation.id)
        .bind(relation.user_id)
        .bind(relation.friend_id)
        .bind(relation.status.code())
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Relation {} not found", relation.id)))?;

        row.into_relation()
    }

    async fn delete(&self, id: i64) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM friend_relations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Relation {} not found", id)));
        }

        Ok(())
    }
}
