//! Membership Repository Implementation
//!
//! PostgreSQL implementation of the MembershipRepository trait.
//!
//! Admission runs under a row lock on the owning `chat_groups` row so the
//! count, deduplication and inserts of one request cannot interleave with
//! another admission to the same group.

use std::collections::HashSet;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::{PgConnection, PgPool};
use tracing::debug;

use crate::domain::services::{AdmissionMode, RosterPlanner};
use crate::domain::{MemberRole, Membership, MembershipRepository};
use crate::infrastructure::database::execute_in_transaction;
use crate::shared::error::{is_unique_violation, AppError};

/// Database row representation of the chat_group_members table.
#[derive(Debug, sqlx::FromRow)]
struct MembershipRow {
    id: i64,
    group_id: i64,
    user_id: i64,
    role: String,
    joined_at: DateTime<Utc>,
}

impl MembershipRow {
    fn into_membership(self) -> Membership {
        Membership {
            id: self.id,
            group_id: self.group_id,
            user_id: self.user_id,
            role: MemberRole::from_str(&self.role),
            joined_at: self.joined_at,
        }
    }
}

/// Lock the group row for the rest of the transaction and return its capacity.
pub(crate) async fn lock_group(conn: &mut PgConnection, group_id: i64) -> Result<i32, AppError> {
    sqlx::query_scalar::<_, i32>("SELECT max_member FROM chat_groups WHERE id = $1 FOR UPDATE")
        .bind(group_id)
        .fetch_optional(conn)
        .await?
        .ok_or_else(|| AppError::NotFound("Group not found".into()))
}

/// Admit users to a group whose row is already locked by the caller.
pub(crate) async fn admit_locked(
    conn: &mut PgConnection,
    group_id: i64,
    max_member: i32,
    user_ids: &[i64],
    role: MemberRole,
    mode: AdmissionMode,
) -> Result<Vec<Membership>, AppError> {
    let current: i64 =
        sqlx::query_scalar("SELECT COUNT(*) FROM chat_group_members WHERE group_id = $1")
            .bind(group_id)
            .fetch_one(&mut *conn)
            .await?;

    let existing: HashSet<i64> = sqlx::query_scalar::<_, i64>(
        "SELECT user_id FROM chat_group_members WHERE group_id = $1 AND user_id = ANY($2)",
    )
    .bind(group_id)
    .bind(user_ids)
    .fetch_all(&mut *conn)
    .await?
    .into_iter()
    .collect();

    let fresh = RosterPlanner::plan(max_member, current, user_ids, &existing, mode)?;
    debug!(group_id, current, admitting = fresh.len(), "Roster admission planned");

    let rows = sqlx::query_as::<_, MembershipRow>(
        r#"
        INSERT INTO chat_group_members (group_id, user_id, role)
        SELECT $1, ids.user_id, $3
        FROM UNNEST($2::BIGINT[]) WITH ORDINALITY AS ids(user_id, ord)
        ORDER BY ids.ord
        RETURNING id, group_id, user_id, role, joined_at
        "#,
    )
    .bind(group_id)
    .bind(fresh.as_slice())
    .bind(role.as_str())
    .fetch_all(&mut *conn)
    .await
    .map_err(|e| {
        if is_unique_violation(&e) {
            AppError::AlreadyExists("User is already a member of this group".into())
        } else {
            AppError::Database(e)
        }
    })?;

    Ok(rows.into_iter().map(MembershipRow::into_membership).collect())
}

/// PostgreSQL membership repository implementation.
#[derive(Clone)]
pub struct PgMembershipRepository {
    pool: PgPool,
}

impl PgMembershipRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MembershipRepository for PgMembershipRepository {
    async fn admit(
        &self,
        group_id: i64,
        user_ids: &[i64],
        role: MemberRole,
        mode: AdmissionMode,
    ) -> Result<Vec<Membership>, AppError> {
        let user_ids = user_ids.to_vec();

        execute_in_transaction(&self.pool, move |tx| {
            Box::pin(async move {
                let max_member = lock_group(&mut **tx, group_id).await?;
                admit_locked(&mut **tx, group_id, max_member, &user_ids, role, mode).await
            })
        })
        .await
    }

    async fn exists(&self, group_id: i64, user_id: i64) -> Result<bool, AppError> {
        let exists: bool = sqlx::query_scalar(
            r#"
            SELECT EXISTS(
                SELECT 1 FROM chat_group_members
                WHERE group_id = $1 AND user_id = $2
            )
            "#,
        )
        .bind(group_id)
        .bind(user_id)
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn find_group_ids_by_user(&self, user_id: i64) -> Result<Vec<i64>, AppError> {
        let ids = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT group_id FROM chat_group_members
            WHERE user_id = $1
            ORDER BY joined_at ASC, id ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(ids)
    }
}
