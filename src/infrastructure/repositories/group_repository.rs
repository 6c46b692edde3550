//! Group Repository Implementation
//!
//! PostgreSQL implementation of the GroupRepository trait.
//! Group creation and its initial roster are written in one transaction.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::services::AdmissionMode;
use crate::domain::{Group, GroupRepository, MemberRole, Membership, NewGroup};
use crate::infrastructure::database::execute_in_transaction;
use crate::shared::error::AppError;

use super::membership_repository::admit_locked;

/// Database row representation of the chat_groups table.
#[derive(Debug, sqlx::FromRow)]
struct GroupRow {
    id: i64,
    name: String,
    avatar_url: Option<String>,
    description: String,
    owner_id: i64,
    max_member: i32,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

impl GroupRow {
    fn into_group(self) -> Group {
        Group {
            id: self.id,
            name: self.name,
            avatar_url: self.avatar_url,
            description: self.description,
            owner_id: self.owner_id,
            max_member: self.max_member,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// PostgreSQL group repository implementation.
#[derive(Clone)]
pub struct PgGroupRepository {
    pool: PgPool,
}

impl PgGroupRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl GroupRepository for PgGroupRepository {
    async fn find_by_ids(&self, ids: &[i64]) -> Result<Vec<Group>, AppError> {
        if ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, GroupRow>(
            r#"
            SELECT id, name, avatar_url, description, owner_id, max_member, created_at, updated_at
            FROM chat_groups
            WHERE id = ANY($1)
            ORDER BY created_at ASC, id ASC
            "#,
        )
        .bind(ids)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(GroupRow::into_group).collect())
    }

    async fn create_with_roster(
        &self,
        group: &NewGroup,
        initial_user_ids: &[i64],
    ) -> Result<(Group, Vec<Membership>), AppError> {
        let group = group.clone();
        let initial_user_ids = initial_user_ids.to_vec();

        execute_in_transaction(&self.pool, move |tx| {
            Box::pin(async move {
                let created = sqlx::query_as::<_, GroupRow>(
                    r#"
                    INSERT INTO chat_groups (name, avatar_url, description, owner_id, max_member)
                    VALUES ($1, $2, $3, $4, $5)
                    RETURNING id, name, avatar_url, description, owner_id, max_member,
                              created_at, updated_at
                    "#,
                )
                .bind(&group.name)
                .bind(&group.avatar_url)
                .bind(&group.description)
                .bind(group.owner_id)
                .bind(group.max_member)
                .fetch_one(&mut **tx)
                .await?
                .into_group();

                // The new row is invisible to other transactions until commit
                let mut members = admit_locked(
                    &mut **tx,
                    created.id,
                    created.max_member,
                    &[created.owner_id],
                    MemberRole::Owner,
                    AdmissionMode::Single,
                )
                .await?;

                if !initial_user_ids.is_empty() {
                    let admitted = admit_locked(
                        &mut **tx,
                        created.id,
                        created.max_member,
                        &initial_user_ids,
                        MemberRole::Member,
                        AdmissionMode::Bulk,
                    )
                    .await?;
                    members.extend(admitted);
                }

                Ok::<_, AppError>((created, members))
            })
        })
        .await
    }
}
