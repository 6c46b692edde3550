//! Unit of Work
//!
//! Transactional boundary for multi-statement writes. Everything run through
//! [`execute_in_transaction`] commits together or not at all.

use futures::future::BoxFuture;
use sqlx::{PgPool, Postgres, Transaction};

use crate::shared::error::AppError;

/// Run `f` inside a transaction, committing on `Ok` and rolling back on `Err`.
///
/// # Example
/// ```ignore
/// let group = execute_in_transaction(&pool, move |tx| Box::pin(async move {
///     let group = insert_group(&mut **tx, &new_group).await?;
///     admit_locked(&mut **tx, group.id, group.max_member, &ids, role, mode).await?;
///     Ok(group)
/// })).await?;
/// ```
pub async fn execute_in_transaction<F, T>(pool: &PgPool, f: F) -> Result<T, AppError>
where
    F: for<'c> FnOnce(&'c mut Transaction<'static, Postgres>) -> BoxFuture<'c, Result<T, AppError>>,
    T: Send,
{
    let mut tx = pool.begin().await?;

    match f(&mut tx).await {
        Ok(value) => {
            tx.commit().await?;
            Ok(value)
        }
        Err(e) => {
            // An explicit rollback surfaces connection errors; dropping would hide them
            if let Err(rollback_err) = tx.rollback().await {
                tracing::warn!(error = %rollback_err, "Transaction rollback failed");
            }
            Err(e)
        }
    }
}
