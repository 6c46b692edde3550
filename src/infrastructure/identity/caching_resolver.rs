//! Read-through identity cache.

use std::collections::HashMap;

use async_trait::async_trait;
use tracing::{debug, instrument, warn};

use crate::domain::services::{IdentityResolver, UserIdentity};
use crate::infrastructure::cache::{keys, Cache};
use crate::shared::error::AppError;

/// Serves identities from the cache and asks `inner` only for misses.
///
/// Cache failures are treated as misses; they never fail a lookup.
pub struct CachingIdentityResolver<R, C> {
    inner: R,
    cache: C,
    ttl_secs: u64,
}

impl<R, C> CachingIdentityResolver<R, C>
where
    R: IdentityResolver,
    C: Cache,
{
    pub fn new(inner: R, cache: C, ttl_secs: u64) -> Self {
        Self { inner, cache, ttl_secs }
    }

    async fn cached(&self, user_ids: &[i64]) -> HashMap<i64, UserIdentity> {
        let cache_keys: Vec<String> = user_ids.iter().map(|id| keys::identity(id)).collect();
        let key_refs: Vec<&str> = cache_keys.iter().map(String::as_str).collect();

        match self.cache.get_many::<UserIdentity>(&key_refs).await {
            Ok(values) => user_ids
                .iter()
                .zip(values)
                .filter_map(|(id, value)| value.map(|identity| (*id, identity)))
                .collect(),
            Err(e) => {
                warn!(error = %e, "Identity cache read failed, treating as miss");
                HashMap::new()
            }
        }
    }
}

#[async_trait]
impl<R, C> IdentityResolver for CachingIdentityResolver<R, C>
where
    R: IdentityResolver,
    C: Cache,
{
    #[instrument(skip(self, user_ids), fields(count = user_ids.len()))]
    async fn resolve(&self, user_ids: &[i64]) -> Result<HashMap<i64, UserIdentity>, AppError> {
        let mut resolved = self.cached(user_ids).await;

        let misses: Vec<i64> = user_ids
            .iter()
            .copied()
            .filter(|id| !resolved.contains_key(id))
            .collect();

        debug!(hits = resolved.len(), misses = misses.len(), "Identity cache lookup");

        if misses.is_empty() {
            return Ok(resolved);
        }

        let fetched = self.inner.resolve(&misses).await?;

        let entries: Vec<(String, &UserIdentity)> = fetched
            .iter()
            .map(|(user_id, identity)| (keys::identity(user_id), identity))
            .collect();
        if let Err(e) = self.cache.set_many_ex(&entries, self.ttl_secs).await {
            warn!(count = entries.len(), error = %e, "Identity cache write failed");
        }

        resolved.extend(fetched);
        Ok(resolved)
    }
}
