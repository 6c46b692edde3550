//! Identity enrichment shared by the engines.
//!
//! Every engine that shows names or avatars goes through
//! [`IdentityEnricher::lookup`], which deduplicates ids, skips empty batches
//! and bounds the collaborator call with a deadline.

use std::collections::BTreeSet;
use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, warn};

use crate::domain::services::{IdentityDirectory, IdentityResolver};
use crate::infrastructure::metrics;
use crate::shared::error::AppError;

/// Batched, deadline-bounded access to the identity resolver.
#[derive(Clone)]
pub struct IdentityEnricher {
    resolver: Arc<dyn IdentityResolver>,
    timeout: Duration,
}

impl IdentityEnricher {
    pub fn new(resolver: Arc<dyn IdentityResolver>, timeout: Duration) -> Self {
        Self { resolver, timeout }
    }

    /// Resolve identities for `user_ids`.
    ///
    /// A timeout yields an empty directory (every name and avatar renders as
    /// an empty string). Any other resolver failure is returned as is.
    pub async fn lookup<I>(&self, user_ids: I) -> Result<IdentityDirectory, AppError>
    where
        I: IntoIterator<Item = i64>,
    {
        let distinct: BTreeSet<i64> = user_ids.into_iter().collect();
        if distinct.is_empty() {
            return Ok(IdentityDirectory::default());
        }

        let ids: Vec<i64> = distinct.into_iter().collect();

        match tokio::time::timeout(self.timeout, self.resolver.resolve(&ids)).await {
            Ok(Ok(identities)) => {
                debug!(requested = ids.len(), resolved = identities.len(), "Identities enriched");
                Ok(IdentityDirectory::new(identities))
            }
            Ok(Err(e)) => Err(e),
            Err(_) => {
                warn!(
                    requested = ids.len(),
                    timeout_ms = self.timeout.as_millis() as u64,
                    "Identity lookup timed out, returning results without names"
                );
                metrics::record_identity_degraded();
                Ok(IdentityDirectory::default())
            }
        }
    }
}
