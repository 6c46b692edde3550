//! Identity resolution contract.
//!
//! Display name and avatar live in the account service; this core only ever
//! asks for them in batches.

use std::collections::HashMap;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::shared::error::AppError;

/// Public identity of a user.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    pub realname: String,
    pub avatar_url: String,
}

static UNKNOWN_IDENTITY: UserIdentity = UserIdentity {
    realname: String::new(),
    avatar_url: String::new(),
};

/// Batch lookup of user identities.
#[async_trait]
pub trait IdentityResolver: Send + Sync {
    /// Resolve identities for `user_ids`. Ids the service does not know may be
    /// absent from the result.
    async fn resolve(&self, user_ids: &[i64]) -> Result<HashMap<i64, UserIdentity>, AppError>;
}

/// Resolved identities with empty fallbacks for unknown users.
#[derive(Debug, Clone, Default)]
pub struct IdentityDirectory {
    entries: HashMap<i64, UserIdentity>,
}

impl IdentityDirectory {
    pub fn new(entries: HashMap<i64, UserIdentity>) -> Self {
        Self { entries }
    }

    /// Identity of `user_id`, or empty strings when unknown.
    pub fn get(&self, user_id: i64) -> &UserIdentity {
        self.entries.get(&user_id).unwrap_or(&UNKNOWN_IDENTITY)
    }
}
