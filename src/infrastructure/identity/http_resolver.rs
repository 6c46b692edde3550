//! HTTP identity resolver.
//!
//! Wire contract of the account service:
//!
//! ```text
//! POST {base_url}/identities/batch
//! { "userIds": [1, 2] }
//!
//! 200 { "realnameAvatarInfo": [{ "userId": 1, "realname": "...", "avatarUrl": "..." }] }
//! ```

use std::collections::HashMap;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use crate::config::IdentitySettings;
use crate::domain::services::{IdentityResolver, UserIdentity};
use crate::shared::error::AppError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct BatchRequest<'a> {
    user_ids: &'a [i64],
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct BatchResponse {
    #[serde(default)]
    realname_avatar_info: Vec<IdentityEntry>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct IdentityEntry {
    user_id: i64,
    #[serde(default)]
    realname: String,
    #[serde(default)]
    avatar_url: String,
}

impl BatchResponse {
    fn into_map(self) -> HashMap<i64, UserIdentity> {
        self.realname_avatar_info
            .into_iter()
            .map(|entry| {
                (
                    entry.user_id,
                    UserIdentity {
                        realname: entry.realname,
                        avatar_url: entry.avatar_url,
                    },
                )
            })
            .collect()
    }
}

/// Identity resolver backed by the account service's batch endpoint.
///
/// The overall deadline is applied by the caller; this client only bounds
/// connection setup.
#[derive(Clone)]
pub struct HttpIdentityResolver {
    client: reqwest::Client,
    endpoint: String,
}

impl HttpIdentityResolver {
    pub fn new(settings: &IdentitySettings) -> Result<Self, AppError> {
        let client = reqwest::Client::builder()
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build identity client: {}", e)))?;

        Ok(Self {
            client,
            endpoint: format!("{}/identities/batch", settings.base_url.trim_end_matches('/')),
        })
    }
}

#[async_trait]
impl IdentityResolver for HttpIdentityResolver {
    #[instrument(skip(self, user_ids), fields(count = user_ids.len()))]
    async fn resolve(&self, user_ids: &[i64]) -> Result<HashMap<i64, UserIdentity>, AppError> {
        let response = self
            .client
            .post(&self.endpoint)
            .json(&BatchRequest { user_ids })
            .send()
            .await
            .map_err(|e| AppError::Identity(format!("request failed: {}", e)))?
            .error_for_status()
            .map_err(|e| AppError::Identity(format!("unexpected status: {}", e)))?;

        let body: BatchResponse = response
            .json()
            .await
            .map_err(|e| AppError::Identity(format!("malformed response: {}", e)))?;

        let identities = body.into_map();
        debug!(resolved = identities.len(), "Identities resolved");
        Ok(identities)
    }
}
