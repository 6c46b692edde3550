//! Cache Service
//!
//! Generic cache trait and Redis implementation.
//!
//! Values are stored as JSON strings.
//!
//! # Example
//!
//! ```rust,ignore
//! use social_network::infrastructure::cache::{Cache, RedisCache};
//!
//! let cache = RedisCache::new(redis_connection);
//! cache.set_many_ex(&[("identity:42".to_string(), &identity)], 300).await?;
//! let cached: Vec<Option<UserIdentity>> = cache.get_many(&["identity:42"]).await?;
//! ```

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use serde::{de::DeserializeOwned, Serialize};
use tracing::{debug, instrument, warn};

use crate::shared::error::AppError;

/// Generic cache trait for abstracting cache operations.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Stores several values, each expiring after `seconds`, in one round trip.
    async fn set_many_ex<T: Serialize + Sync + Send>(
        &self,
        entries: &[(String, T)],
        seconds: u64,
    ) -> Result<(), AppError>;

    /// Retrieves several keys at once, preserving key order.
    async fn get_many<T: DeserializeOwned + Send>(
        &self,
        keys: &[&str],
    ) -> Result<Vec<Option<T>>, AppError>;
}

/// Redis-backed cache implementation.
///
/// Uses a Redis ConnectionManager for connection reuse and automatic
/// reconnection.
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
}

impl RedisCache {
    pub fn new(conn: ConnectionManager) -> Self {
        Self { conn }
    }

    fn serialize<T: Serialize>(value: &T) -> Result<String, AppError> {
        serde_json::to_string(value).map_err(|e| {
            warn!("Cache serialization error: {}", e);
            AppError::Internal(format!("Cache serialization failed: {}", e))
        })
    }

    fn deserialize<T: DeserializeOwned>(data: &str) -> Result<T, AppError> {
        serde_json::from_str(data).map_err(|e| {
            warn!("Cache deserialization error: {}", e);
            AppError::Internal(format!("Cache deserialization failed: {}", e))
        })
    }
}

#[async_trait]
impl Cache for RedisCache {
    #[instrument(skip(self, entries), fields(count = entries.len()), level = "debug")]
    async fn set_many_ex<T: Serialize + Sync + Send>(
        &self,
        entries: &[(String, T)],
        seconds: u64,
    ) -> Result<(), AppError> {
        if entries.is_empty() {
            return Ok(());
        }

        let mut pipe = redis::pipe();
        for (key, value) in entries {
            pipe.set_ex(key, Self::serialize(value)?, seconds).ignore();
        }

        let mut conn = self.conn.clone();
        let _: () = pipe.query_async(&mut conn).await?;
        debug!(count = entries.len(), ttl = seconds, "Cache set many with expiry");

        Ok(())
    }

    #[instrument(skip(self), level = "debug")]
    async fn get_many<T: DeserializeOwned + Send>(
        &self,
        keys: &[&str],
    ) -> Result<Vec<Option<T>>, AppError> {
        if keys.is_empty() {
            return Ok(Vec::new());
        }

        let mut conn = self.conn.clone();

        // MGET always replies with an array, even for a single key
        let results: Vec<Option<String>> = redis::cmd("MGET")
            .arg(keys)
            .query_async(&mut conn)
            .await?;

        let mut values = Vec::with_capacity(results.len());
        for result in results {
            match result {
                Some(data) => values.push(Some(Self::deserialize(&data)?)),
                None => values.push(None),
            }
        }

        let hits = values.iter().filter(|v| v.is_some()).count();
        debug!(requested = keys.len(), hits, "Cache get many");
        Ok(values)
    }
}
