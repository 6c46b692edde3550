//! Cache Module
//!
//! Redis connection management and caching utilities.
//!
//! - Redis connection management with automatic reconnection
//! - A generic `Cache` trait and its `RedisCache` implementation
//! - Key helpers for consistent key naming

mod cache_service;

pub use cache_service::{Cache, RedisCache};

use redis::aio::ConnectionManager;
use redis::Client;
use tracing::{info, instrument};

use crate::config::RedisSettings;

/// Creates a Redis connection manager with automatic reconnection.
#[instrument(skip(settings), fields(url = %settings.url))]
pub async fn create_redis_client(
    settings: &RedisSettings,
) -> Result<ConnectionManager, redis::RedisError> {
    info!("Connecting to Redis...");
    let client = Client::open(settings.url.as_str())?;
    let manager = ConnectionManager::new(client).await?;
    info!("Redis connection established");
    Ok(manager)
}

/// Cache key prefixes.
pub mod keys {
    /// Prefix for resolved user identities (e.g., "identity:user_id")
    pub const IDENTITY: &str = "identity:";

    /// Generates an identity cache key
    #[inline]
    pub fn identity(user_id: impl std::fmt::Display) -> String {
        format!("{}{}", IDENTITY, user_id)
    }
}
