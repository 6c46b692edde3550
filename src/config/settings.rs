//! Application settings and configuration structures.

use chrono_tz::Tz;
use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;

use crate::domain::DEFAULT_MAX_MEMBER;

/// Root configuration structure containing all application settings.
#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    /// Server configuration (host, port)
    pub server: ServerSettings,

    /// Database configuration (PostgreSQL)
    pub database: DatabaseSettings,

    /// Redis configuration (identity cache)
    pub redis: RedisSettings,

    /// Identity service client configuration
    pub identity: IdentitySettings,

    /// Chat rendering configuration
    pub chat: ChatSettings,

    /// Group defaults
    pub groups: GroupSettings,

    /// CORS configuration
    pub cors: CorsSettings,

    /// Log output configuration
    pub log: LogSettings,

    /// Current environment (development, staging, production)
    pub environment: String,
}

/// Server binding configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    /// Host address to bind to (e.g., "0.0.0.0")
    pub host: String,

    /// Port number to listen on
    pub port: u16,
}

/// PostgreSQL database configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct DatabaseSettings {
    /// Database connection URL
    pub url: String,

    /// Maximum number of connections in the pool
    pub max_connections: u32,

    /// Minimum number of connections to maintain
    pub min_connections: u32,

    /// Connection acquire timeout in seconds
    pub acquire_timeout: u64,

    /// Apply pending migrations on startup
    pub run_migrations: bool,
}

/// Redis configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct RedisSettings {
    /// Redis connection URL
    pub url: String,
}

/// Identity (display name / avatar) service configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct IdentitySettings {
    /// Base URL of the identity service
    pub base_url: String,

    /// Deadline for one batch lookup; on expiry results are returned unenriched
    pub timeout_ms: u64,

    /// How long resolved identities stay in the Redis cache
    pub cache_ttl_secs: u64,
}

/// Chat rendering configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatSettings {
    /// IANA zone name used for chat message timestamps
    pub timezone: String,
}

/// Group defaults.
#[derive(Debug, Clone, Deserialize)]
pub struct GroupSettings {
    /// Capacity applied when a group is created without an explicit limit
    pub default_max_member: i32,
}

/// CORS configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CorsSettings {
    /// Allowed origins (comma-separated in env)
    pub allowed_origins: Vec<String>,
}

/// Log output configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// "pretty" or "json"
    pub format: String,
}

impl Settings {
    /// Load settings from environment variables and configuration files.
    ///
    /// The loading order is:
    /// 1. config/default.toml (base configuration)
    /// 2. config/{RUN_ENV}.toml (environment-specific overrides)
    /// 3. Environment variables (highest priority)
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if configuration cannot be loaded or parsed,
    /// or if a value fails validation.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        // Determine the running environment
        let environment = std::env::var("RUN_ENV").unwrap_or_else(|_| "development".into());

        Config::builder()
            // Start with default values
            .set_default("environment", environment.clone())?
            .set_default("server.host", "0.0.0.0")?
            .set_default("server.port", 3000)?
            .set_default("database.max_connections", 10)?
            .set_default("database.min_connections", 2)?
            .set_default("database.acquire_timeout", 30)?
            .set_default("database.run_migrations", true)?
            .set_default("redis.url", "redis://127.0.0.1:6379")?
            .set_default("identity.base_url", "http://127.0.0.1:50051")?
            .set_default("identity.timeout_ms", 2000)?
            .set_default("identity.cache_ttl_secs", 300)?
            .set_default("chat.timezone", "Asia/Ho_Chi_Minh")?
            .set_default("groups.default_max_member", DEFAULT_MAX_MEMBER)?
            .set_default("cors.allowed_origins", vec!["http://localhost:3000"])?
            .set_default("log.format", "pretty")?
            // Load from config files
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name(&format!("config/{}", environment)).required(false))
            // Load from environment variables
            // APP__SERVER__PORT=3000 -> server.port = 3000
            .add_source(
                Environment::default()
                    .prefix("APP")
                    .separator("__")
                    .try_parsing(true),
            )
            // Map simple environment variables
            .set_override_option("server.host", std::env::var("SERVER_HOST").ok())?
            .set_override_option("server.port", std::env::var("SERVER_PORT").ok())?
            .set_override_option("database.url", std::env::var("DATABASE_URL").ok())?
            .set_override_option("redis.url", std::env::var("REDIS_URL").ok())?
            .set_override_option("identity.base_url", std::env::var("IDENTITY_URL").ok())?
            .build()?
            .try_deserialize()
            .and_then(|settings: Self| settings.validate().map(|_| settings))
    }

    /// Check cross-field constraints that serde cannot express.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.chat.tz()?;

        if self.groups.default_max_member < 1 {
            return Err(ConfigError::Message(format!(
                "groups.default_max_member must be at least 1, got {}",
                self.groups.default_max_member
            )));
        }

        if self.identity.timeout_ms == 0 {
            return Err(ConfigError::Message(
                "identity.timeout_ms must be greater than zero".into(),
            ));
        }

        Ok(())
    }

    /// Get the full server address as a string.
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}

impl ChatSettings {
    /// Parse the configured zone.
    pub fn tz(&self) -> Result<Tz, ConfigError> {
        self.timezone.parse::<Tz>().map_err(|_| {
            ConfigError::Message(format!("chat.timezone '{}' is not a known zone", self.timezone))
        })
    }
}

impl IdentitySettings {
    /// Lookup deadline as a `Duration`.
    pub fn timeout(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.timeout_ms)
    }
}
