//! # Social Network Server
//!
//! Application entry point. Initializes:
//! - Configuration loading
//! - Tracing/logging subsystem
//! - Database connection pool and migrations
//! - Redis client and identity resolver
//! - HTTP server

use anyhow::Result;
use tracing::info;

use social_network::config::Settings;
use social_network::startup::Application;

#[tokio::main]
async fn main() -> Result<()> {
    // Configuration first: it selects the log format
    let settings = Settings::load()?;

    social_network::telemetry::init_tracing(&settings.log);

    info!(
        host = %settings.server.host,
        port = %settings.server.port,
        environment = %settings.environment,
        "Configuration loaded"
    );

    // Build and run the application
    let application = Application::build(settings).await?;

    info!("Server ready to accept connections");
    application.run_until_stopped().await?;

    info!("Server stopped");
    Ok(())
}
