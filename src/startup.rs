//! Application Startup
//!
//! Application building and server initialization.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tokio::net::TcpListener;
use tower_http::compression::CompressionLayer;

use crate::application::services::{
    ChatService, ChatServiceImpl, CommentService, CommentServiceImpl, GroupService,
    GroupServiceImpl, IdentityEnricher, RelationshipService, RelationshipServiceImpl,
};
use crate::config::Settings;
use crate::infrastructure::cache::{self, RedisCache};
use crate::infrastructure::database;
use crate::infrastructure::identity::{CachingIdentityResolver, HttpIdentityResolver};
use crate::infrastructure::repositories::{
    PgCommentLikeRepository, PgCommentRepository, PgGroupRepository, PgMembershipRepository,
    PgMessageRepository, PgRelationRepository,
};
use crate::presentation::http::handlers::health::{
    init_server_start, PostgresCheck, ReadinessCheck, RedisCheck,
};
use crate::presentation::http::routes;
use crate::presentation::middleware::{cors, logging};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub relationships: Arc<dyn RelationshipService>,
    pub groups: Arc<dyn GroupService>,
    pub chat: Arc<dyn ChatService>,
    pub comments: Arc<dyn CommentService>,
    /// Dependencies probed by `/health/ready`
    pub readiness: Arc<[Arc<dyn ReadinessCheck>]>,
}

impl AppState {
    pub fn new(
        relationships: Arc<dyn RelationshipService>,
        groups: Arc<dyn GroupService>,
        chat: Arc<dyn ChatService>,
        comments: Arc<dyn CommentService>,
    ) -> Self {
        Self {
            relationships,
            groups,
            chat,
            comments,
            readiness: Arc::from(Vec::new()),
        }
    }

    /// Replace the readiness probes
    pub fn with_readiness(mut self, checks: Vec<Arc<dyn ReadinessCheck>>) -> Self {
        self.readiness = Arc::from(checks);
        self
    }
}

/// Application instance
pub struct Application {
    listener: TcpListener,
    router: Router,
}

impl Application {
    /// Build the application from settings
    pub async fn build(settings: Settings) -> Result<Self> {
        init_server_start();

        // Create database pool
        let db = database::create_pool(&settings.database)
            .await
            .context("failed to connect to PostgreSQL")?;
        tracing::info!("Database connection pool created");

        if settings.database.run_migrations {
            database::run_migrations(&db)
                .await
                .context("failed to run migrations")?;
            tracing::info!("Database migrations applied");
        }

        // Create Redis client
        let redis = cache::create_redis_client(&settings.redis)
            .await
            .context("failed to connect to Redis")?;

        // Identity lookups: HTTP client behind a Redis read-through cache
        let resolver = CachingIdentityResolver::new(
            HttpIdentityResolver::new(&settings.identity)?,
            RedisCache::new(redis.clone()),
            settings.identity.cache_ttl_secs,
        );
        let enricher = IdentityEnricher::new(Arc::new(resolver), settings.identity.timeout());

        let timezone = settings.chat.tz()?;

        // Wire services
        let relationships: Arc<dyn RelationshipService> = Arc::new(RelationshipServiceImpl::new(
            Arc::new(PgRelationRepository::new(db.clone())),
            enricher.clone(),
        ));
        let groups: Arc<dyn GroupService> = Arc::new(GroupServiceImpl::new(
            Arc::new(PgGroupRepository::new(db.clone())),
            Arc::new(PgMembershipRepository::new(db.clone())),
            settings.groups.default_max_member,
        ));
        let chat: Arc<dyn ChatService> = Arc::new(ChatServiceImpl::new(
            Arc::new(PgMessageRepository::new(db.clone())),
            groups.clone(),
            enricher.clone(),
            timezone,
        ));
        let comments: Arc<dyn CommentService> = Arc::new(CommentServiceImpl::new(
            Arc::new(PgCommentRepository::new(db.clone())),
            Arc::new(PgCommentLikeRepository::new(db.clone())),
            enricher,
        ));

        let state = AppState::new(relationships, groups, chat, comments).with_readiness(vec![
            Arc::new(PostgresCheck(db)),
            Arc::new(RedisCheck(redis)),
        ]);

        // Build router with middleware
        let router = routes::create_router(state)
            .layer(CompressionLayer::new())
            .layer(logging::create_trace_layer())
            .layer(cors::create_cors_layer(&settings.cors));

        // Bind to address
        let addr = settings.server_addr();
        let listener = TcpListener::bind(&addr)
            .await
            .with_context(|| format!("failed to bind {}", addr))?;
        tracing::info!("Listening on {}", addr);

        Ok(Self { listener, router })
    }

    /// Run the server until stopped
    pub async fn run_until_stopped(self) -> Result<()> {
        axum::serve(self.listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;
        Ok(())
    }

    /// Get the bound address
    pub fn local_addr(&self) -> std::io::Result<SocketAddr> {
        self.listener.local_addr()
    }
}

/// Resolves on Ctrl-C; never resolves if the handler cannot be installed
async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
