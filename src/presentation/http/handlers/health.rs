//! Health Check Handlers
//!
//! Provides health check endpoints for Kubernetes-style liveness and readiness probes.
//!
//! # Endpoints
//! - `GET /health` - Basic health check
//! - `GET /health/live` - Liveness probe (is the server running?)
//! - `GET /health/ready` - Readiness probe (are the database and Redis reachable?)

use std::collections::BTreeMap;
use std::time::Instant;

use async_trait::async_trait;
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use chrono::{DateTime, Utc};
use once_cell::sync::Lazy;
use redis::aio::ConnectionManager;
use serde::Serialize;
use sqlx::PgPool;

use crate::startup::AppState;

/// Server start time for uptime calculation
static SERVER_START: Lazy<Instant> = Lazy::new(Instant::now);
static SERVER_START_TIME: Lazy<DateTime<Utc>> = Lazy::new(Utc::now);

/// Initialize the server start time (call during startup)
pub fn init_server_start() {
    Lazy::force(&SERVER_START);
    Lazy::force(&SERVER_START_TIME);
}

/// A dependency probed by the readiness endpoint.
#[async_trait]
pub trait ReadinessCheck: Send + Sync {
    /// Key in the `checks` map of the response
    fn name(&self) -> &'static str;

    /// Whether failure makes the whole service unhealthy rather than degraded
    fn critical(&self) -> bool;

    async fn check(&self) -> ServiceHealth;
}

/// Basic health response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
}

/// Detailed health check response
#[derive(Debug, Serialize)]
pub struct DetailedHealthResponse {
    pub status: HealthStatus,
    pub version: &'static str,
    pub uptime_seconds: u64,
    pub started_at: String,
    pub checks: BTreeMap<&'static str, ServiceHealth>,
}

/// Health status for individual services
#[derive(Debug, Serialize)]
pub struct ServiceHealth {
    pub status: HealthStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latency_ms: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ServiceHealth {
    fn from_latency(latency_ms: u64, degraded_above_ms: u64) -> Self {
        Self {
            status: if latency_ms < degraded_above_ms {
                HealthStatus::Healthy
            } else {
                HealthStatus::Degraded
            },
            latency_ms: Some(latency_ms),
            message: None,
        }
    }

    fn failed(message: String) -> Self {
        Self {
            status: HealthStatus::Unhealthy,
            latency_ms: None,
            message: Some(message),
        }
    }
}

/// Overall health status
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Healthy,
    Degraded,
    Unhealthy,
}

/// Simple liveness response
#[derive(Debug, Serialize)]
pub struct LivenessResponse {
    pub status: &'static str,
}

/// PostgreSQL reachability
pub struct PostgresCheck(pub PgPool);

#[async_trait]
impl ReadinessCheck for PostgresCheck {
    fn name(&self) -> &'static str {
        "database"
    }

    fn critical(&self) -> bool {
        true
    }

    async fn check(&self) -> ServiceHealth {
        let start = Instant::now();
        match sqlx::query("SELECT 1").execute(&self.0).await {
            Ok(_) => ServiceHealth::from_latency(start.elapsed().as_millis() as u64, 100),
            Err(e) => ServiceHealth::failed(format!("Database connection failed: {}", e)),
        }
    }
}

/// Redis reachability; only the identity cache depends on it
pub struct RedisCheck(pub ConnectionManager);

#[async_trait]
impl ReadinessCheck for RedisCheck {
    fn name(&self) -> &'static str {
        "redis"
    }

    fn critical(&self) -> bool {
        false
    }

    async fn check(&self) -> ServiceHealth {
        let start = Instant::now();
        let mut conn = self.0.clone();
        match redis::cmd("PING").query_async::<String>(&mut conn).await {
            Ok(_) => ServiceHealth::from_latency(start.elapsed().as_millis() as u64, 50),
            Err(e) => ServiceHealth::failed(format!("Redis connection failed: {}", e)),
        }
    }
}

/// Basic health check endpoint
pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Liveness probe - checks if the server is running
pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse { status: "alive" })
}

/// Readiness probe - returns 503 if a critical dependency is unavailable
pub async fn readiness(State(state): State<AppState>) -> impl IntoResponse {
    let mut checks = BTreeMap::new();
    let mut results = Vec::with_capacity(state.readiness.len());

    for probe in state.readiness.iter() {
        let health = probe.check().await;
        results.push((probe.critical(), health.status));
        checks.insert(probe.name(), health);
    }

    let overall_status = determine_overall_status(&results);

    let response = DetailedHealthResponse {
        status: overall_status,
        version: env!("CARGO_PKG_VERSION"),
        uptime_seconds: SERVER_START.elapsed().as_secs(),
        started_at: SERVER_START_TIME.to_rfc3339(),
        checks,
    };

    let status_code = match overall_status {
        HealthStatus::Healthy | HealthStatus::Degraded => StatusCode::OK,
        HealthStatus::Unhealthy => StatusCode::SERVICE_UNAVAILABLE,
    };

    (status_code, Json(response))
}

/// Critical failures make the service unhealthy; anything else short of
/// healthy only degrades it.
fn determine_overall_status(results: &[(bool, HealthStatus)]) -> HealthStatus {
    if results
        .iter()
        .any(|(critical, status)| *critical && *status == HealthStatus::Unhealthy)
    {
        return HealthStatus::Unhealthy;
    }

    if results.iter().any(|(_, status)| *status != HealthStatus::Healthy) {
        return HealthStatus::Degraded;
    }

    HealthStatus::Healthy
}
