//! Infrastructure Layer
//!
//! Contains implementations for external services including:
//! - Database repositories (PostgreSQL)
//! - Cache implementations (Redis)
//! - Identity service clients (HTTP)
//! - Prometheus metrics

pub mod cache;
pub mod database;
pub mod identity;
pub mod metrics;
pub mod repositories;
