//! Presentation Layer
//!
//! RPC routes, health endpoints and HTTP middleware.

pub mod http;
pub mod middleware;
