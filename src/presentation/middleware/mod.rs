//! Middleware
//!
//! Tower middleware for request processing.

pub mod cors;
pub mod logging;
pub mod metrics;

pub use cors::create_cors_layer;
pub use logging::create_trace_layer;
pub use metrics::track_rpc_metrics;
