//! Prometheus Metrics Module
//!
//! Provides application-wide metrics collection using Prometheus.
//!
//! # Metrics Collected
//! - RPC call counts by method and result code
//! - RPC latency histograms by method
//! - Identity lookups that degraded to empty enrichment

use once_cell::sync::Lazy;
use prometheus::{
    Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry, TextEncoder,
};

/// Global metrics registry
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

/// RPC call counter by method and canonical result code ("OK", "NOT_FOUND", ...)
pub static RPC_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("rpc_requests_total", "Total number of RPC calls").namespace("social_network"),
        &["method", "code"],
    )
    .expect("Failed to create RPC_REQUESTS_TOTAL metric")
});

/// RPC latency histogram in seconds
pub static RPC_REQUEST_DURATION_SECONDS: Lazy<HistogramVec> = Lazy::new(|| {
    let buckets = vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0];
    HistogramVec::new(
        HistogramOpts::new("rpc_request_duration_seconds", "RPC latency in seconds")
            .namespace("social_network")
            .buckets(buckets),
        &["method"],
    )
    .expect("Failed to create RPC_REQUEST_DURATION_SECONDS metric")
});

/// Identity lookups that timed out and were served unenriched
pub static IDENTITY_RESOLVE_DEGRADED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::with_opts(
        Opts::new(
            "identity_resolve_degraded_total",
            "Identity lookups that timed out and returned empty names",
        )
        .namespace("social_network"),
    )
    .expect("Failed to create IDENTITY_RESOLVE_DEGRADED_TOTAL metric")
});

fn register_metrics(registry: &Registry) {
    registry
        .register(Box::new(RPC_REQUESTS_TOTAL.clone()))
        .expect("Failed to register RPC_REQUESTS_TOTAL");
    registry
        .register(Box::new(RPC_REQUEST_DURATION_SECONDS.clone()))
        .expect("Failed to register RPC_REQUEST_DURATION_SECONDS");
    registry
        .register(Box::new(IDENTITY_RESOLVE_DEGRADED_TOTAL.clone()))
        .expect("Failed to register IDENTITY_RESOLVE_DEGRADED_TOTAL");
}

/// Collect and encode all metrics as Prometheus text format
pub fn gather_metrics() -> Result<String, prometheus::Error> {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer)?;
    String::from_utf8(buffer).map_err(|e| prometheus::Error::Msg(e.to_string()))
}

/// Record one finished RPC call
pub fn record_rpc(method: &str, code: &str, duration_secs: f64) {
    RPC_REQUESTS_TOTAL.with_label_values(&[method, code]).inc();
    RPC_REQUEST_DURATION_SECONDS
        .with_label_values(&[method])
        .observe(duration_secs);
}

/// Record an identity lookup that fell back to empty enrichment
pub fn record_identity_degraded() {
    IDENTITY_RESOLVE_DEGRADED_TOTAL.inc();
}
