//! Prometheus metrics registry and instruments.
//!
//! This module is framework-agnostic and can be used from any layer.

use lazy_static::lazy_static;
use prometheus::{HistogramOpts, HistogramVec, IntCounter, IntCounterVec, Opts, Registry};

lazy_static! {
    /// Global Prometheus registry
    pub static ref REGISTRY: Registry = Registry::new();

    // HTTP Metrics
    pub static ref HTTP_REQUESTS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("yatter_http_requests_total", "Total number of HTTP requests"),
        &["method", "endpoint", "status"]
    ).expect("metric can be created");
    pub static ref HTTP_REQUEST_DURATION_SECONDS: HistogramVec = HistogramVec::new(
        HistogramOpts::new(
            "yatter_http_request_duration_seconds",
            "HTTP request duration in seconds"
        ).buckets(vec![0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0]),
        &["method", "endpoint"]
    ).expect("metric can be created");

    // Application Metrics
    pub static ref ACCOUNTS_CREATED_TOTAL: IntCounter = IntCounter::new(
        "yatter_accounts_created_total",
        "Total number of accounts registered"
    ).expect("metric can be created");
    pub static ref STATUSES_CREATED_TOTAL: IntCounter = IntCounter::new(
        "yatter_statuses_created_total",
        "Total number of statuses posted"
    ).expect("metric can be created");
    pub static ref STATUSES_DELETED_TOTAL: IntCounter = IntCounter::new(
        "yatter_statuses_deleted_total",
        "Total number of statuses deleted"
    ).expect("metric can be created");

    // Error Metrics
    pub static ref ERRORS_TOTAL: IntCounterVec = IntCounterVec::new(
        Opts::new("yatter_errors_total", "Total number of errors"),
        &["error_type"]
    ).expect("metric can be created");
}

/// Initialize metrics registry.
///
/// Call once at startup; registering twice fails.
pub fn init_metrics() -> Result<(), prometheus::Error> {
    REGISTRY.register(Box::new(HTTP_REQUESTS_TOTAL.clone()))?;
    REGISTRY.register(Box::new(HTTP_REQUEST_DURATION_SECONDS.clone()))?;
    REGISTRY.register(Box::new(ACCOUNTS_CREATED_TOTAL.clone()))?;
    REGISTRY.register(Box::new(STATUSES_CREATED_TOTAL.clone()))?;
    REGISTRY.register(Box::new(STATUSES_DELETED_TOTAL.clone()))?;
    REGISTRY.register(Box::new(ERRORS_TOTAL.clone()))?;

    tracing::info!("Metrics registry initialized");
    Ok(())
}
