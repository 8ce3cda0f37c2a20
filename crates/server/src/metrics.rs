//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the server:
//! - HTTP request metrics (latency, counts, in flight)
//! - Movie list requests (title source failures, records served)
//! - Core lookup and batch metrics, registered from `cinefetch_core`

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge, Opts,
    Registry, TextEncoder,
};
use tracing::warn;

/// Global metrics registry.
pub static REGISTRY: Lazy<Registry> = Lazy::new(|| {
    let registry = Registry::new();
    register_metrics(&registry);
    registry
});

// =============================================================================
// HTTP Request Metrics
// =============================================================================

/// HTTP request duration in seconds.
pub static HTTP_REQUEST_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "cinefetch_http_request_duration_seconds",
            "HTTP request duration in seconds",
        )
        .buckets(vec![
            0.001, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0,
        ]),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests total count.
pub static HTTP_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("cinefetch_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "cinefetch_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Movie List Metrics
// =============================================================================

/// Title list load failures (each one is a 500 response).
pub static TITLE_LOAD_FAILURES_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "cinefetch_title_load_failures_total",
        "Total failures to load the title list",
    )
    .unwrap()
});

/// Records returned by the movie list endpoint.
pub static MOVIES_SERVED_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "cinefetch_movies_served_total",
        "Total movie records returned to clients",
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    let server_metrics: Vec<Box<dyn prometheus::core::Collector>> = vec![
        // HTTP
        Box::new(HTTP_REQUEST_DURATION.clone()),
        Box::new(HTTP_REQUESTS_TOTAL.clone()),
        Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()),
        // Movie list
        Box::new(TITLE_LOAD_FAILURES_TOTAL.clone()),
        Box::new(MOVIES_SERVED_TOTAL.clone()),
    ];

    // Core metrics (lookups, batches)
    for metric in server_metrics
        .into_iter()
        .chain(cinefetch_core::metrics::all_metrics())
    {
        if let Err(e) = registry.register(metric) {
            warn!("Failed to register metric: {}", e);
        }
    }
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    if let Err(e) = encoder.encode(&metric_families, &mut buffer) {
        warn!("Failed to encode metrics: {}", e);
    }
    String::from_utf8(buffer).unwrap_or_default()
}

/// Normalize a path for metric labels.
///
/// API routes keep their path; everything else is a static file and is
/// collapsed into one label to bound cardinality.
pub fn normalize_path(path: &str) -> String {
    match path {
        "/api" | "/api/" => "/api/",
        "/api/movies" => "/api/movies",
        "/api/config" => "/api/config",
        "/metrics" => "/metrics",
        p if p.starts_with("/api/") => "/api/{unknown}",
        _ => "{static}",
    }
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_path_api_routes() {
        assert_eq!(normalize_path("/api"), "/api/");
        assert_eq!(normalize_path("/api/"), "/api/");
        assert_eq!(normalize_path("/api/movies"), "/api/movies");
        assert_eq!(normalize_path("/metrics"), "/metrics");
    }

    #[test]
    fn test_normalize_path_unknown_api_route() {
        assert_eq!(normalize_path("/api/nope/123"), "/api/{unknown}");
    }

    #[test]
    fn test_normalize_path_static_files() {
        assert_eq!(normalize_path("/"), "{static}");
        assert_eq!(normalize_path("/js/app.3f9a.js"), "{static}");
    }

    #[test]
    fn test_encode_metrics_returns_prometheus_format() {
        HTTP_REQUESTS_TOTAL
            .with_label_values(&["GET", "/test", "200"])
            .inc();

        let output = encode_metrics();
        assert!(output.contains("cinefetch_http_requests_total"));
        assert!(output.contains("# HELP"));
        assert!(output.contains("# TYPE"));
    }

    #[test]
    fn test_registry_contains_core_metrics() {
        // Prometheus only outputs vec metrics that have been accessed
        cinefetch_core::metrics::LOOKUPS_TOTAL
            .with_label_values(&["ok"])
            .inc();
        cinefetch_core::metrics::LOOKUPS_IN_FLIGHT.set(0);
        TITLE_LOAD_FAILURES_TOTAL.inc_by(0);

        let output = encode_metrics();
        assert!(output.contains("cinefetch_lookups_total"));
        assert!(output.contains("cinefetch_lookups_in_flight"));
        assert!(output.contains("cinefetch_title_load_failures_total"));
    }
}
