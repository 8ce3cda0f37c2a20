//! Prometheus metrics for core components.
//!
//! This module provides metrics for:
//! - Metadata lookups (outcomes, latency, in-flight count)
//! - Fan-out batches (size, duration)

use once_cell::sync::Lazy;
use prometheus::{HistogramOpts, HistogramVec, IntCounterVec, IntGauge, Opts};

// =============================================================================
// Lookup Metrics
// =============================================================================

/// Lookups total by result ("ok" or a failure kind).
pub static LOOKUPS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new("cinefetch_lookups_total", "Total metadata lookups"),
        &["result"], // "ok", "transport", "not_found", "malformed", "rejected", "task_failed"
    )
    .unwrap()
});

/// Lookup duration in seconds.
pub static LOOKUP_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "cinefetch_lookup_duration_seconds",
            "Duration of a single metadata lookup",
        )
        .buckets(vec![0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0]),
        &["result"],
    )
    .unwrap()
});

/// Lookups currently holding a permit.
pub static LOOKUPS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "cinefetch_lookups_in_flight",
        "Number of metadata lookups currently executing",
    )
    .unwrap()
});

// =============================================================================
// Batch Metrics
// =============================================================================

/// Titles per fan-out batch.
pub static BATCH_SIZE: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new("cinefetch_batch_size", "Titles per fan-out batch")
            .buckets(vec![0.0, 1.0, 5.0, 10.0, 25.0, 50.0, 100.0, 250.0]),
        &[],
    )
    .unwrap()
});

/// Fan-out batch duration in seconds.
pub static BATCH_DURATION: Lazy<HistogramVec> = Lazy::new(|| {
    HistogramVec::new(
        HistogramOpts::new(
            "cinefetch_batch_duration_seconds",
            "Duration of a fan-out batch from first dispatch to join",
        )
        .buckets(vec![0.1, 0.25, 0.5, 1.0, 2.5, 5.0, 10.0, 30.0, 60.0]),
        &[],
    )
    .unwrap()
});

/// All core metrics, for registration in the server's registry.
pub fn all_metrics() -> Vec<Box<dyn prometheus::core::Collector>> {
    vec![
        Box::new(LOOKUPS_TOTAL.clone()),
        Box::new(LOOKUP_DURATION.clone()),
        Box::new(LOOKUPS_IN_FLIGHT.clone()),
        Box::new(BATCH_SIZE.clone()),
        Box::new(BATCH_DURATION.clone()),
    ]
}
