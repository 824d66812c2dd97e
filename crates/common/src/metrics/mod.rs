//! Metrics and observability utilities
//!
//! Prometheus-style metrics for model calls, ingestion outcomes, and store
//! latency. Without an installed recorder every helper is a no-op.

use metrics::{counter, describe_counter, describe_histogram, histogram, Unit};

/// Metrics prefix for all Literature Explorer metrics
pub const METRICS_PREFIX: &str = "litexplorer";

/// Buckets for remote model latency (in seconds)
pub const MODEL_BUCKETS: &[f64] = &[
    0.100,  // 100ms
    0.250,  // 250ms
    0.500,  // 500ms
    1.000,  // 1s
    2.000,  // 2s
    5.000,  // 5s
    10.00,  // 10s
    30.00,  // 30s - request timeout
];

/// Buckets for store latency (in seconds)
pub const STORE_BUCKETS: &[f64] = &[
    0.001,
    0.005,
    0.010,
    0.025,
    0.050,
    0.100,
    0.250,
    1.000,
];

/// Register all metric descriptions
pub fn register_metrics() {
    describe_counter!(
        format!("{}_model_requests_total", METRICS_PREFIX),
        Unit::Count,
        "Total remote model requests"
    );

    describe_histogram!(
        format!("{}_model_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Remote model latency in seconds"
    );

    describe_counter!(
        format!("{}_model_errors_total", METRICS_PREFIX),
        Unit::Count,
        "Total remote model failures (transport, status, parse)"
    );

    describe_counter!(
        format!("{}_papers_ingested_total", METRICS_PREFIX),
        Unit::Count,
        "Total ingestion attempts by outcome"
    );

    describe_histogram!(
        format!("{}_store_duration_seconds", METRICS_PREFIX),
        Unit::Seconds,
        "Record store operation latency in seconds"
    );

    tracing::info!("Metrics registered");
}

/// Record one remote model call
pub fn record_model_call(operation: &str, model: &str, duration_secs: f64, success: bool) {
    let status = if success { "success" } else { "error" };

    counter!(
        format!("{}_model_requests_total", METRICS_PREFIX),
        "operation" => operation.to_string(),
        "model" => model.to_string(),
        "status" => status
    )
    .increment(1);

    histogram!(
        format!("{}_model_duration_seconds", METRICS_PREFIX),
        "operation" => operation.to_string()
    )
    .record(duration_secs);

    if !success {
        counter!(
            format!("{}_model_errors_total", METRICS_PREFIX),
            "operation" => operation.to_string()
        )
        .increment(1);
    }
}

/// Record an ingestion attempt.
///
/// `path` is `direct`, `pipeline`, or `fallback`.
pub fn record_ingestion(path: &str, success: bool) {
    counter!(
        format!("{}_papers_ingested_total", METRICS_PREFIX),
        "path" => path.to_string(),
        "status" => if success { "success" } else { "error" }
    )
    .increment(1);
}

/// Record a store operation latency
pub fn record_store_operation(operation: &str, duration_secs: f64) {
    histogram!(
        format!("{}_store_duration_seconds", METRICS_PREFIX),
        "operation" => operation.to_string()
    )
    .record(duration_secs);
}
