//! Prometheus metrics for observability.
//!
//! This module provides metrics for monitoring the Streamfinder server:
//! - HTTP request metrics (latency, counts)
//! - Stream resolution outcomes and result sizes

use once_cell::sync::Lazy;
use prometheus::{
    self, Encoder, Histogram, HistogramOpts, HistogramVec, IntCounter, IntCounterVec, IntGauge,
    Opts, Registry, TextEncoder,
};
use regex_lite::Regex;

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
            "streamfinder_http_request_duration_seconds",
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
        Opts::new("streamfinder_http_requests_total", "Total HTTP requests"),
        &["method", "path", "status"],
    )
    .unwrap()
});

/// HTTP requests currently in flight.
pub static HTTP_REQUESTS_IN_FLIGHT: Lazy<IntGauge> = Lazy::new(|| {
    IntGauge::new(
        "streamfinder_http_requests_in_flight",
        "Number of HTTP requests currently being processed",
    )
    .unwrap()
});

// =============================================================================
// Stream Metrics
// =============================================================================

/// Stream requests by content type and outcome (`found` / `empty`).
pub static STREAM_REQUESTS_TOTAL: Lazy<IntCounterVec> = Lazy::new(|| {
    IntCounterVec::new(
        Opts::new(
            "streamfinder_stream_requests_total",
            "Stream requests by type and outcome",
        ),
        &["type", "outcome"],
    )
    .unwrap()
});

/// Streams returned per request.
pub static STREAMS_RETURNED: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "streamfinder_streams_returned",
            "Number of streams returned per request",
        )
        .buckets(vec![0.0, 1.0, 3.0, 6.0, 9.0, 12.0, 18.0]),
    )
    .unwrap()
});

/// Search attempts (query variations tried) per uncached request.
pub static SEARCH_ATTEMPTS: Lazy<Histogram> = Lazy::new(|| {
    Histogram::with_opts(
        HistogramOpts::new(
            "streamfinder_search_attempts",
            "Query variations tried per resolution",
        )
        .buckets(vec![0.0, 1.0, 2.0, 3.0, 5.0, 8.0, 13.0]),
    )
    .unwrap()
});

/// Requests answered from the freshness cache.
pub static STREAM_CACHE_HITS_TOTAL: Lazy<IntCounter> = Lazy::new(|| {
    IntCounter::new(
        "streamfinder_stream_cache_hits_total",
        "Stream requests answered from cache",
    )
    .unwrap()
});

// =============================================================================
// Registration
// =============================================================================

fn register_metrics(registry: &Registry) {
    // HTTP
    registry
        .register(Box::new(HTTP_REQUEST_DURATION.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(HTTP_REQUESTS_IN_FLIGHT.clone()))
        .unwrap();

    // Streams
    registry
        .register(Box::new(STREAM_REQUESTS_TOTAL.clone()))
        .unwrap();
    registry
        .register(Box::new(STREAMS_RETURNED.clone()))
        .unwrap();
    registry
        .register(Box::new(SEARCH_ATTEMPTS.clone()))
        .unwrap();
    registry
        .register(Box::new(STREAM_CACHE_HITS_TOTAL.clone()))
        .unwrap();
}

/// Encode all metrics as Prometheus text format.
pub fn encode_metrics() -> String {
    let encoder = TextEncoder::new();
    let metric_families = REGISTRY.gather();
    let mut buffer = Vec::new();
    encoder.encode(&metric_families, &mut buffer).unwrap();
    String::from_utf8(buffer).unwrap()
}

/// Record the outcome of one stream request.
pub fn record_stream_request(
    stream_type: &str,
    returned: usize,
    attempts: usize,
    from_cache: bool,
) {
    // unknown types would otherwise blow up label cardinality
    let stream_type = match stream_type {
        "movie" | "series" => stream_type,
        _ => "other",
    };
    let outcome = if returned > 0 { "found" } else { "empty" };

    STREAM_REQUESTS_TOTAL
        .with_label_values(&[stream_type, outcome])
        .inc();
    STREAMS_RETURNED.observe(returned as f64);
    if from_cache {
        STREAM_CACHE_HITS_TOTAL.inc();
    } else {
        SEARCH_ATTEMPTS.observe(attempts as f64);
    }
}

static STREAM_ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^(/stream/[^/]+/)[^/]+$").unwrap());
static NUMERIC_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"/\d+(/|$)").unwrap());

/// Normalize a path for metric labels (replace IDs with placeholders).
pub fn normalize_path(path: &str) -> String {
    let result = STREAM_ID_RE.replace(path, "${1}{id}");
    let result = NUMERIC_RE.replace_all(&result, "/{id}$1");
    result.to_string()
}
