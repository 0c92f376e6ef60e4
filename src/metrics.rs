//! Prometheus metrics for request counts and latency.
//!
//! This module provides:
//! - A per-request counter labelled by method, route and status
//! - A per-request latency histogram
//! - Counters for echo payloads rejected as malformed
//! - Probe check outcome counters

use std::time::{Duration, Instant};

use axum::{
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
};
use metrics::{counter, describe_counter, describe_histogram, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder, PrometheusHandle};
use tokio::task::JoinHandle;
use tracing::debug;

// === Metric Name Constants ===

/// HTTP request latency metric name.
pub const METRIC_HTTP_REQUEST_LATENCY: &str = "http_request_latency_ms";
/// HTTP requests counter metric name.
pub const METRIC_HTTP_REQUESTS: &str = "http_requests_total";
/// Malformed echo bodies counter metric name.
pub const METRIC_MALFORMED_REQUESTS: &str = "malformed_requests_total";
/// Probe checks counter metric name.
pub const METRIC_PROBE_CHECKS: &str = "probe_checks_total";
/// Probe check latency metric name.
pub const METRIC_PROBE_CHECK_LATENCY: &str = "probe_check_latency_ms";

/// How often histogram buckets are drained when nothing scrapes `/metrics`.
pub const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

/// Label used for requests that matched no route.
const UNMATCHED_ROUTE: &str = "unmatched";

/// Initialize all metric descriptions.
/// Call this once at startup to register metrics with descriptions.
pub fn init_metrics() {
    describe_histogram!(
        METRIC_HTTP_REQUEST_LATENCY,
        "HTTP request latency in milliseconds"
    );
    describe_counter!(METRIC_HTTP_REQUESTS, "Total number of HTTP requests served");
    describe_counter!(
        METRIC_MALFORMED_REQUESTS,
        "Total number of requests rejected for a malformed body"
    );
    describe_counter!(METRIC_PROBE_CHECKS, "Total number of probe checks run");
    describe_histogram!(
        METRIC_PROBE_CHECK_LATENCY,
        "Probe check round-trip latency in milliseconds"
    );

    debug!("Metrics initialized");
}

/// Install the global Prometheus recorder and return its render handle.
pub fn install_recorder() -> Result<PrometheusHandle, BuildError> {
    let handle = PrometheusBuilder::new().install_recorder()?;
    init_metrics();
    Ok(handle)
}

/// Run recorder upkeep on a fixed interval until the task is aborted.
///
/// The recorder buffers histogram samples until upkeep or a render drains
/// them, so this must run for as long as the recorder is receiving samples.
pub fn spawn_upkeep(handle: PrometheusHandle, interval: Duration) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(interval);
        ticker.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Delay);
        loop {
            ticker.tick().await;
            handle.run_upkeep();
        }
    })
}

/// Record HTTP request latency.
pub fn record_http_latency(start: Instant, route: &str) {
    let latency_ms = start.elapsed().as_secs_f64() * 1000.0;
    histogram!(METRIC_HTTP_REQUEST_LATENCY, "route" => route.to_string()).record(latency_ms);
}

/// Increment HTTP requests counter.
pub fn inc_http_requests(method: &str, route: &str, status: u16) {
    counter!(
        METRIC_HTTP_REQUESTS,
        "method" => method.to_string(),
        "route" => route.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
}

/// Increment malformed requests counter.
pub fn inc_malformed_requests() {
    counter!(METRIC_MALFORMED_REQUESTS).increment(1);
}

/// Increment probe checks counter.
pub fn inc_probe_checks(endpoint: &str, passed: bool) {
    let outcome = if passed { "pass" } else { "fail" };
    counter!(METRIC_PROBE_CHECKS, "endpoint" => endpoint.to_string(), "outcome" => outcome)
        .increment(1);
}

/// Middleware recording one counter increment and one latency sample per request.
pub async fn track_requests(request: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = request.method().to_string();
    let route = request
        .extensions()
        .get::<MatchedPath>()
        .map(|path| path.as_str().to_string())
        .unwrap_or_else(|| UNMATCHED_ROUTE.to_string());

    let response = next.run(request).await;
    let status = response.status();

    record_http_latency(start, &route);
    inc_http_requests(&method, &route, status.as_u16());
    if route == "/echo" && status == axum::http::StatusCode::BAD_REQUEST {
        inc_malformed_requests();
    }

    response
}

/// RAII guard for timing operations.
/// Automatically records latency when dropped.
pub struct LatencyTimer {
    start: Instant,
    metric_name: &'static str,
}

impl LatencyTimer {
    /// Create a new latency timer for the given metric.
    pub fn new(metric_name: &'static str) -> Self {
        Self {
            start: Instant::now(),
            metric_name,
        }
    }

    /// Get elapsed time in milliseconds (without recording).
    pub fn elapsed_ms(&self) -> f64 {
        self.start.elapsed().as_secs_f64() * 1000.0
    }
}

impl Drop for LatencyTimer {
    fn drop(&mut self) {
        histogram!(self.metric_name).record(self.elapsed_ms());
    }
}

/// Create a latency timer for a probe check.
pub fn timer_probe_check() -> LatencyTimer {
    LatencyTimer::new(METRIC_PROBE_CHECK_LATENCY)
}
