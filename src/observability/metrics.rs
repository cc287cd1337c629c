//! Metrics collection and exposition.
//!
//! # Metrics
//! - `builder_requests_total` (counter): requests by method, path, status
//! - `builder_request_duration_seconds` (histogram): latency distribution
//! - `builder_sessions_open` (gauge): currently open builder sessions
//! - `builder_checkouts_total` (counter): packages committed to carts
//! - `builder_package_value` (histogram): committed package totals
//! - `builder_catalog_services` (gauge): publicly offered services

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter on its own listener.
///
/// Failure to install is logged, not fatal: the service runs without an
/// exporter and every `record_*` call becomes a no-op.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one handled HTTP request.
pub fn record_request(method: &str, path: &str, status: u16, start: Instant) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];
    metrics::counter!("builder_requests_total", &labels).increment(1);
    metrics::histogram!("builder_request_duration_seconds", &labels)
        .record(start.elapsed().as_secs_f64());
}

/// Record the number of currently open builder sessions.
pub fn record_sessions_open(count: usize) {
    metrics::gauge!("builder_sessions_open").set(count as f64);
}

/// Record a committed package and its value.
pub fn record_checkout(total: f64) {
    metrics::counter!("builder_checkouts_total").increment(1);
    metrics::histogram!("builder_package_value").record(total);
}

/// Record the size of the public catalog (updated on load and reload).
pub fn record_catalog_size(count: usize) {
    metrics::gauge!("builder_catalog_services").set(count as f64);
}
