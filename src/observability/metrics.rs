//! Metrics collection and exposition.
//!
//! # Metrics
//! - `relay_lookups_total` (counter): lookups by outcome and response status
//! - `relay_lookup_duration_seconds` (histogram): end-to-end lookup latency by outcome
//!
//! Recording goes through the `metrics` facade and is a no-op until an
//! exporter is installed.

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter with its own HTTP listener.
///
/// Failure is logged; the relay keeps serving without metrics.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => tracing::info!(address = %addr, "Metrics exporter listening"),
        Err(e) => tracing::error!(address = %addr, error = %e, "Failed to install metrics exporter"),
    }
}

/// Record one finished lookup.
pub fn record_lookup(outcome: &'static str, status: u16, start: Instant) {
    metrics::counter!(
        "relay_lookups_total",
        "outcome" => outcome,
        "status" => status.to_string()
    )
    .increment(1);

    metrics::histogram!("relay_lookup_duration_seconds", "outcome" => outcome)
        .record(start.elapsed().as_secs_f64());
}
