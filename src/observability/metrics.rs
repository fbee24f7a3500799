//! Metrics collection and exposition.
//!
//! # Metrics
//! - `gateway_submissions_total` (counter): submissions by outcome
//! - `gateway_ledger_reads_total` (counter): ledger reads by method, outcome
//! - `gateway_in_flight` (gauge): 1 while a submission awaits confirmation
//!
//! # Design Decisions
//! - Low-overhead metric updates (atomic operations)
//! - Recording works with or without an installed exporter

use std::net::SocketAddr;

/// Start the Prometheus exposition endpoint.
pub fn init_metrics(addr: SocketAddr) {
    match metrics_exporter_prometheus::PrometheusBuilder::new()
        .with_http_listener(addr)
        .install()
    {
        Ok(()) => tracing::info!(address = %addr, "Metrics endpoint started"),
        Err(e) => tracing::error!(error = %e, "Failed to start metrics endpoint"),
    }
}

/// Record a submission outcome ("confirmed", "rejected", "failed").
pub fn record_submission(outcome: &'static str) {
    metrics::counter!("gateway_submissions_total", "outcome" => outcome).increment(1);
}

/// Record a ledger read by contract method.
pub fn record_ledger_read(method: &'static str, ok: bool) {
    let outcome = if ok { "ok" } else { "error" };
    metrics::counter!("gateway_ledger_reads_total", "method" => method, "outcome" => outcome)
        .increment(1);
}

/// Track whether a submission is awaiting confirmation.
pub fn record_in_flight(active: bool) {
    metrics::gauge!("gateway_in_flight").set(if active { 1.0 } else { 0.0 });
}
