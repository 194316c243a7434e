//! Metrics collection and exposition.
//!
//! # Metrics
//! - `responder_writes_total` (counter): write attempts, resends included
//! - `responder_resends_total` (counter): writes issued by the resend driver
//! - `responder_acks_total` (counter): client acks that cleared an entry
//! - `responder_escalations_total` (counter): escalations by status
//! - `responder_escalations_dropped_total` (counter): escalations lost to overflow
//! - `responder_pending_deliveries` (gauge): registry size
//!
//! # Design Decisions
//! - Recording is a no-op until an exporter is installed
//! - The Prometheus endpoint is optional and off by default

use std::net::SocketAddr;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

use crate::msg::Status;

/// Install the Prometheus exporter and its HTTP listener.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

pub fn record_write() {
    metrics::counter!("responder_writes_total").increment(1);
}

pub fn record_resend_cycle(entries: usize) {
    metrics::counter!("responder_resends_total").increment(entries as u64);
}

pub fn record_ack() {
    metrics::counter!("responder_acks_total").increment(1);
}

pub fn record_escalation(status: Status) {
    metrics::counter!("responder_escalations_total", "status" => format!("{:?}", status))
        .increment(1);
}

pub fn record_escalation_dropped() {
    metrics::counter!("responder_escalations_dropped_total").increment(1);
}

pub fn record_pending(count: usize) {
    metrics::gauge!("responder_pending_deliveries").set(count as f64);
}
