//! Metrics collection and exposition.
//!
//! # Metrics
//! - `router_resolutions_total` (counter): forward lookups by outcome and route
//! - `router_reverse_lookups_total` (counter): reverse lookups by outcome
//! - `router_resolution_duration_seconds` (histogram): lookup latency
//! - `router_routes` (gauge): routes in the live table
//!
//! # Design Decisions
//! - Recording without an installed exporter is a no-op
//! - Prometheus exporter serves its own HTTP listener

use std::net::SocketAddr;
use std::time::Instant;

use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus exporter on `addr`.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics exporter listening");
    Ok(())
}

/// Record a forward lookup. `route` is the matched name or `none`.
pub fn record_resolution(matched: bool, route: &str, start: Instant) {
    let outcome = if matched { "matched" } else { "not_found" };
    metrics::counter!(
        "router_resolutions_total",
        "outcome" => outcome,
        "route" => route.to_string()
    )
    .increment(1);
    metrics::histogram!("router_resolution_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record a reverse lookup outcome (`ok`, `unknown_route`, `missing_parameter`).
pub fn record_reverse_lookup(outcome: &'static str) {
    metrics::counter!("router_reverse_lookups_total", "outcome" => outcome).increment(1);
}

/// Publish the size of the live route table.
pub fn set_route_count(count: usize) {
    metrics::gauge!("router_routes").set(count as f64);
}
