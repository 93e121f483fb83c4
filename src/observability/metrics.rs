//! Metrics exposition.
//!
//! # Metrics
//! - `minter_mints_total` (counter): successful mint invocations
//! - `minter_mint_failures_total` (counter): failed mint invocations
//! - `minter_fallback_resolutions_total` (counter): token ids recovered via
//!   the racy total-count fallback instead of the event log

use std::net::SocketAddr;

use metrics_exporter_prometheus::PrometheusBuilder;

/// Install the Prometheus exporter and register metric descriptions.
pub fn init_metrics(addr: SocketAddr) {
    match PrometheusBuilder::new().with_http_listener(addr).install() {
        Ok(()) => {
            tracing::info!(address = %addr, "Metrics exporter listening");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to install metrics exporter");
            return;
        }
    }

    metrics::describe_counter!("minter_mints_total", "Successful mint invocations");
    metrics::describe_counter!("minter_mint_failures_total", "Failed mint invocations");
    metrics::describe_counter!(
        "minter_fallback_resolutions_total",
        "Token ids resolved via the total-count fallback"
    );
}
