//! Prometheus metrics for observability and monitoring.
//!
//! Metric names recorded across the workspace:
//! - Store command processing (`store.*`)
//! - Weather lookups (`weather.*`)
//!
//! # Example
//!
//! ```rust,no_run
//! use todocast_runtime::metrics::install_recorder;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let handle = install_recorder()?;
//!
//! // Serve this from GET /metrics
//! let body = handle.render();
//! # Ok(())
//! # }
//! ```

use metrics::{describe_counter, describe_histogram};
use metrics_exporter_prometheus::{Matcher, PrometheusBuilder, PrometheusHandle};
use thiserror::Error;

/// Histogram buckets for latency measurements, in seconds.
const LATENCY_BUCKETS: &[f64] = &[
    0.000_01, 0.000_05, 0.000_1, 0.000_5, 0.001, 0.005, 0.01, 0.05, 0.1, 0.5, 1.0, 5.0,
];

/// Errors from metrics operations.
#[derive(Error, Debug)]
pub enum MetricsError {
    /// Failed to build metrics exporter
    #[error("Failed to build metrics exporter: {0}")]
    Build(String),
    /// Failed to install metrics exporter
    #[error("Failed to install metrics exporter: {0}")]
    Install(String),
}

/// Install the global Prometheus recorder and describe every metric.
///
/// The returned handle renders the current metrics in the Prometheus text
/// format.
///
/// # Errors
///
/// Returns [`MetricsError::Build`] if the histogram configuration is rejected
/// and [`MetricsError::Install`] if a global recorder is already installed.
pub fn install_recorder() -> Result<PrometheusHandle, MetricsError> {
    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Suffix("duration_seconds".to_string()),
            LATENCY_BUCKETS,
        )
        .map_err(|e| MetricsError::Build(e.to_string()))?
        .install_recorder()
        .map_err(|e| MetricsError::Install(e.to_string()))?;

    register_metrics();
    tracing::info!("Prometheus recorder installed");

    Ok(handle)
}

/// Register all metric descriptions.
pub fn register_metrics() {
    // Store
    describe_counter!(
        "store.commands.total",
        "Total number of commands sent to a store"
    );
    describe_counter!(
        "store.commands.rejected",
        "Total number of commands rejected by a reducer"
    );
    describe_histogram!(
        "store.reducer.duration_seconds",
        "Time taken to execute a reducer"
    );
    describe_counter!(
        "store.shutdown.initiated",
        "Number of store shutdowns initiated"
    );
    describe_counter!(
        "store.shutdown.rejected_actions",
        "Commands rejected because the store was shutting down"
    );

    // Weather
    describe_counter!(
        "weather.requests.total",
        "Total number of weather lookups"
    );
    describe_counter!(
        "weather.requests.failed",
        "Total number of weather lookups that failed"
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn buckets_are_ascending() {
        assert!(LATENCY_BUCKETS.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn builder_accepts_latency_buckets() {
        let result = PrometheusBuilder::new().set_buckets_for_metric(
            Matcher::Suffix("duration_seconds".to_string()),
            LATENCY_BUCKETS,
        );
        assert!(result.is_ok());
    }

    #[test]
    fn describing_without_recorder_is_harmless() {
        register_metrics();
    }
}
