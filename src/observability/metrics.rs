//! Metrics collection and exposition.
//!
//! # Metrics
//! - `flight_query_requests_total` (counter): requests by status code
//! - `flight_query_request_duration_seconds` (histogram): latency distribution
//! - `flight_query_records_returned` (histogram): records per response
//! - `flight_query_dataset_errors_total` (counter): load failures by kind

use std::net::SocketAddr;
use std::time::Instant;

use metrics::{counter, histogram};
use metrics_exporter_prometheus::{BuildError, PrometheusBuilder};

/// Install the Prometheus recorder and its HTTP scrape endpoint.
///
/// Must be called from within a Tokio runtime.
pub fn init_metrics(addr: SocketAddr) -> Result<(), BuildError> {
    PrometheusBuilder::new().with_http_listener(addr).install()?;
    tracing::info!(address = %addr, "Metrics endpoint listening");
    Ok(())
}

/// Record a completed request.
pub fn record_request(method: &str, status: u16, start: Instant) {
    counter!(
        "flight_query_requests_total",
        "method" => method.to_string(),
        "status" => status.to_string()
    )
    .increment(1);
    histogram!("flight_query_request_duration_seconds").record(start.elapsed().as_secs_f64());
}

/// Record how many records a response carried.
pub fn record_returned(returned: usize) {
    histogram!("flight_query_records_returned").record(returned as f64);
}

/// Record a dataset load failure.
pub fn record_dataset_error(kind: &'static str) {
    counter!("flight_query_dataset_errors_total", "kind" => kind).increment(1);
}
