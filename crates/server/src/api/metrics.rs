//! Prometheus metrics recording.

use metrics::{counter, gauge, histogram};
use qstock_core::PatternIndex;
use std::time::Duration;

/// Records HTTP request metrics.
pub fn record_request(method: &str, path: &str, status: u16, duration: Duration) {
    let labels = [
        ("method", method.to_string()),
        ("path", path.to_string()),
        ("status", status.to_string()),
    ];
    counter!("http_requests_total", &labels).increment(1);
    histogram!("http_request_duration_seconds", &labels).record(duration.as_secs_f64());
}

/// Records a search operation metric.
pub fn record_search_operation(search_type: &str) {
    counter!("qstock_search_total", "type" => search_type.to_string()).increment(1);
}

/// Sets the dataset gauges. The index never changes, so this runs once at startup.
pub fn record_index_gauges(index: &PatternIndex) {
    gauge!("qstock_records_total").set(index.len() as f64);
    gauge!("qstock_qubits").set(index.n_qubits() as f64);
}
