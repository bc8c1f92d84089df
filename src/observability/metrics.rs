//! Delivery metrics.
//!
//! # Metrics
//! - `lazylog_events_delivered_total` (counter): by backend, level
//! - `lazylog_events_failed_total` (counter): by backend, operation
//! - `lazylog_backend_installs_total` (counter): by backend
//!
//! No recorder is installed by this crate; without one these are no-ops.

use crate::api::Level;

pub fn record_delivered(backend: &'static str, level: Level) {
    ::metrics::counter!(
        "lazylog_events_delivered_total",
        "backend" => backend,
        "level" => level.as_str()
    )
    .increment(1);
}

pub fn record_failed(backend: &'static str, operation: &'static str) {
    ::metrics::counter!(
        "lazylog_events_failed_total",
        "backend" => backend,
        "operation" => operation
    )
    .increment(1);
}

pub fn record_backend_swap(backend: &'static str) {
    ::metrics::counter!("lazylog_backend_installs_total", "backend" => backend).increment(1);
}
