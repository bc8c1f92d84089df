//! Error boundary between loggers and backends.
//!
//! Nothing a backend does, returning an error or panicking, may reach the
//! code that issued the log call. Failures are counted and reported on
//! stderr, which is the one channel that does not depend on the backend.

use std::any::Any;
use std::io::{self, Write};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::atomic::{AtomicU64, Ordering};

use crate::backend::{Backend, BackendError};
use crate::api::{Level, LogEvent};
use crate::observability::metrics;

/// Report the first failure and every Nth after it.
const REPORT_EVERY: u64 = 1000;

/// Delivery counters for one facade.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DeliveryStats {
    pub delivered: u64,
    pub failed: u64,
}

#[derive(Debug, Default)]
pub struct ErrorBoundary {
    delivered: AtomicU64,
    failed: AtomicU64,
}

impl ErrorBoundary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stats(&self) -> DeliveryStats {
        DeliveryStats {
            delivered: self.delivered.load(Ordering::Relaxed),
            failed: self.failed.load(Ordering::Relaxed),
        }
    }

    /// `backend.is_enabled`, treating a panic as "disabled".
    pub fn is_enabled(&self, backend: &dyn Backend, logger: &str, level: Level) -> bool {
        match catch_unwind(AssertUnwindSafe(|| backend.is_enabled(logger, level))) {
            Ok(enabled) => enabled,
            Err(panic) => {
                self.report(backend.name(), "is_enabled", &panic_message(&*panic));
                false
            }
        }
    }

    /// Hand `event` to `backend`, absorbing any failure.
    pub fn deliver(&self, backend: &dyn Backend, event: &LogEvent) {
        match catch_unwind(AssertUnwindSafe(|| backend.accept(event))) {
            Ok(Ok(())) => {
                self.delivered.fetch_add(1, Ordering::Relaxed);
                metrics::record_delivered(backend.name(), event.level);
            }
            Ok(Err(e)) => self.report(backend.name(), "accept", &e.to_string()),
            Err(panic) => self.report(backend.name(), "accept", &panic_message(&*panic)),
        }
    }

    /// Flush `backend`, absorbing any failure.
    pub fn flush(&self, backend: &dyn Backend) {
        let result = catch_unwind(AssertUnwindSafe(|| backend.flush()))
            .unwrap_or_else(|panic| Err(BackendError::Rejected(panic_message(&*panic))));
        if let Err(e) = result {
            self.report(backend.name(), "flush", &e.to_string());
        }
    }

    fn report(&self, backend: &'static str, operation: &'static str, reason: &str) {
        let failed = self.failed.fetch_add(1, Ordering::Relaxed) + 1;
        metrics::record_failed(backend, operation);
        if should_report(failed) {
            // A closed stderr must not turn into a panic at the call site.
            let _ = writeln!(
                io::stderr().lock(),
                "lazylog: backend '{}' failed in {} ({} failures so far): {}",
                backend,
                operation,
                failed,
                reason
            );
        }
    }
}

/// Whether the `failed`-th failure (1-based) is reported.
fn should_report(failed: u64) -> bool {
    failed == 1 || failed % REPORT_EVERY == 0
}

/// Best-effort text of a panic payload.
pub fn panic_message(panic: &(dyn Any + Send)) -> String {
    if let Some(s) = panic.downcast_ref::<&'static str>() {
        (*s).to_string()
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else {
        "unknown panic".to_string()
    }
}
