//! Routing from loggers to the installed backend.
//!
//! # Data Flow
//! ```text
//! Logger::at(level, ...)
//!     → threshold check (AtomicLevel, no lock)
//!     → Dispatch::is_enabled (ArcSwap load + boundary)
//!     → build LogEvent (message, context snapshot, timestamp)
//!     → Dispatch::deliver → boundary.rs → Backend::accept
//!
//! Reconfiguration:
//!     new backend → Dispatch::install (atomic swap, old one flushed)
//!     new levels  → registry.rs re-applies levels.rs to every logger
//! ```
//!
//! # Design Decisions
//! - Loggers hold an `Arc<Dispatch>`, never a backend, so a swap reroutes
//!   loggers that already exist
//! - The hot path only performs atomic loads

pub mod boundary;
pub mod levels;
pub mod registry;

use arc_swap::ArcSwap;
use std::sync::Arc;

use crate::backend::Backend;
use crate::api::{Level, LogEvent};
use crate::observability::metrics;

pub use boundary::{DeliveryStats, ErrorBoundary};
pub use levels::LevelTable;
pub use registry::LoggerRegistry;

/// The swappable backend slot shared by every logger of one facade.
#[derive(Debug)]
pub struct Dispatch {
    backend: ArcSwap<Box<dyn Backend>>,
    boundary: ErrorBoundary,
}

impl Dispatch {
    pub fn new(backend: Box<dyn Backend>) -> Self {
        Self {
            backend: ArcSwap::from_pointee(backend),
            boundary: ErrorBoundary::new(),
        }
    }

    /// Name of the installed backend.
    pub fn backend_name(&self) -> &'static str {
        self.backend.load().name()
    }

    /// Replace the installed backend; the previous one is flushed.
    pub fn install(&self, backend: Box<dyn Backend>) {
        let next = backend.name();
        let previous = self.backend.swap(Arc::new(backend));
        self.boundary.flush(&**previous);
        metrics::record_backend_swap(next);
        tracing::debug!(previous = previous.name(), next, "Backend installed");
    }

    pub fn is_enabled(&self, logger: &str, level: Level) -> bool {
        let backend = self.backend.load();
        self.boundary.is_enabled(&***backend, logger, level)
    }

    pub fn deliver(&self, event: &LogEvent) {
        let backend = self.backend.load();
        self.boundary.deliver(&***backend, event);
    }

    pub fn flush(&self) {
        let backend = self.backend.load();
        self.boundary.flush(&***backend);
    }

    pub fn stats(&self) -> DeliveryStats {
        self.boundary.stats()
    }
}
