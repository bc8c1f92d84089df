//! Shared utilities for integration tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use lazylog::{Backend, BackendError, Facade, Level, LogEvent, MemoryBackend};

/// A fresh facade routing to a memory backend that the caller can inspect.
#[allow(dead_code)]
pub fn memory_facade(level: Level) -> (Facade, MemoryBackend) {
    let backend = MemoryBackend::new();
    (Facade::with_backend(backend.clone(), level), backend)
}

/// Panics on every delivery and counts how often it was called.
#[allow(dead_code)]
#[derive(Debug, Clone, Default)]
pub struct PanickingBackend {
    pub calls: Arc<AtomicUsize>,
}

#[allow(dead_code)]
impl PanickingBackend {
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Backend for PanickingBackend {
    fn name(&self) -> &'static str {
        "panicking"
    }

    fn is_enabled(&self, _logger: &str, _level: Level) -> bool {
        true
    }

    fn accept(&self, _event: &LogEvent) -> Result<(), BackendError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        panic!("backend exploded")
    }
}
