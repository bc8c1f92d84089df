//! In-memory capture backend.

use std::sync::{Arc, Mutex, MutexGuard};

use crate::backend::{Backend, BackendError};
use crate::api::{Level, LogEvent};

/// Records every accepted event. Clones share the same buffer, so a test can
/// keep one handle and install another.
#[derive(Debug, Clone)]
pub struct MemoryBackend {
    events: Arc<Mutex<Vec<LogEvent>>>,
    level: Level,
}

impl MemoryBackend {
    /// Capture everything.
    pub fn new() -> Self {
        Self::with_level(Level::Trace)
    }

    /// Capture events at `level` and above.
    pub fn with_level(level: Level) -> Self {
        Self {
            events: Arc::new(Mutex::new(Vec::new())),
            level,
        }
    }

    fn lock(&self) -> MutexGuard<'_, Vec<LogEvent>> {
        // A panic while holding the lock cannot leave a Vec half-pushed.
        self.events.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Copy of every captured event, oldest first.
    pub fn events(&self) -> Vec<LogEvent> {
        self.lock().clone()
    }

    /// Drain the captured events.
    pub fn take(&self) -> Vec<LogEvent> {
        std::mem::take(&mut *self.lock())
    }

    /// Messages of the captured events, oldest first.
    pub fn messages(&self) -> Vec<String> {
        self.lock().iter().map(|e| e.message().to_string()).collect()
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for MemoryBackend {
    fn name(&self) -> &'static str {
        "memory"
    }

    fn is_enabled(&self, _logger: &str, level: Level) -> bool {
        level.passes(self.level)
    }

    fn accept(&self, event: &LogEvent) -> Result<(), BackendError> {
        self.lock().push(event.clone());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clones_share_buffer() {
        let backend = MemoryBackend::new();
        let handle = backend.clone();
        backend.accept(&LogEvent::new(Level::Info, "a")).unwrap();
        assert_eq!(handle.len(), 1);
        assert_eq!(handle.take().len(), 1);
        assert!(backend.is_empty());
    }

    #[test]
    fn test_level_floor() {
        let backend = MemoryBackend::with_level(Level::Warn);
        assert!(!backend.is_enabled("a", Level::Info));
        assert!(backend.is_enabled("a", Level::Error));
    }
}
