//! Flushing on the way out.

use crate::facade::Facade;

/// Flushes the facade's backend when dropped.
///
/// Hold one in `main` so buffered output is written even on early return.
#[must_use = "the facade is flushed as soon as the guard is dropped"]
pub struct FlushGuard<'a> {
    facade: &'a Facade,
}

impl<'a> FlushGuard<'a> {
    pub fn new(facade: &'a Facade) -> Self {
        Self { facade }
    }
}

impl Drop for FlushGuard<'_> {
    fn drop(&mut self) {
        tracing::debug!(backend = self.facade.backend_name(), "Flushing on shutdown");
        self.facade.flush();
    }
}
