//! Bridge to `tracing` subscribers.

use crate::backend::{Backend, BackendError, DefaultFormatter, Formatter};
use crate::api::{Level, LogEvent};

/// Emits each event as a `tracing` event with a `logger` field.
///
/// `tracing` callsites need static targets, so every event is emitted under
/// this module's target and the logger name travels as a field.
#[derive(Debug, Clone, Copy)]
pub struct TracingBackend {
    formatter: DefaultFormatter,
}

impl TracingBackend {
    pub fn new() -> Self {
        Self {
            formatter: DefaultFormatter::new(false),
        }
    }
}

impl Default for TracingBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for TracingBackend {
    fn name(&self) -> &'static str {
        "tracing"
    }

    fn is_enabled(&self, _logger: &str, level: Level) -> bool {
        match level {
            Level::Trace => tracing::enabled!(tracing::Level::TRACE),
            Level::Debug => tracing::enabled!(tracing::Level::DEBUG),
            Level::Info => tracing::enabled!(tracing::Level::INFO),
            Level::Warn => tracing::enabled!(tracing::Level::WARN),
            Level::Error => tracing::enabled!(tracing::Level::ERROR),
            Level::Off => false,
        }
    }

    fn accept(&self, event: &LogEvent) -> Result<(), BackendError> {
        let rendered = self.formatter.format(event)?;
        let logger: &str = &event.logger_name;
        match event.level {
            Level::Trace => tracing::trace!(logger, "{}", rendered),
            Level::Debug => tracing::debug!(logger, "{}", rendered),
            Level::Info => tracing::info!(logger, "{}", rendered),
            Level::Warn => tracing::warn!(logger, "{}", rendered),
            Level::Error => tracing::error!(logger, "{}", rendered),
            Level::Off => {}
        }
        Ok(())
    }
}
