//! Backend adapters.
//!
//! # Data Flow
//! ```text
//! Logger (level gate passed)
//!     → dispatch (installed backend, error boundary)
//!     → Backend::is_enabled(logger, level)
//!     → Backend::accept(&LogEvent):
//!         - direct.rs (format.rs → appender.rs)
//!         - log_bridge.rs (log crate global logger)
//!         - tracing_bridge.rs (tracing events)
//!         - memory.rs (captured in memory)
//! ```
//!
//! # Design Decisions
//! - One trait, one installed backend per facade
//! - Backends may return errors or even panic; the dispatch boundary absorbs both
//! - Backends are selected by config at startup and may be swapped atomically

pub mod appender;
pub mod direct;
pub mod format;
pub mod log_bridge;
pub mod memory;
pub mod tracing_bridge;

use std::fmt;
use thiserror::Error;

use crate::config::schema::{BackendKind, FacadeConfig};
use crate::api::{Level, LogEvent};

pub use appender::{Appender, ConsoleAppender, ConsoleTarget, WriterAppender};
pub use direct::DirectBackend;
pub use format::{DefaultFormatter, Formatter, JsonFormatter};
pub use log_bridge::LogBackend;
pub use memory::MemoryBackend;
pub use tracing_bridge::TracingBackend;

/// Errors a backend may report for a single event.
#[derive(Debug, Error)]
pub enum BackendError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("format error: {0}")]
    Format(#[from] serde_json::Error),

    #[error("sink lock poisoned")]
    Poisoned,

    #[error("event rejected: {0}")]
    Rejected(String),
}

/// A concrete logging sink behind the facade.
pub trait Backend: Send + Sync + fmt::Debug {
    /// Short identifier used in diagnostics and metrics labels.
    fn name(&self) -> &'static str;

    /// Whether this backend would keep an event from `logger` at `level`.
    fn is_enabled(&self, logger: &str, level: Level) -> bool;

    /// Consume one event.
    fn accept(&self, event: &LogEvent) -> Result<(), BackendError>;

    fn flush(&self) -> Result<(), BackendError> {
        Ok(())
    }
}

/// Accepts nothing.
#[derive(Debug, Default, Clone, Copy)]
pub struct OffBackend;

impl Backend for OffBackend {
    fn name(&self) -> &'static str {
        "off"
    }

    fn is_enabled(&self, _logger: &str, _level: Level) -> bool {
        false
    }

    fn accept(&self, _event: &LogEvent) -> Result<(), BackendError> {
        Ok(())
    }
}

/// Build the backend selected by `config`.
pub fn from_config(config: &FacadeConfig) -> Box<dyn Backend> {
    match config.backend {
        BackendKind::Direct => Box::new(DirectBackend::from_config(&config.direct)),
        BackendKind::Log => Box::new(LogBackend::new()),
        BackendKind::Tracing => Box::new(TracingBackend::new()),
        BackendKind::Off => Box::new(OffBackend),
    }
}
