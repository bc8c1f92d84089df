//! Direct logging: the facade formats and writes events itself.

use crate::backend::{
    Appender, Backend, BackendError, ConsoleAppender, DefaultFormatter, Formatter, JsonFormatter,
};
use crate::config::schema::{DirectConfig, DirectFormat};
use crate::api::{AtomicLevel, Level, LogEvent};

/// Formats events with a `Formatter` and hands the line to an `Appender`.
#[derive(Debug)]
pub struct DirectBackend {
    level: AtomicLevel,
    formatter: Box<dyn Formatter>,
    appender: Box<dyn Appender>,
}

impl DirectBackend {
    pub fn new(level: Level, formatter: Box<dyn Formatter>, appender: Box<dyn Appender>) -> Self {
        Self {
            level: AtomicLevel::new(level),
            formatter,
            appender,
        }
    }

    pub fn from_config(config: &DirectConfig) -> Self {
        let formatter: Box<dyn Formatter> = match config.format {
            DirectFormat::Text => Box::new(DefaultFormatter::new(config.include_prefix)),
            DirectFormat::Json => Box::new(JsonFormatter),
        };
        Self::new(
            config.level,
            formatter,
            Box::new(ConsoleAppender::new(config.target)),
        )
    }

    /// The backend's own floor, applied after each logger's threshold.
    pub fn level(&self) -> Level {
        self.level.load()
    }

    pub fn set_level(&self, level: Level) {
        self.level.store(level);
    }
}

impl Backend for DirectBackend {
    fn name(&self) -> &'static str {
        "direct"
    }

    fn is_enabled(&self, _logger: &str, level: Level) -> bool {
        level.passes(self.level.load())
    }

    fn accept(&self, event: &LogEvent) -> Result<(), BackendError> {
        let line = self.formatter.format(event)?;
        self.appender.append(event.level, &line)
    }

    fn flush(&self) -> Result<(), BackendError> {
        self.appender.flush()
    }
}
