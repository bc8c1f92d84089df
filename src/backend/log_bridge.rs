//! Bridge to the `log` crate's global logger.

use crate::backend::{Backend, BackendError, DefaultFormatter, Formatter};
use crate::api::{Level, LogEvent};

/// Forwards events to whatever `log::Log` implementation the process installed.
///
/// The logger name becomes the record target. Marker, context, payload and
/// cause are rendered into the message text.
#[derive(Debug, Clone, Copy)]
pub struct LogBackend {
    formatter: DefaultFormatter,
}

impl LogBackend {
    pub fn new() -> Self {
        Self {
            formatter: DefaultFormatter::new(false),
        }
    }
}

impl Default for LogBackend {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) fn to_log_level(level: Level) -> Option<log::Level> {
    match level {
        Level::Trace => Some(log::Level::Trace),
        Level::Debug => Some(log::Level::Debug),
        Level::Info => Some(log::Level::Info),
        Level::Warn => Some(log::Level::Warn),
        Level::Error => Some(log::Level::Error),
        Level::Off => None,
    }
}

impl Backend for LogBackend {
    fn name(&self) -> &'static str {
        "log"
    }

    fn is_enabled(&self, logger: &str, level: Level) -> bool {
        let Some(level) = to_log_level(level) else {
            return false;
        };
        if level > log::max_level() {
            return false;
        }
        let metadata = log::Metadata::builder().level(level).target(logger).build();
        log::logger().enabled(&metadata)
    }

    fn accept(&self, event: &LogEvent) -> Result<(), BackendError> {
        let Some(level) = to_log_level(event.level) else {
            return Ok(());
        };
        let rendered = self.formatter.format(event)?;
        log::logger().log(
            &log::Record::builder()
                .args(format_args!("{}", rendered))
                .level(level)
                .target(&event.logger_name)
                .build(),
        );
        Ok(())
    }

    fn flush(&self) -> Result<(), BackendError> {
        log::logger().flush();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_level_mapping() {
        assert_eq!(to_log_level(Level::Warn), Some(log::Level::Warn));
        assert_eq!(to_log_level(Level::Trace), Some(log::Level::Trace));
        assert_eq!(to_log_level(Level::Off), None);
    }

    #[test]
    fn test_off_is_never_enabled() {
        assert!(!LogBackend::new().is_enabled("x", Level::Off));
    }
}
