//! Rendering events to lines for the direct backend.

use std::fmt::{self, Write as _};

use crate::backend::BackendError;
use crate::api::LogEvent;

/// Turns an event into one output line (without the trailing newline).
pub trait Formatter: Send + Sync + fmt::Debug {
    fn format(&self, event: &LogEvent) -> Result<String, BackendError>;
}

/// Plain text: `LEVEL: [logger] marker message {ctx} {payload}, Caused by: '...'`.
#[derive(Debug, Clone, Copy)]
pub struct DefaultFormatter {
    /// Emit the `LEVEL: [logger] ` prefix.
    pub include_prefix: bool,
}

impl DefaultFormatter {
    pub fn new(include_prefix: bool) -> Self {
        Self { include_prefix }
    }
}

impl Default for DefaultFormatter {
    fn default() -> Self {
        Self::new(true)
    }
}

impl Formatter for DefaultFormatter {
    fn format(&self, event: &LogEvent) -> Result<String, BackendError> {
        let mut out = String::with_capacity(64 + event.message().len());
        // Writing into a String cannot fail.
        if self.include_prefix {
            let _ = write!(out, "{}: [{}] ", event.level, event.logger_name);
        }
        if let Some(marker) = &event.marker {
            let _ = write!(out, "{} ", marker);
        }
        out.push_str(event.message());
        if !event.context.is_empty() {
            let _ = write!(out, " {}", event.context);
        }
        if !event.payload.is_empty() {
            out.push_str(" {");
            for (i, (k, v)) in event.payload.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                let _ = write!(out, "{}={}", k, v);
            }
            out.push('}');
        }
        if let Some(cause) = &event.cause {
            for message in &cause.chain {
                let _ = write!(out, ", Caused by: '{}'", message);
            }
        }
        Ok(out)
    }
}

/// One JSON object per event.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonFormatter;

impl Formatter for JsonFormatter {
    fn format(&self, event: &LogEvent) -> Result<String, BackendError> {
        Ok(serde_json::to_string(event)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::context::LogContext;
    use crate::api::{Cause, Level, Marker};

    fn event() -> LogEvent {
        let mut event = LogEvent::new(Level::Warn, "app.db");
        event.message = Some("slow query".into());
        event
    }

    #[test]
    fn test_default_format_with_prefix() {
        let line = DefaultFormatter::default().format(&event()).unwrap();
        assert_eq!(line, "WARN: [app.db] slow query");
    }

    #[test]
    fn test_default_format_without_prefix() {
        let line = DefaultFormatter::new(false).format(&event()).unwrap();
        assert_eq!(line, "slow query");
    }

    #[test]
    fn test_default_format_full() {
        let mut event = event();
        event.marker = Some(Marker::new("AUDIT"));
        event.context = LogContext::from_fields([("trace_id", "t1")]);
        event.payload.insert("ms".into(), "1200".into());
        event.cause = Some(Cause {
            chain: vec!["timeout".into(), "socket closed".into()],
        });
        let line = DefaultFormatter::default().format(&event).unwrap();
        assert_eq!(
            line,
            "WARN: [app.db] AUDIT slow query {trace_id=t1} {ms=1200}, Caused by: 'timeout', Caused by: 'socket closed'"
        );
    }

    #[test]
    fn test_json_format() {
        let mut event = event();
        event.context = LogContext::from_fields([("trace_id", "t1")]);
        let line = JsonFormatter.format(&event).unwrap();
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();
        assert_eq!(value["level"], "warn");
        assert_eq!(value["logger"], "app.db");
        assert_eq!(value["message"], "slow query");
        assert_eq!(value["context"]["trace_id"], "t1");
        assert!(value.get("cause").is_none());
    }
}
