//! Log events and the builder used to populate them.
//!
//! An event is only built once the level gate has passed, so everything here
//! may allocate freely.

use std::collections::BTreeMap;
use std::error::Error;
use std::fmt;
use std::sync::Arc;
use std::time::{SystemTime, UNIX_EPOCH};
use serde::Serialize;

use crate::context::LogContext;
use crate::api::level::Level;
use crate::api::marker::Marker;

/// Snapshot of an error and its `source()` chain, taken when the event is built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Cause {
    /// `Display` of the outermost error followed by each source, outermost first.
    pub chain: Vec<String>,
}

impl Cause {
    pub fn from_error(err: &(dyn Error + 'static)) -> Self {
        let mut chain = vec![err.to_string()];
        let mut current = err.source();
        while let Some(source) = current {
            chain.push(source.to_string());
            current = source.source();
        }
        Self { chain }
    }

    pub fn from_message(message: impl Into<String>) -> Self {
        Self {
            chain: vec![message.into()],
        }
    }

    /// Description of the outermost error.
    pub fn message(&self) -> &str {
        self.chain.first().map(String::as_str).unwrap_or("")
    }
}

impl fmt::Display for Cause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// A single materialized log event.
#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    /// Milliseconds since the Unix epoch.
    pub timestamp: u64,
    pub level: Level,
    #[serde(rename = "logger")]
    pub logger_name: Arc<str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub marker: Option<Marker>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cause: Option<Cause>,
    #[serde(skip_serializing_if = "BTreeMap::is_empty")]
    pub payload: BTreeMap<String, String>,
    #[serde(skip_serializing_if = "LogContext::is_empty")]
    pub context: LogContext,
}

impl LogEvent {
    /// Create an empty event stamped with the current time.
    pub fn new(level: Level, logger_name: impl Into<Arc<str>>) -> Self {
        Self {
            timestamp: now_millis(),
            level,
            logger_name: logger_name.into(),
            marker: None,
            message: None,
            cause: None,
            payload: BTreeMap::new(),
            context: LogContext::default(),
        }
    }

    pub fn message(&self) -> &str {
        self.message.as_deref().unwrap_or("")
    }
}

/// Mutable view handed to `Logger::at` closures.
#[derive(Debug, Default)]
pub struct EventBuilder {
    pub message: Option<String>,
    pub cause: Option<Cause>,
    pub payload: BTreeMap<String, String>,
}

impl EventBuilder {
    pub fn message(&mut self, message: impl fmt::Display) -> &mut Self {
        self.message = Some(message.to_string());
        self
    }

    pub fn cause(&mut self, err: &(dyn Error + 'static)) -> &mut Self {
        self.cause = Some(Cause::from_error(err));
        self
    }

    /// Add a structured payload field.
    pub fn field(&mut self, key: impl Into<String>, value: impl fmt::Display) -> &mut Self {
        self.payload.insert(key.into(), value.to_string());
        self
    }

    pub(crate) fn into_event(
        self,
        level: Level,
        logger_name: Arc<str>,
        marker: Option<Marker>,
        context: LogContext,
    ) -> LogEvent {
        LogEvent {
            timestamp: now_millis(),
            level,
            logger_name,
            marker,
            message: self.message,
            cause: self.cause,
            payload: self.payload,
            context,
        }
    }
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_millis() as u64
}
