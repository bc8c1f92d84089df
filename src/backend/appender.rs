//! Output sinks for the direct backend.

use std::fmt;
use std::io::{self, Write};
use std::sync::Mutex;
use serde::{Deserialize, Serialize};

use crate::backend::BackendError;
use crate::api::Level;

/// Writes formatted lines somewhere.
pub trait Appender: Send + Sync + fmt::Debug {
    fn append(&self, level: Level, line: &str) -> Result<(), BackendError>;

    fn flush(&self) -> Result<(), BackendError> {
        Ok(())
    }
}

/// Which standard stream(s) the console appender writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ConsoleTarget {
    Stdout,
    Stderr,
    /// `Warn` and `Error` to stderr, everything else to stdout.
    #[default]
    Split,
}

/// Appender for the process's standard streams.
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleAppender {
    target: ConsoleTarget,
}

impl ConsoleAppender {
    pub fn new(target: ConsoleTarget) -> Self {
        Self { target }
    }

    fn use_stderr(&self, level: Level) -> bool {
        match self.target {
            ConsoleTarget::Stdout => false,
            ConsoleTarget::Stderr => true,
            ConsoleTarget::Split => level >= Level::Warn,
        }
    }
}

impl Appender for ConsoleAppender {
    fn append(&self, level: Level, line: &str) -> Result<(), BackendError> {
        if self.use_stderr(level) {
            writeln!(io::stderr().lock(), "{}", line)?;
        } else {
            writeln!(io::stdout().lock(), "{}", line)?;
        }
        Ok(())
    }

    fn flush(&self) -> Result<(), BackendError> {
        io::stdout().flush()?;
        io::stderr().flush()?;
        Ok(())
    }
}

/// Appender over any `io::Write`, serialized by a mutex.
pub struct WriterAppender<W> {
    writer: Mutex<W>,
}

impl<W: Write + Send> WriterAppender<W> {
    pub fn new(writer: W) -> Self {
        Self {
            writer: Mutex::new(writer),
        }
    }

    /// Consume the appender and return the writer.
    pub fn into_inner(self) -> Result<W, BackendError> {
        self.writer.into_inner().map_err(|_| BackendError::Poisoned)
    }
}

impl<W> fmt::Debug for WriterAppender<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WriterAppender").finish_non_exhaustive()
    }
}

impl<W: Write + Send> Appender for WriterAppender<W> {
    fn append(&self, _level: Level, line: &str) -> Result<(), BackendError> {
        let mut writer = self.writer.lock().map_err(|_| BackendError::Poisoned)?;
        writeln!(writer, "{}", line)?;
        Ok(())
    }

    fn flush(&self) -> Result<(), BackendError> {
        let mut writer = self.writer.lock().map_err(|_| BackendError::Poisoned)?;
        writer.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_routing() {
        let appender = ConsoleAppender::new(ConsoleTarget::Split);
        assert!(!appender.use_stderr(Level::Info));
        assert!(appender.use_stderr(Level::Warn));
        assert!(appender.use_stderr(Level::Error));
        assert!(!ConsoleAppender::new(ConsoleTarget::Stdout).use_stderr(Level::Error));
        assert!(ConsoleAppender::new(ConsoleTarget::Stderr).use_stderr(Level::Trace));
    }

    #[test]
    fn test_writer_appender_lines() {
        let appender = WriterAppender::new(Vec::new());
        appender.append(Level::Info, "first").unwrap();
        appender.append(Level::Error, "second").unwrap();
        let bytes = appender.into_inner().unwrap();
        assert_eq!(String::from_utf8(bytes).unwrap(), "first\nsecond\n");
    }
}
