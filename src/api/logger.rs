//! The call-site handle.
//!
//! # Responsibilities
//! - Gate every call on the logger's threshold before doing any work
//! - Build the event lazily, only once the gate has passed
//! - Capture the current `LogContext` onto the event
//! - Never fail, panic or block on behalf of the backend

use std::error::Error;
use std::fmt::{self, Debug, Display};
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;

use crate::context;
use crate::api::event::{Cause, EventBuilder};
use crate::api::level::{AtomicLevel, Level};
use crate::api::marker::Marker;
use crate::dispatch::boundary::panic_message;
use crate::dispatch::Dispatch;

/// A named logger with its own threshold.
///
/// Obtained from `Facade::logger` or `lazylog::logger`; loggers are shared
/// (`Arc`) and cheap to call from any thread or task.
pub struct Logger {
    name: Arc<str>,
    threshold: AtomicLevel,
    dispatch: Arc<Dispatch>,
}

impl Logger {
    pub(crate) fn new(name: &str, threshold: Level, dispatch: Arc<Dispatch>) -> Self {
        Self {
            name: Arc::from(name),
            threshold: AtomicLevel::new(threshold),
            dispatch,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current threshold.
    pub fn level(&self) -> Level {
        self.threshold.load()
    }

    /// Explicitly reconfigure this logger's threshold.
    ///
    /// Lasts until the owning facade re-applies its level table.
    pub fn set_level(&self, level: Level) {
        self.threshold.store(level);
    }

    // --- Level checks ---

    /// True if an event at `level` would reach the backend.
    pub fn is_enabled(&self, level: Level) -> bool {
        level.passes(self.threshold.load()) && self.dispatch.is_enabled(&self.name, level)
    }

    pub fn is_trace_enabled(&self) -> bool {
        self.is_enabled(Level::Trace)
    }

    pub fn is_debug_enabled(&self) -> bool {
        self.is_enabled(Level::Debug)
    }

    pub fn is_info_enabled(&self) -> bool {
        self.is_enabled(Level::Info)
    }

    pub fn is_warn_enabled(&self) -> bool {
        self.is_enabled(Level::Warn)
    }

    pub fn is_error_enabled(&self) -> bool {
        self.is_enabled(Level::Error)
    }

    /// True if not even `Error` would be emitted.
    pub fn is_logging_off(&self) -> bool {
        !self.is_enabled(Level::Error)
    }

    // --- Core entry points ---

    /// Build and emit an event at `level` if enabled.
    ///
    /// `build` runs only after the gate has passed. A panic inside it is
    /// caught and the event is emitted with a failure message instead.
    pub fn at<F>(&self, level: Level, marker: Option<&Marker>, build: F)
    where
        F: FnOnce(&mut EventBuilder),
    {
        if !self.is_enabled(level) {
            return;
        }
        let mut builder = EventBuilder::default();
        if let Err(panic) = catch_unwind(AssertUnwindSafe(|| build(&mut builder))) {
            builder.message = Some(format!(
                "Log message invocation failed: {}",
                panic_message(&*panic)
            ));
        }
        let event = builder.into_event(
            level,
            self.name.clone(),
            marker.cloned(),
            context::current(),
        );
        self.dispatch.deliver(&event);
    }

    /// Emit `message()` at `level` if enabled.
    pub fn log<M, F>(&self, level: Level, message: F)
    where
        M: Display,
        F: FnOnce() -> M,
    {
        self.at(level, None, |event| {
            event.message(message());
        });
    }

    /// Emit `message()` at `level` with `cause` attached.
    pub fn log_with_cause<M, F>(&self, level: Level, cause: &(dyn Error + 'static), message: F)
    where
        M: Display,
        F: FnOnce() -> M,
    {
        self.at(level, None, |event| {
            event.message(message()).cause(cause);
        });
    }

    // --- Per-level shorthands ---

    pub fn trace<M: Display>(&self, message: impl FnOnce() -> M) {
        self.log(Level::Trace, message)
    }

    pub fn debug<M: Display>(&self, message: impl FnOnce() -> M) {
        self.log(Level::Debug, message)
    }

    pub fn info<M: Display>(&self, message: impl FnOnce() -> M) {
        self.log(Level::Info, message)
    }

    pub fn warn<M: Display>(&self, message: impl FnOnce() -> M) {
        self.log(Level::Warn, message)
    }

    pub fn error<M: Display>(&self, message: impl FnOnce() -> M) {
        self.log(Level::Error, message)
    }

    pub fn trace_with_cause<M: Display>(
        &self,
        cause: &(dyn Error + 'static),
        message: impl FnOnce() -> M,
    ) {
        self.log_with_cause(Level::Trace, cause, message)
    }

    pub fn debug_with_cause<M: Display>(
        &self,
        cause: &(dyn Error + 'static),
        message: impl FnOnce() -> M,
    ) {
        self.log_with_cause(Level::Debug, cause, message)
    }

    pub fn info_with_cause<M: Display>(
        &self,
        cause: &(dyn Error + 'static),
        message: impl FnOnce() -> M,
    ) {
        self.log_with_cause(Level::Info, cause, message)
    }

    pub fn warn_with_cause<M: Display>(
        &self,
        cause: &(dyn Error + 'static),
        message: impl FnOnce() -> M,
    ) {
        self.log_with_cause(Level::Warn, cause, message)
    }

    pub fn error_with_cause<M: Display>(
        &self,
        cause: &(dyn Error + 'static),
        message: impl FnOnce() -> M,
    ) {
        self.log_with_cause(Level::Error, cause, message)
    }

    // --- Method tracing helpers ---

    /// Trace `entry(arg, ...)`.
    pub fn entry(&self, arguments: &[&dyn Debug]) {
        self.trace(|| {
            let args: Vec<String> = arguments.iter().map(|a| format!("{:?}", a)).collect();
            format!("entry({})", args.join(", "))
        })
    }

    /// Trace `exit`.
    pub fn exit(&self) {
        self.trace(|| "exit")
    }

    /// Trace `exit(result)` and hand the result back.
    pub fn exit_with<T: Debug>(&self, result: T) -> T {
        self.trace(|| format!("exit({:?})", result));
        result
    }

    /// Log `throwing(err)` at error with the cause attached, and hand the
    /// error back for returning.
    pub fn throwing<E: Error + 'static>(&self, err: E) -> E {
        self.at(Level::Error, None, |event| {
            event.message(format!("throwing({})", err)).cause(&err);
        });
        err
    }

    /// Log `catching(err)` at error with the cause attached.
    pub fn catching(&self, err: &(dyn Error + 'static)) {
        self.at(Level::Error, None, |event| {
            event.message(format!("catching({})", err));
            event.cause = Some(Cause::from_error(err));
        });
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger")
            .field("name", &self.name)
            .field("level", &self.threshold.load())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};
    use std::io;
    use crate::backend::MemoryBackend;
    use crate::context::LogContext;

    fn logger(threshold: Level) -> (Logger, MemoryBackend) {
        let backend = MemoryBackend::new();
        let dispatch = Arc::new(Dispatch::new(Box::new(backend.clone())));
        (Logger::new("test.logger", threshold, dispatch), backend)
    }

    #[test]
    fn test_producer_not_called_below_threshold() {
        let (logger, backend) = logger(Level::Info);
        let calls = Cell::new(0);
        logger.debug(|| {
            calls.set(calls.get() + 1);
            "hidden"
        });
        logger.trace(|| {
            calls.set(calls.get() + 1);
            "hidden"
        });
        assert_eq!(calls.get(), 0);
        assert!(backend.is_empty());
    }

    #[test]
    fn test_one_event_per_enabled_call() {
        let (logger, backend) = logger(Level::Trace);
        for level in Level::ALL {
            logger.log(level, || format!("at {}", level));
        }
        let events = backend.events();
        assert_eq!(events.len(), 5);
        assert_eq!(events[2].message(), "at INFO");
        assert_eq!(&*events[4].logger_name, "test.logger");
    }

    #[test]
    fn test_off_threshold() {
        let (logger, backend) = logger(Level::Off);
        assert!(logger.is_logging_off());
        logger.error(|| "nope");
        assert!(backend.is_empty());
    }

    #[test]
    fn test_set_level() {
        let (logger, backend) = logger(Level::Error);
        logger.warn(|| "dropped");
        logger.set_level(Level::Warn);
        assert!(logger.is_warn_enabled());
        logger.warn(|| "kept");
        assert_eq!(backend.messages(), vec!["kept".to_string()]);
    }

    #[test]
    fn test_panicking_producer() {
        let (logger, backend) = logger(Level::Info);
        logger.info(|| -> String { panic!("boom") });
        assert_eq!(backend.messages(), vec!["Log message invocation failed: boom".to_string()]);
    }

    #[test]
    fn test_at_builder_with_marker() {
        let (logger, backend) = logger(Level::Info);
        let marker = Marker::new("AUDIT");
        logger.at(Level::Info, Some(&marker), |event| {
            event.message("login").field("user", "ada");
        });
        let events = backend.events();
        assert_eq!(events[0].marker.as_ref().map(Marker::name), Some("AUDIT"));
        assert_eq!(events[0].payload.get("user").map(String::as_str), Some("ada"));
    }

    #[test]
    fn test_cause_attached() {
        let (logger, backend) = logger(Level::Info);
        let err = io::Error::new(io::ErrorKind::Other, "disk gone");
        logger.error_with_cause(&err, || "save failed");
        let events = backend.events();
        assert_eq!(events[0].cause.as_ref().map(Cause::message), Some("disk gone"));
    }

    #[test]
    fn test_context_captured() {
        let (logger, backend) = logger(Level::Info);
        let _guard = context::enter(LogContext::from_fields([("trace_id", "t-9")]));
        logger.info(|| "with context");
        assert_eq!(backend.events()[0].context.get("trace_id"), Some("t-9"));
    }

    #[test]
    fn test_entry_exit_helpers() {
        let (logger, backend) = logger(Level::Trace);
        logger.entry(&[&1, &"two"]);
        let value = logger.exit_with(42);
        logger.exit();
        assert_eq!(value, 42);
        assert_eq!(
            backend.messages(),
            vec![
                "entry(1, \"two\")".to_string(),
                "exit(42)".to_string(),
                "exit".to_string()
            ]
        );
    }

    #[test]
    fn test_throwing_and_catching() {
        let (logger, backend) = logger(Level::Info);
        let err = logger.throwing(io::Error::new(io::ErrorKind::NotFound, "missing"));
        assert_eq!(err.kind(), io::ErrorKind::NotFound);
        logger.catching(&err);
        let events = backend.events();
        assert_eq!(events[0].message(), "throwing(missing)");
        assert_eq!(events[1].message(), "catching(missing)");
        assert!(events.iter().all(|e| e.level == Level::Error && e.cause.is_some()));
    }

    #[test]
    fn test_cause_at_every_level() {
        let (logger, backend) = logger(Level::Trace);
        let err = io::Error::new(io::ErrorKind::Other, "flaky");
        logger.trace_with_cause(&err, || "t");
        logger.debug_with_cause(&err, || "d");
        logger.info_with_cause(&err, || "i");
        logger.warn_with_cause(&err, || "w");
        logger.error_with_cause(&err, || "e");
        let events = backend.events();
        let levels: Vec<Level> = events.iter().map(|e| e.level).collect();
        assert_eq!(levels, Level::ALL.to_vec());
        assert!(events
            .iter()
            .all(|e| e.cause.as_ref().map(Cause::message) == Some("flaky")));
    }

    struct LogsOnDrop(RefCell<Option<Logger>>);

    impl Drop for LogsOnDrop {
        fn drop(&mut self) {
            if let Some(logger) = self.0.get_mut().take() {
                logger.info(|| "from destructor");
            }
        }
    }

    thread_local! {
        static ON_EXIT: LogsOnDrop = LogsOnDrop(RefCell::new(None));
    }

    #[test]
    fn test_log_from_thread_local_destructor() {
        let (logger, backend) = logger(Level::Info);
        std::thread::spawn(move || {
            // Registered before the context slot, so destroyed after it.
            ON_EXIT.with(|slot| *slot.0.borrow_mut() = Some(logger));
            ON_EXIT.with(|slot| {
                if let Some(logger) = slot.0.borrow().as_ref() {
                    logger.info(|| "before exit");
                }
            });
        })
        .join()
        .unwrap();
        assert_eq!(
            backend.messages(),
            vec!["before exit".to_string(), "from destructor".to_string()]
        );
    }
}
