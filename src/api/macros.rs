//! Format-string macros over `Logger`.
//!
//! The format arguments are evaluated inside the message closure, so they
//! cost nothing when the level is disabled.
//!
//! ```ignore
//! let log = lazylog::logger!();
//! lazylog::info!(log, "listening on {}", addr);
//! lazylog::error!(log, cause: &err, "request {} failed", id);
//! ```

/// Log at an explicit level.
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, cause: $cause:expr, $($arg:tt)+) => {
        $logger.log_with_cause($level, $cause, || ::std::format!($($arg)+))
    };
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log($level, || ::std::format!($($arg)+))
    };
}

#[macro_export]
macro_rules! trace {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::Trace, $($rest)+)
    };
}

#[macro_export]
macro_rules! debug {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($rest)+)
    };
}

#[macro_export]
macro_rules! info {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($rest)+)
    };
}

#[macro_export]
macro_rules! warn {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::Warn, $($rest)+)
    };
}

#[macro_export]
macro_rules! error {
    ($logger:expr, $($rest:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($rest)+)
    };
}

/// The global logger named after the calling module.
#[macro_export]
macro_rules! logger {
    () => {
        $crate::logger(::std::module_path!())
    };
    ($name:expr) => {
        $crate::logger($name)
    };
}
