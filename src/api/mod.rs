//! Call-site API: levels, markers, events and loggers.

pub mod event;
pub mod level;
pub mod logger;
pub mod macros;
pub mod marker;

pub use event::{Cause, EventBuilder, LogEvent};
pub use level::{AtomicLevel, Level, ParseLevelError};
pub use logger::Logger;
pub use marker::Marker;
