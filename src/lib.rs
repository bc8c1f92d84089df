//! lazylog: a lightweight logging facade.
//!
//! Call sites hold a named `Logger` and issue level-gated, lazily evaluated
//! log calls; the facade routes each event that passes the gate to one
//! swappable backend.
//!
//! ```ignore
//! let log = lazylog::logger!();
//! log.info(|| format!("cache warmed in {:?}", elapsed));
//!
//! lazylog::context::scope_with([("trace_id", id)], async {
//!     lazylog::info!(log, "handling request");
//! }).await;
//! ```

pub mod api;
pub mod backend;
pub mod config;
pub mod context;
pub mod dispatch;
pub mod facade;
pub mod lifecycle;
pub mod observability;

use std::sync::Arc;

pub use api::{Cause, EventBuilder, Level, LogEvent, Logger, Marker};
pub use backend::{Backend, BackendError, MemoryBackend};
pub use config::{ConfigError, FacadeConfig};
pub use context::{LogContext, WithLogContext};
pub use facade::Facade;
pub use lifecycle::{global, init, init_with_env, FlushGuard};

/// The logger named `name` from the global facade.
pub fn logger(name: &str) -> Arc<Logger> {
    global().logger(name)
}
