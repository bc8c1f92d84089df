//! Lifecycle management subsystem.
//!
//! # Data Flow
//! ```text
//! Startup (startup.rs):
//!     Load config → Validate → Install into global facade → Announce backend
//!
//! Shutdown (shutdown.rs):
//!     FlushGuard dropped → Flush installed backend
//! ```
//!
//! # Design Decisions
//! - The global facade exists from the first `logger()` call; `init` only
//!   reconfigures it, so early loggers are never stranded
//! - Startup announcement happens at most once per process

pub mod shutdown;
pub mod startup;

pub use shutdown::FlushGuard;
pub use startup::{global, init, init_with_env};
