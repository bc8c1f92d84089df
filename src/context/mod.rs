//! Structured context propagation.
//!
//! # Data Flow
//! ```text
//! scope(ctx, future) / future.with_log_context(ctx)
//!     → task-local slot, lives as long as the future
//! enter(ctx) (sync code)
//!     → thread-local slot, restored when the guard drops
//!
//! Logger materializes an event:
//!     → current() = task context overlaid by thread context
//!     → snapshot stored on LogEvent.context
//! ```
//!
//! # Design Decisions
//! - Snapshots are immutable; capture is an `Arc` clone and never blocks
//! - Task context rides on tokio task-locals, so it follows the future across
//!   worker threads on a multi-threaded runtime
//! - Spawned tasks do not inherit context unless spawned via `spawn`

pub mod propagation;
pub mod snapshot;

pub use propagation::{current, enter, scope, scope_with, spawn, ContextGuard, WithLogContext};
pub use snapshot::LogContext;
