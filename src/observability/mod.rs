//! Observability of the facade itself.
//!
//! # Data Flow
//! ```text
//! dispatch (deliveries, failures, installs)
//!     → metrics.rs (counters via the metrics facade)
//! config watcher, dispatch (reloads, swaps)
//!     → tracing events → diagnostics.rs subscriber (binaries only)
//! ```
//!
//! # Design Decisions
//! - Backend failures never go through the failing backend; they are
//!   reported on stderr by the dispatch boundary
//! - Metric updates are cheap (no recorder means no work)

pub mod diagnostics;
pub mod metrics;
