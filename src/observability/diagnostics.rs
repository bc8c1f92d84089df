//! Subscriber setup for the crate's own diagnostics.
//!
//! # Design Decisions
//! - The library only emits `tracing` events; binaries decide where they go
//! - `try_init` also installs the `log` → `tracing` bridge, so the `log`
//!   backend shows up in the same output

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Install a global fmt subscriber filtered by `RUST_LOG`, falling back to
/// `default_filter`. Returns false if a subscriber was already installed.
pub fn init_tracing(default_filter: &str) -> bool {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter)),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init()
        .is_ok()
}
