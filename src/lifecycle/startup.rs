//! The process-global facade.
//!
//! # Responsibilities
//! - Lazily build the global facade from the environment on first use
//! - Install an explicit configuration via `init`, rerouting loggers that
//!   were handed out before it
//! - Announce the active backend once per process

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

use crate::config::loader::{self, ConfigError};
use crate::config::validation::direct_settings_ignored;
use crate::config::{validate_config, FacadeConfig};
use crate::facade::Facade;

/// Name of the logger used for the facade's own announcements.
pub const STARTUP_LOGGER: &str = "lazylog";

static GLOBAL: OnceLock<Facade> = OnceLock::new();
static ANNOUNCED: AtomicBool = AtomicBool::new(false);

/// The global facade, built from defaults plus `LAZYLOG_*` environment
/// overrides if `init` has not run yet.
pub fn global() -> &'static Facade {
    GLOBAL.get_or_init(|| {
        let config = loader::from_env().unwrap_or_else(|e| {
            eprintln!("lazylog: [WARN] {}. Falling back to defaults.", e);
            FacadeConfig::default()
        });
        Facade::from_valid(config)
    })
}

/// Install `config` into the global facade.
///
/// May be called more than once; each call reconfigures the same facade, so
/// loggers obtained earlier follow the new backend and levels.
pub fn init(config: FacadeConfig) -> Result<&'static Facade, ConfigError> {
    validate_config(&config).map_err(ConfigError::Validation)?;

    let mut created = false;
    let facade = GLOBAL.get_or_init(|| {
        created = true;
        Facade::from_valid(config.clone())
    });
    if !created {
        facade.reconfigure(config.clone())?;
    }

    if direct_settings_ignored(&config) {
        eprintln!(
            "lazylog: [WARN] [direct] settings are configured but the active backend is '{}'. They will be ignored.",
            config.backend.as_str()
        );
    }
    if config.log_startup_message {
        announce(facade);
    }
    Ok(facade)
}

/// `init` with the environment applied on top of `config`.
pub fn init_with_env(mut config: FacadeConfig) -> Result<&'static Facade, ConfigError> {
    loader::apply_env(&mut config)?;
    init(config)
}

fn announce(facade: &Facade) {
    if ANNOUNCED.swap(true, Ordering::Relaxed) {
        return;
    }
    let backend = facade.backend_name();
    facade
        .logger(STARTUP_LOGGER)
        .info(|| format!("lazylog: initializing... active backend: {}", backend));
}
