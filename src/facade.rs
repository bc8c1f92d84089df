//! A configured facade: one backend slot, one logger registry.

use arc_swap::ArcSwap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use crate::backend::{self, Backend};
use crate::config::{validate_config, ConfigError, FacadeConfig};
use crate::api::{Level, Logger};
use crate::dispatch::{DeliveryStats, Dispatch, LevelTable, LoggerRegistry};

/// Owns the installed backend and every logger handed out.
///
/// Most programs use the process-global facade (`lazylog::init`,
/// `lazylog::logger`); separate instances are useful for tests and for
/// embedding.
#[derive(Debug)]
pub struct Facade {
    dispatch: Arc<Dispatch>,
    registry: LoggerRegistry,
    config: ArcSwap<FacadeConfig>,
    /// Set while a backend installed by hand (not built from config) is active.
    custom_backend: AtomicBool,
}

impl Facade {
    /// Validate `config` and build the facade it describes.
    pub fn new(config: FacadeConfig) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;
        Ok(Self::from_valid(config))
    }

    pub(crate) fn from_valid(config: FacadeConfig) -> Self {
        let backend = backend::from_config(&config);
        let levels = LevelTable::from_config(config.level, &config.loggers);
        Self {
            dispatch: Arc::new(Dispatch::new(backend)),
            registry: LoggerRegistry::new(levels),
            config: ArcSwap::from_pointee(config),
            custom_backend: AtomicBool::new(false),
        }
    }

    /// A facade routing to `backend` with `level` as the root threshold.
    pub fn with_backend<B: Backend + 'static>(backend: B, level: Level) -> Self {
        let config = FacadeConfig {
            level,
            ..FacadeConfig::default()
        };
        Self {
            dispatch: Arc::new(Dispatch::new(Box::new(backend))),
            registry: LoggerRegistry::new(LevelTable::new(level)),
            config: ArcSwap::from_pointee(config),
            custom_backend: AtomicBool::new(true),
        }
    }

    /// The logger named `name`; the same instance is returned on every call.
    pub fn logger(&self, name: &str) -> Arc<Logger> {
        self.registry.get_or_create(name, &self.dispatch)
    }

    /// Route every logger, existing and future, to `backend`.
    pub fn install<B: Backend + 'static>(&self, backend: B) {
        self.install_boxed(Box::new(backend));
    }

    pub fn install_boxed(&self, backend: Box<dyn Backend>) {
        self.dispatch.install(backend);
        self.custom_backend.store(true, Ordering::Release);
    }

    /// True while the active backend was installed by hand rather than built
    /// from the configuration.
    pub fn has_custom_backend(&self) -> bool {
        self.custom_backend.load(Ordering::Acquire)
    }

    /// Apply a new configuration.
    ///
    /// Levels are always re-applied (overwriting explicit `set_level` calls).
    /// The backend is rebuilt only when the backend selection changed, or
    /// when the `[direct]` settings changed and the active backend was built
    /// from config. A hand-installed backend survives reloads that keep the
    /// same selection.
    pub fn reconfigure(&self, config: FacadeConfig) -> Result<(), ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;
        let previous = self.config.load_full();

        let selection_changed = previous.backend != config.backend;
        let direct_changed = previous.direct != config.direct;
        if selection_changed || (direct_changed && !self.has_custom_backend()) {
            self.dispatch.install(backend::from_config(&config));
            self.custom_backend.store(false, Ordering::Release);
        }
        self.registry
            .apply(LevelTable::from_config(config.level, &config.loggers));

        tracing::info!(
            backend = config.backend.as_str(),
            level = %config.level,
            overrides = config.loggers.len(),
            "Facade reconfigured"
        );
        self.config.store(Arc::new(config));
        Ok(())
    }

    /// Override the threshold for every logger under `prefix`.
    pub fn set_level(&self, prefix: &str, level: Level) {
        self.registry.set_override(prefix, level);
    }

    /// Threshold a logger named `name` gets from the level table.
    pub fn level_for(&self, name: &str) -> Level {
        self.registry.resolve(name)
    }

    pub fn backend_name(&self) -> &'static str {
        self.dispatch.backend_name()
    }

    /// The configuration last applied.
    ///
    /// Its `backend` is the configured selection; with a hand-installed
    /// backend active, `backend_name` reports what actually receives events.
    pub fn config(&self) -> Arc<FacadeConfig> {
        self.config.load_full()
    }

    pub fn stats(&self) -> DeliveryStats {
        self.dispatch.stats()
    }

    pub fn logger_names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Flush the installed backend.
    pub fn flush(&self) {
        self.dispatch.flush();
    }
}
