//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize, env overrides)
//!     → validation.rs (semantic checks)
//!     → FacadeConfig (validated, immutable)
//!     → Facade::new / Facade::reconfigure
//!
//! On file change:
//!     watcher.rs detects change
//!     → loader.rs loads new config
//!     → validation.rs validates
//!     → sent on a channel; the owner calls Facade::reconfigure
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; changes require full reload
//! - All fields have defaults to allow minimal configs
//! - Environment (LAZYLOG_BACKEND, LAZYLOG_LEVEL) overrides the file

pub mod loader;
pub mod schema;
pub mod validation;
pub mod watcher;

pub use loader::{load_config, parse_config, ConfigError};
pub use schema::{BackendKind, DirectConfig, DirectFormat, FacadeConfig};
pub use validation::{validate_config, ValidationError};
pub use watcher::ConfigWatcher;
