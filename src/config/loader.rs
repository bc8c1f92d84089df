//! Configuration loading from disk and environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::{BackendKind, FacadeConfig};
use crate::config::validation::{validate_config, ValidationError};
use crate::api::Level;

/// Overrides `backend` (direct, log, tracing, off).
pub const BACKEND_ENV: &str = "LAZYLOG_BACKEND";
/// Overrides the root `level`.
pub const LEVEL_ENV: &str = "LAZYLOG_LEVEL";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid environment variable {name}: {reason}")]
    Env { name: &'static str, reason: String },

    #[error("Validation failed: {}", join(.0))]
    Validation(Vec<ValidationError>),
}

fn join(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Parse and validate configuration from TOML text.
pub fn parse_config(content: &str) -> Result<FacadeConfig, ConfigError> {
    let config: FacadeConfig = toml::from_str(content)?;
    validate_config(&config).map_err(ConfigError::Validation)?;
    Ok(config)
}

/// Load and validate configuration from a TOML file.
pub fn load_config(path: &Path) -> Result<FacadeConfig, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse_config(&content)
}

/// Apply environment overrides read through `lookup`.
pub fn apply_overrides<F>(config: &mut FacadeConfig, lookup: F) -> Result<(), ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(value) = lookup(BACKEND_ENV) {
        config.backend = value
            .parse::<BackendKind>()
            .map_err(|reason| ConfigError::Env {
                name: BACKEND_ENV,
                reason,
            })?;
    }
    if let Some(value) = lookup(LEVEL_ENV) {
        config.level = value.parse::<Level>().map_err(|e| ConfigError::Env {
            name: LEVEL_ENV,
            reason: e.to_string(),
        })?;
    }
    Ok(())
}

/// Apply `LAZYLOG_BACKEND` and `LAZYLOG_LEVEL` from the process environment.
pub fn apply_env(config: &mut FacadeConfig) -> Result<(), ConfigError> {
    apply_overrides(config, |name| std::env::var(name).ok())
}

/// Defaults plus environment overrides.
pub fn from_env() -> Result<FacadeConfig, ConfigError> {
    let mut config = FacadeConfig::default();
    apply_env(&mut config)?;
    Ok(config)
}
