//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Check logger override names
//! - Detect settings that the selected backend will ignore
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: FacadeConfig → Result<(), Vec<ValidationError>>
//! - Ignored settings are warnings, not errors

use thiserror::Error;

use crate::config::schema::{BackendKind, DirectConfig, FacadeConfig};

/// A semantic problem in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("logger override with an empty name")]
    EmptyLoggerName,

    #[error("logger override '{0}' contains whitespace")]
    WhitespaceInLoggerName(String),

    #[error("logger override '{0}' ends with a separator")]
    TrailingSeparator(String),
}

/// Check `config`, collecting every error.
pub fn validate_config(config: &FacadeConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    let mut names: Vec<&String> = config.loggers.keys().collect();
    names.sort();
    for name in names {
        if name.is_empty() {
            errors.push(ValidationError::EmptyLoggerName);
        } else if name.chars().any(char::is_whitespace) {
            errors.push(ValidationError::WhitespaceInLoggerName(name.clone()));
        } else if name.ends_with('.') || name.ends_with(':') {
            errors.push(ValidationError::TrailingSeparator(name.clone()));
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// True when `[direct]` was customized but another backend is selected, so
/// those settings have no effect.
pub fn direct_settings_ignored(config: &FacadeConfig) -> bool {
    config.backend != BackendKind::Direct && config.direct != DirectConfig::default()
}
