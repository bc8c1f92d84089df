//! Configuration schema definitions.
//!
//! All types derive Serde traits for deserialization from TOML files, and
//! every field has a default so an empty file is a valid configuration.

use std::collections::HashMap;
use serde::{Deserialize, Serialize};

use crate::backend::ConsoleTarget;
use crate::api::Level;

/// Root configuration for a facade.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct FacadeConfig {
    /// Which backend receives events.
    pub backend: BackendKind,

    /// Root threshold for loggers without an override.
    pub level: Level,

    /// Per-logger threshold overrides, keyed by name prefix.
    pub loggers: HashMap<String, Level>,

    /// Emit a one-time info event when the global facade is initialized.
    pub log_startup_message: bool,

    /// Settings for the direct backend; ignored by the others.
    pub direct: DirectConfig,
}

impl Default for FacadeConfig {
    fn default() -> Self {
        Self {
            backend: BackendKind::Direct,
            level: Level::Info,
            loggers: HashMap::new(),
            log_startup_message: true,
            direct: DirectConfig::default(),
        }
    }
}

/// Backend selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Format and write events ourselves.
    #[default]
    Direct,
    /// Forward to the `log` crate.
    Log,
    /// Forward to `tracing`.
    Tracing,
    /// Discard everything.
    Off,
}

impl BackendKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            BackendKind::Direct => "direct",
            BackendKind::Log => "log",
            BackendKind::Tracing => "tracing",
            BackendKind::Off => "off",
        }
    }
}

impl std::str::FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "direct" => Ok(BackendKind::Direct),
            "log" => Ok(BackendKind::Log),
            "tracing" => Ok(BackendKind::Tracing),
            "off" => Ok(BackendKind::Off),
            other => Err(format!(
                "unknown backend '{}' (expected direct, log, tracing or off)",
                other
            )),
        }
    }
}

/// Output format of the direct backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DirectFormat {
    #[default]
    Text,
    Json,
}

/// Direct backend configuration.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DirectConfig {
    /// Floor applied by the backend after each logger's own threshold.
    ///
    /// Defaults to `Trace` so the root `level` (default `Info`) alone decides
    /// what the direct backend prints.
    pub level: Level,

    pub format: DirectFormat,

    /// Prefix text lines with `LEVEL: [logger] `.
    pub include_prefix: bool,

    pub target: ConsoleTarget,
}

impl Default for DirectConfig {
    fn default() -> Self {
        Self {
            level: Level::Trace,
            format: DirectFormat::Text,
            include_prefix: true,
            target: ConsoleTarget::Split,
        }
    }
}
