//! Threshold resolution for logger names.
//!
//! # Design Decisions
//! - Overrides match on name segments: `app` covers `app.db` and `app::db`
//!   but not `application`
//! - Longest matching prefix wins; the root level applies otherwise
//! - Tables are immutable; reconfiguration builds a new one

use std::collections::HashMap;

use crate::api::Level;

/// Root threshold plus per-prefix overrides.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LevelTable {
    root: Level,
    /// Sorted longest prefix first.
    overrides: Vec<(String, Level)>,
}

impl LevelTable {
    pub fn new(root: Level) -> Self {
        Self {
            root,
            overrides: Vec::new(),
        }
    }

    pub fn from_config(root: Level, overrides: &HashMap<String, Level>) -> Self {
        let mut table = Self::new(root);
        for (prefix, level) in overrides {
            table.insert(prefix.clone(), *level);
        }
        table
    }

    pub fn root(&self) -> Level {
        self.root
    }

    /// Add or replace the override for `prefix`.
    pub fn insert(&mut self, prefix: String, level: Level) {
        self.overrides.retain(|(p, _)| *p != prefix);
        self.overrides.push((prefix, level));
        self.overrides
            .sort_by(|a, b| b.0.len().cmp(&a.0.len()).then_with(|| a.0.cmp(&b.0)));
    }

    /// Effective threshold for `name`.
    pub fn resolve(&self, name: &str) -> Level {
        self.overrides
            .iter()
            .find(|(prefix, _)| covers(prefix, name))
            .map(|(_, level)| *level)
            .unwrap_or(self.root)
    }
}

fn covers(prefix: &str, name: &str) -> bool {
    match name.strip_prefix(prefix) {
        Some("") => true,
        Some(rest) => rest.starts_with('.') || rest.starts_with("::"),
        None => false,
    }
}
