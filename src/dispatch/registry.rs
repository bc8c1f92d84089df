//! Logger cache keyed by name.

use arc_swap::ArcSwap;
use dashmap::DashMap;
use std::sync::Arc;

use crate::api::{Level, Logger};
use crate::dispatch::{Dispatch, LevelTable};

/// Hands out one shared `Logger` per name and keeps their thresholds in sync
/// with the current `LevelTable`.
#[derive(Debug)]
pub struct LoggerRegistry {
    loggers: DashMap<String, Arc<Logger>>,
    levels: ArcSwap<LevelTable>,
}

impl LoggerRegistry {
    pub fn new(levels: LevelTable) -> Self {
        Self {
            loggers: DashMap::new(),
            levels: ArcSwap::from_pointee(levels),
        }
    }

    /// The logger named `name`, created on first use.
    pub fn get_or_create(&self, name: &str, dispatch: &Arc<Dispatch>) -> Arc<Logger> {
        if let Some(logger) = self.loggers.get(name) {
            return logger.clone();
        }
        self.loggers
            .entry(name.to_string())
            .or_insert_with(|| {
                let level = self.levels.load().resolve(name);
                Arc::new(Logger::new(name, level, dispatch.clone()))
            })
            .clone()
    }

    /// Threshold a logger named `name` would get right now.
    pub fn resolve(&self, name: &str) -> Level {
        self.levels.load().resolve(name)
    }

    pub fn levels(&self) -> Arc<LevelTable> {
        self.levels.load_full()
    }

    /// Publish a new table and re-apply it to every existing logger.
    ///
    /// Explicit `Logger::set_level` calls are overwritten.
    pub fn apply(&self, levels: LevelTable) {
        self.levels.store(Arc::new(levels));
        let table = self.levels.load();
        for entry in self.loggers.iter() {
            entry.value().set_level(table.resolve(entry.key()));
        }
    }

    /// Add or replace one override and re-apply.
    pub fn set_override(&self, prefix: &str, level: Level) {
        let mut table = LevelTable::clone(&self.levels.load());
        table.insert(prefix.to_string(), level);
        self.apply(table);
    }

    pub fn len(&self) -> usize {
        self.loggers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.loggers.is_empty()
    }

    /// Names of every logger created so far, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.loggers.iter().map(|e| e.key().clone()).collect();
        names.sort();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;

    fn dispatch() -> Arc<Dispatch> {
        Arc::new(Dispatch::new(Box::new(MemoryBackend::new())))
    }

    #[test]
    fn test_same_name_same_logger() {
        let registry = LoggerRegistry::new(LevelTable::new(Level::Info));
        let dispatch = dispatch();
        let a = registry.get_or_create("svc", &dispatch);
        let b = registry.get_or_create("svc", &dispatch);
        assert!(Arc::ptr_eq(&a, &b));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_apply_updates_existing_loggers() {
        let registry = LoggerRegistry::new(LevelTable::new(Level::Info));
        let dispatch = dispatch();
        let db = registry.get_or_create("app::db", &dispatch);
        let http = registry.get_or_create("app::http", &dispatch);
        assert_eq!(db.level(), Level::Info);

        registry.set_override("app::db", Level::Trace);
        assert_eq!(db.level(), Level::Trace);
        assert_eq!(http.level(), Level::Info);

        registry.apply(LevelTable::new(Level::Error));
        assert_eq!(db.level(), Level::Error);
        assert_eq!(http.level(), Level::Error);
    }
}
