//! Immutable context snapshots.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;
use serde::{Serialize, Serializer};

/// An immutable set of key/value pairs stamped onto log events.
///
/// Cloning is an `Arc` bump; `with` and `merge` copy on write and leave the
/// original untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogContext {
    fields: Option<Arc<BTreeMap<String, String>>>,
}

impl LogContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a context from key/value pairs.
    pub fn from_fields<I, K, V>(fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self::default().with_all(fields)
    }

    pub fn is_empty(&self) -> bool {
        self.fields.as_ref().map_or(true, |f| f.is_empty())
    }

    pub fn len(&self) -> usize {
        self.fields.as_ref().map_or(0, |f| f.len())
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.as_ref()?.get(key).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields
            .iter()
            .flat_map(|f| f.iter())
            .map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Return a new context with `key` set to `value`.
    pub fn with(&self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.with_all([(key, value)])
    }

    /// Return a new context with every pair in `fields` set.
    pub fn with_all<I, K, V>(&self, fields: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut map = self.fields.as_deref().cloned().unwrap_or_default();
        for (k, v) in fields {
            map.insert(k.into(), v.into());
        }
        Self::wrap(map)
    }

    /// Overlay `other` on top of `self`; keys in `other` win.
    pub fn merge(&self, other: &LogContext) -> Self {
        if other.is_empty() {
            return self.clone();
        }
        if self.is_empty() {
            return other.clone();
        }
        self.with_all(other.iter())
    }

    fn wrap(map: BTreeMap<String, String>) -> Self {
        if map.is_empty() {
            Self::default()
        } else {
            Self {
                fields: Some(Arc::new(map)),
            }
        }
    }
}

impl fmt::Display for LogContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("{")?;
        for (i, (k, v)) in self.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "{}={}", k, v)?;
        }
        f.write_str("}")
    }
}

impl Serialize for LogContext {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(self.iter())
    }
}
