//! Named markers for tagging events.

use std::fmt;
use std::sync::Arc;
use serde::{Serialize, Serializer};

/// A named tag attached to a log event (e.g. `AUDIT`, `SECURITY`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Marker {
    name: Arc<str>,
}

impl Marker {
    pub fn new(name: impl Into<Arc<str>>) -> Self {
        Self { name: name.into() }
    }

    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for Marker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl Serialize for Marker {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.name)
    }
}
