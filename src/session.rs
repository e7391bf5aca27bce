//! Sessions
//!
//! A session is an opaque per-caller key-value region. The cart reads and
//! overwrites its own key wholesale and flags the session as modified so the
//! owning store knows to persist it.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Session handle.
pub trait Session {
    /// Value stored under `key`, if any.
    fn get(&self, key: &str) -> Option<&Value>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&mut self, key: &str, value: Value);

    /// Flag the session as needing to be saved.
    fn mark_modified(&mut self);
}

/// Session data held in memory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MemorySession {
    values: FxHashMap<String, Value>,

    #[serde(skip)]
    modified: bool,
}

impl MemorySession {
    /// Create an empty, unmodified session.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether [`Session::mark_modified`] has been called since creation or
    /// the last [`MemorySession::take_modified`].
    #[must_use]
    pub fn is_modified(&self) -> bool {
        self.modified
    }

    /// Return and clear the modified flag.
    pub fn take_modified(&mut self) -> bool {
        std::mem::take(&mut self.modified)
    }
}

impl Session for MemorySession {
    fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    fn set(&mut self, key: &str, value: Value) {
        self.values.insert(key.to_string(), value);
    }

    fn mark_modified(&mut self) {
        self.modified = true;
    }
}
