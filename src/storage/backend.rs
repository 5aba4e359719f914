//! Key-value backend abstraction.
//!
//! This module defines the [`KeyValueStore`] trait the favorites and theme
//! stores are written against. Stores receive a boxed backend at construction
//! so tests can hand them a [`MemoryStore`] while the plugin uses
//! [`crate::storage::FileKeyValueStore`].
//!
//! Values are opaque strings; each store owns the serialization of its own key.

use crate::domain::error::Result;
use std::collections::HashMap;

/// String-keyed persistent storage.
///
/// # Implementations
///
/// - [`crate::storage::FileKeyValueStore`]: one JSON file per key, atomic writes
/// - [`MemoryStore`]: process-local map, used in tests
///
/// # Examples
///
/// ```
/// use mums::storage::{KeyValueStore, MemoryStore};
///
/// let mut store = MemoryStore::default();
/// store.set("mums_theme", "dark")?;
/// assert_eq!(store.get("mums_theme")?.as_deref(), Some("dark"));
/// # Ok::<(), mums::MumsError>(())
/// ```
pub trait KeyValueStore: Send {
    /// Reads the value stored under `key`.
    ///
    /// Returns `Ok(None)` when nothing has been stored yet.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>>;

    /// Replaces the value stored under `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the write fails. Implementations must not leave a
    /// partially written value behind.
    fn set(&mut self, key: &str, value: &str) -> Result<()>;

    /// Removes the value stored under `key`. Removing a missing key is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend refuses the removal.
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// In-memory backend.
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    values: HashMap<String, String>,
}

impl MemoryStore {
    /// Creates a store pre-populated with one value.
    #[must_use]
    pub fn with_value(key: &str, value: &str) -> Self {
        let mut values = HashMap::new();
        values.insert(key.to_string(), value.to_string());
        Self { values }
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}
