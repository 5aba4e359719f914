//! File-backed key-value store.
//!
//! Each key is stored as `<dir>/<key>.json`, holding the value written by the
//! owning store verbatim. Writes go to a temporary sibling first and are renamed
//! into place so a crash never leaves a truncated value.
//!
//! # File Layout
//!
//! ```text
//! /host/.local/share/zellij/mums/
//! ├── recipe_favorites_v1.json   {"52772":{"idMeal":"52772",...}}
//! ├── mums_theme.json            "dark"
//! └── mums-otlp.json             trace export
//! ```

use crate::domain::error::{MumsError, Result};
use crate::storage::backend::KeyValueStore;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Key-value backend writing one file per key inside a data directory.
///
/// # Thread Safety
///
/// `Send` but not `Sync`: a single plugin instance owns the directory.
///
/// # Examples
///
/// ```no_run
/// use mums::storage::{FileKeyValueStore, KeyValueStore};
/// use std::path::PathBuf;
///
/// let mut store = FileKeyValueStore::new(PathBuf::from("/tmp/mums"))?;
/// store.set("mums_theme", "\"light\"")?;
/// # Ok::<(), mums::MumsError>(())
/// ```
#[derive(Debug, Clone)]
pub struct FileKeyValueStore {
    dir: PathBuf,
}

impl FileKeyValueStore {
    /// Opens (and creates if needed) the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: PathBuf) -> Result<Self> {
        tracing::debug!(path = ?dir, "initializing file key-value store");
        std::fs::create_dir_all(&dir)?;
        Ok(Self { dir })
    }

    /// Directory holding the value files.
    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(MumsError::Storage(format!("invalid storage key: {key:?}")));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let _span = tracing::debug_span!("kv_get", key = %key).entered();

        let path = self.path_for(key)?;
        match std::fs::read_to_string(&path) {
            Ok(contents) => {
                tracing::trace!(bytes = contents.len(), "value read");
                Ok(Some(contents))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                tracing::trace!("no stored value");
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let _span = tracing::debug_span!("kv_set", key = %key, bytes = value.len()).entered();

        let path = self.path_for(key)?;
        let tmp_path = path.with_extension("json.tmp");

        tracing::trace!(tmp_path = ?tmp_path, "writing to temporary file");
        std::fs::write(&tmp_path, value)?;

        tracing::trace!("renaming temporary file to final location");
        std::fs::rename(&tmp_path, &path)?;

        tracing::debug!("value saved");
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        let _span = tracing::debug_span!("kv_remove", key = %key).entered();

        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn round_trips_values_through_files() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileKeyValueStore::new(dir.path().join("nested")).unwrap();

        assert_eq!(store.get("mums_theme").unwrap(), None);
        store.set("mums_theme", "\"dark\"").unwrap();
        assert_eq!(store.get("mums_theme").unwrap().as_deref(), Some("\"dark\""));

        let on_disk = std::fs::read_to_string(dir.path().join("nested/mums_theme.json")).unwrap();
        assert_eq!(on_disk, "\"dark\"");
    }

    #[test]
    fn write_leaves_no_temporary_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileKeyValueStore::new(dir.path().to_path_buf()).unwrap();

        store.set("recipe_favorites_v1", "{}").unwrap();
        store.set("recipe_favorites_v1", "{\"1\":{}}").unwrap();

        let names: Vec<_> = std::fs::read_dir(dir.path())
            .unwrap()
            .map(|entry| entry.unwrap().file_name().into_string().unwrap())
            .collect();
        assert_eq!(names, vec!["recipe_favorites_v1.json".to_string()]);
    }

    #[test]
    fn rejects_keys_that_escape_the_directory() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileKeyValueStore::new(dir.path().to_path_buf()).unwrap();

        assert!(matches!(store.set("../evil", "x"), Err(MumsError::Storage(_))));
        assert!(store.get("").is_err());
    }

    #[test]
    fn removing_missing_key_is_ok() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileKeyValueStore::new(dir.path().to_path_buf()).unwrap();

        store.remove("mums_theme").unwrap();
        store.set("mums_theme", "\"light\"").unwrap();
        store.remove("mums_theme").unwrap();
        assert_eq!(store.get("mums_theme").unwrap(), None);
    }
}
