//! Persisted favorites.
//!
//! [`FavoritesStore`] owns the user's bookmarked recipes. The set is read once
//! with [`FavoritesStore::load`] and written through to the backend on every
//! toggle after that. Toggles that happen before the load completes only touch
//! memory, so an early render can never overwrite stored favorites with an
//! empty set.
//!
//! # Stored Format
//!
//! Key `recipe_favorites_v1`, a JSON object keyed by recipe id whose member
//! order is the order favorites were added:
//!
//! ```json
//! {
//!   "52772": { "idMeal": "52772", "strMeal": "Teriyaki Chicken Casserole", "strMealThumb": "https://..." },
//!   "53013": { "idMeal": "53013", "strMeal": "Big Mac", "strMealThumb": "https://..." }
//! }
//! ```

use crate::domain::error::{MumsError, Result};
use crate::domain::FavoriteRecord;
use crate::storage::backend::KeyValueStore;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Storage key for the favorites mapping.
pub const FAVORITES_KEY: &str = "recipe_favorites_v1";

/// Insertion-ordered mapping from recipe id to record.
///
/// Serialized as a JSON object; deserialization keeps document order and lets a
/// repeated id replace the earlier record in place.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    records: Vec<FavoriteRecord>,
}

impl FavoriteSet {
    fn position(&self, id: &str) -> Option<usize> {
        self.records.iter().position(|r| r.id == id)
    }

    fn upsert(&mut self, record: FavoriteRecord) {
        match self.position(&record.id) {
            Some(index) => self.records[index] = record,
            None => self.records.push(record),
        }
    }

    #[must_use]
    pub fn contains(&self, id: &str) -> bool {
        self.position(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FavoriteRecord> {
        self.records.iter()
    }
}

impl Serialize for FavoriteSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.records.len()))?;
        for record in &self.records {
            map.serialize_entry(&record.id, record)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for FavoriteSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct SetVisitor;

        impl<'de> Visitor<'de> for SetVisitor {
            type Value = FavoriteSet;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("an object mapping recipe ids to favorite records")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<FavoriteSet, A::Error> {
                let mut set = FavoriteSet::default();
                while let Some((id, mut record)) = access.next_entry::<String, FavoriteRecord>()? {
                    // The key is authoritative for identity.
                    record.id = id;
                    set.upsert(record);
                }
                Ok(set)
            }
        }

        deserializer.deserialize_map(SetVisitor)
    }
}

/// Favorites store with an injected key-value backend.
///
/// # Examples
///
/// ```
/// use mums::domain::FavoriteRecord;
/// use mums::storage::{FavoritesStore, MemoryStore};
///
/// let mut store = FavoritesStore::new(Box::new(MemoryStore::default()));
/// store.load();
///
/// let pie = FavoriteRecord { id: "9".into(), name: "Pie".into(), thumbnail_url: String::new() };
/// assert!(store.toggle(&pie)?);
/// assert!(store.is_favorite("9"));
/// assert!(!store.toggle(&pie)?);
/// assert!(store.list().is_empty());
/// # Ok::<(), mums::MumsError>(())
/// ```
pub struct FavoritesStore {
    backend: Box<dyn KeyValueStore>,
    favorites: FavoriteSet,
    loaded: bool,
}

impl FavoritesStore {
    #[must_use]
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            favorites: FavoriteSet::default(),
            loaded: false,
        }
    }

    /// Reads the stored favorites.
    ///
    /// Missing or unreadable data yields an empty set; either way the store is
    /// marked loaded afterwards and subsequent toggles are persisted. Returns the
    /// number of favorites loaded.
    pub fn load(&mut self) -> usize {
        let _span = tracing::debug_span!("favorites_load").entered();

        self.favorites = match self.read_stored() {
            Ok(set) => set,
            Err(e) => {
                tracing::warn!(error = %e, "discarding unreadable favorites");
                FavoriteSet::default()
            }
        };
        self.loaded = true;

        tracing::debug!(count = self.favorites.len(), "favorites loaded");
        self.favorites.len()
    }

    fn read_stored(&self) -> Result<FavoriteSet> {
        let Some(raw) = self.backend.get(FAVORITES_KEY)? else {
            return Ok(FavoriteSet::default());
        };
        // A stored JSON `null` is treated like no data.
        let parsed: Option<FavoriteSet> =
            serde_json::from_str(&raw).map_err(|e| MumsError::CorruptData {
                key: FAVORITES_KEY.to_string(),
                reason: e.to_string(),
            })?;
        Ok(parsed.unwrap_or_default())
    }

    #[must_use]
    pub fn is_loaded(&self) -> bool {
        self.loaded
    }

    #[must_use]
    pub fn is_favorite(&self, id: &str) -> bool {
        self.favorites.contains(id)
    }

    /// Adds the recipe when absent, removes it when present.
    ///
    /// Returns whether the recipe is a favorite after the toggle. The in-memory
    /// set is updated even when persisting fails.
    ///
    /// # Errors
    ///
    /// Returns an error if the store is loaded and the backend write fails.
    pub fn toggle(&mut self, record: &FavoriteRecord) -> Result<bool> {
        let _span = tracing::debug_span!("favorites_toggle", id = %record.id).entered();

        let now_favorite = match self.favorites.position(&record.id) {
            Some(index) => {
                self.favorites.records.remove(index);
                false
            }
            None => {
                self.favorites.records.push(record.clone());
                true
            }
        };
        tracing::debug!(now_favorite, count = self.favorites.len(), "favorite toggled");

        if self.loaded {
            self.persist()?;
        } else {
            tracing::debug!("favorites not loaded yet, skipping write");
        }
        Ok(now_favorite)
    }

    /// All favorites in the order they were added.
    #[must_use]
    pub fn list(&self) -> Vec<FavoriteRecord> {
        self.favorites.records.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.favorites.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.favorites.is_empty()
    }

    fn persist(&mut self) -> Result<()> {
        let json = serde_json::to_string(&self.favorites)
            .map_err(|e| MumsError::Storage(format!("failed to serialize favorites: {e}")))?;
        self.backend.set(FAVORITES_KEY, &json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::backend::MemoryStore;
    use std::sync::{Arc, Mutex};

    /// Backend sharing its map with the test so writes can be observed.
    #[derive(Clone, Default)]
    struct SharedStore(Arc<Mutex<MemoryStore>>);

    impl KeyValueStore for SharedStore {
        fn get(&self, key: &str) -> Result<Option<String>> {
            self.0.lock().unwrap().get(key)
        }
        fn set(&mut self, key: &str, value: &str) -> Result<()> {
            self.0.lock().unwrap().set(key, value)
        }
        fn remove(&mut self, key: &str) -> Result<()> {
            self.0.lock().unwrap().remove(key)
        }
    }

    fn record(id: &str, name: &str) -> FavoriteRecord {
        FavoriteRecord {
            id: id.into(),
            name: name.into(),
            thumbnail_url: format!("https://img/{id}.jpg"),
        }
    }

    #[test]
    fn toggle_twice_restores_membership() {
        let mut store = FavoritesStore::new(Box::new(MemoryStore::default()));
        store.load();
        let before = store.list();

        store.toggle(&record("1", "Soup")).unwrap();
        store.toggle(&record("1", "Soup")).unwrap();

        assert_eq!(store.list(), before);
        assert!(!store.is_favorite("1"));
    }

    #[test]
    fn load_reads_stored_mapping_in_order() {
        let stored = r#"{"2":{"idMeal":"2","strMeal":"B","strMealThumb":""},"1":{"idMeal":"1","strMeal":"A","strMealThumb":""}}"#;
        let mut store = FavoritesStore::new(Box::new(MemoryStore::with_value(FAVORITES_KEY, stored)));

        assert_eq!(store.load(), 2);
        let ids: Vec<_> = store.list().into_iter().map(|r| r.id).collect();
        assert_eq!(ids, vec!["2", "1"]);
        assert!(store.is_loaded());
    }

    #[test]
    fn corrupt_data_loads_as_empty() {
        let mut store = FavoritesStore::new(Box::new(MemoryStore::with_value(FAVORITES_KEY, "{not json")));
        assert_eq!(store.load(), 0);
        assert!(store.is_loaded());
        assert!(store.is_empty());
    }

    #[test]
    fn null_data_loads_as_empty() {
        let mut store = FavoritesStore::new(Box::new(MemoryStore::with_value(FAVORITES_KEY, "null")));
        assert_eq!(store.load(), 0);
    }

    #[test]
    fn toggles_before_load_are_not_written() {
        let shared = SharedStore::default();
        let mut store = FavoritesStore::new(Box::new(shared.clone()));

        assert!(store.toggle(&record("1", "Soup")).unwrap());
        assert_eq!(shared.get(FAVORITES_KEY).unwrap(), None);

        store.load();
        store.toggle(&record("2", "Pie")).unwrap();
        let written = shared.get(FAVORITES_KEY).unwrap().unwrap();
        assert_eq!(
            written,
            r#"{"2":{"idMeal":"2","strMeal":"Pie","strMealThumb":"https://img/2.jpg"}}"#
        );
    }

    #[test]
    fn write_through_survives_reload() {
        let shared = SharedStore::default();
        let mut store = FavoritesStore::new(Box::new(shared.clone()));
        store.load();
        store.toggle(&record("5", "Stew")).unwrap();
        store.toggle(&record("3", "Curry")).unwrap();

        let mut reopened = FavoritesStore::new(Box::new(shared));
        reopened.load();
        let names: Vec<_> = reopened.list().into_iter().map(|r| r.name).collect();
        assert_eq!(names, vec!["Stew", "Curry"]);
    }

    #[test]
    fn map_key_wins_over_embedded_id() {
        let stored = r#"{"7":{"idMeal":"999","strMeal":"Tart"}}"#;
        let set: FavoriteSet = serde_json::from_str(stored).unwrap();
        assert!(set.contains("7"));
        assert!(!set.contains("999"));
    }
}
