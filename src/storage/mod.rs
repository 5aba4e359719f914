//! Storage layer for persisted user data.
//!
//! Two small stores sit on top of a string key-value backend: favorites and
//! the theme preference. Nothing fetched from the catalog is stored.
//!
//! # Modules
//!
//! - `backend`: [`KeyValueStore`] trait and the in-memory backend
//! - `json`: one-file-per-key backend with atomic writes
//! - `favorites`: insertion-ordered favorites with write-through after load
//! - `theme`: light/dark/system preference and host appearance following

pub mod backend;
pub mod favorites;
pub mod json;
pub mod theme;

pub use backend::{KeyValueStore, MemoryStore};
pub use favorites::{FavoriteSet, FavoritesStore, FAVORITES_KEY};
pub use json::FileKeyValueStore;
pub use theme::{Appearance, ThemePreference, ThemeStore, ThemeUpdate, THEME_KEY};
