//! Mums: a Zellij plugin for discovering recipes from TheMealDB.
//!
//! Mums lets you:
//! - Search recipes by name, or filter them by category (or both)
//! - Open a recipe to read its ingredients and instructions
//! - Keep a persisted list of favorites
//! - Pick a light, dark or host-following theme, also persisted
//! - Share a link that reopens the same view
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────┐
//! │  Zellij Plugin Shim (main.rs)                       │  ← Entry point
//! └─────────────────────────────────────────────────────┘
//!                        │
//! ┌─────────────────────────────────────────────────────┐
//! │  Application Layer (app/)                           │  ← State machine
//! │  - Event handling, action dispatching               │
//! │  - View model computation                           │
//! └─────────────────────────────────────────────────────┘
//!         │                    │                    │
//! ┌───────────────┐   ┌───────────────┐   ┌───────────────┐
//! │ Search        │   │ Navigation    │   │ Storage       │
//! │ (search/)     │   │ (navigation/) │   │ (storage/)    │
//! │ - Decisions   │   │ - Address     │   │ - Favorites   │
//! │ - Detail view │   │ - Debounce    │   │ - Theme       │
//! │ - Categories  │   │ - History     │   │ - JSON files  │
//! └───────────────┘   └───────────────┘   └───────────────┘
//!         │
//! ┌─────────────────────────────────────────────────────┐
//! │  Catalog client (catalog/) · Domain (domain/)       │
//! │  UI (ui/) · Share (share.rs) · Paths / tracing      │
//! └─────────────────────────────────────────────────────┘
//! ```
//!
//! # Configuration
//!
//! ```kdl
//! pane {
//!     plugin location="file:/path/to/mums.wasm" {
//!         theme_dark "catppuccin-mocha"
//!         theme_light "catppuccin-latte"
//!         share_base_url "https://recipes.example/"
//!         clipboard "true"
//!         header_minimize_at "3"
//!         cat "Seafood"
//!         trace_level "info"
//!     }
//! }
//! ```
//!
//! A running instance can be navigated from outside:
//!
//! ```text
//! zellij pipe --name mums::navigate -- '?q=pie&meal=52772'
//! ```
//!
//! # Examples
//!
//! ```rust
//! use mums::{handle_event, initialize, Action, Config, Event};
//!
//! let config = Config {
//!     data_dir: std::env::temp_dir().join("mums-doc"),
//!     initial_address: "?q=pie".to_string(),
//!     ..Default::default()
//! };
//! let mut state = initialize(&config);
//!
//! let (_, actions) = handle_event(&mut state, &Event::Started)?;
//! assert!(actions.iter().any(|a| matches!(a, Action::HttpGet { url, .. } if url.ends_with("search.php?s=pie"))));
//! # Ok::<(), mums::MumsError>(())
//! ```

#![allow(clippy::multiple_crate_versions)]

pub mod app;
pub mod catalog;
pub mod domain;
pub mod infrastructure;
pub mod navigation;
pub mod search;
pub mod share;
pub mod storage;

pub mod ui;

pub mod observability;

pub use app::{handle_event, Action, AppOptions, AppState, Event, InputMode, Panel, Stores};
pub use domain::{MumsError, Result};
pub use ui::Theme;

use crate::catalog::DEFAULT_BASE_URL;
use crate::navigation::NavigationState;
use crate::share::ShareSettings;
use crate::storage::{FavoritesStore, FileKeyValueStore, ThemeStore};
use crate::ui::Palettes;
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Plugin configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Built-in palette for dark appearance.
    pub theme_dark: Option<String>,

    /// Built-in palette for light appearance.
    pub theme_light: Option<String>,

    /// Custom TOML palette used for both appearances.
    pub theme_file: Option<String>,

    /// Tracing filter directive, e.g. `debug` or `mums=trace`.
    pub trace_level: Option<String>,

    /// Catalog API root.
    pub api_base_url: String,

    /// Directory for the stores and the trace file.
    pub data_dir: PathBuf,

    /// Prefix of shared links; without it links are `zellij pipe` commands.
    pub share_base_url: Option<String>,

    /// Whether shared links go to the clipboard.
    pub clipboard: bool,

    /// Scroll offset past which the header minimizes.
    pub header_minimize_at: usize,

    /// Address to start at (`?q=...&cat=...&meal=...`).
    pub initial_address: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme_dark: None,
            theme_light: None,
            theme_file: None,
            trace_level: None,
            api_base_url: DEFAULT_BASE_URL.to_string(),
            data_dir: infrastructure::data_dir(None),
            share_base_url: None,
            clipboard: true,
            header_minimize_at: 3,
            initial_address: String::new(),
        }
    }
}

impl Config {
    /// Parses configuration from Zellij's configuration map.
    ///
    /// # Parsing Rules
    ///
    /// - `api_base_url`, `data_dir`: strings, defaults when absent or blank
    /// - `clipboard`: `false`/`no`/`off`/`0` disable, anything else enables
    /// - `header_minimize_at`: `usize`, falls back to 3 on parse error
    /// - `address` wins over the individual `q`, `cat` and `meal` keys
    ///
    /// # Example
    ///
    /// ```rust
    /// use std::collections::BTreeMap;
    /// use mums::Config;
    ///
    /// let mut map = BTreeMap::new();
    /// map.insert("cat".to_string(), "Seafood".to_string());
    /// map.insert("q".to_string(), "salmon".to_string());
    /// map.insert("clipboard".to_string(), "false".to_string());
    ///
    /// let config = Config::from_zellij(&map);
    /// assert_eq!(config.initial_address, "?q=salmon&cat=Seafood");
    /// assert!(!config.clipboard);
    /// ```
    #[must_use]
    pub fn from_zellij(config: &BTreeMap<String, String>) -> Self {
        let get = |key: &str| non_blank(config, key);

        let clipboard = get("clipboard").map_or(true, |v| {
            !matches!(v.to_ascii_lowercase().as_str(), "false" | "no" | "off" | "0")
        });

        let header_minimize_at = get("header_minimize_at")
            .and_then(|v| v.parse::<usize>().ok())
            .unwrap_or(3);

        let initial_address = get("address").map_or_else(
            || {
                NavigationState {
                    query: get("q").unwrap_or_default().to_string(),
                    category: get("cat").unwrap_or_default().to_string(),
                    open_recipe_id: get("meal").unwrap_or_default().to_string(),
                }
                .to_query_string()
            },
            String::from,
        );

        Self {
            theme_dark: get("theme_dark").map(String::from),
            theme_light: get("theme_light").map(String::from),
            theme_file: get("theme_file").map(infrastructure::expand_tilde),
            trace_level: get("trace_level").map(String::from),
            api_base_url: get("api_base_url").unwrap_or(DEFAULT_BASE_URL).to_string(),
            data_dir: infrastructure::data_dir(get("data_dir")),
            share_base_url: get("share_base_url").map(String::from),
            clipboard,
            header_minimize_at,
            initial_address,
        }
    }
}

fn non_blank<'a>(config: &'a BTreeMap<String, String>, key: &str) -> Option<&'a str> {
    config.get(key).map(|v| v.trim()).filter(|v| !v.is_empty())
}

/// Builds the application state from configuration.
///
/// Stores are file-backed in `data_dir`; if the directory cannot be created
/// they fall back to memory and nothing is persisted this session.
pub fn initialize(config: &Config) -> AppState {
    tracing::debug!(data_dir = ?config.data_dir, "initializing mums plugin");

    let palettes = Palettes::resolve(
        config.theme_dark.as_deref(),
        config.theme_light.as_deref(),
        config.theme_file.as_deref(),
    );

    let stores = match FileKeyValueStore::new(config.data_dir.clone()) {
        Ok(backend) => Stores {
            favorites: FavoritesStore::new(Box::new(backend.clone())),
            themes: ThemeStore::new(Box::new(backend)),
        },
        Err(e) => {
            tracing::warn!(error = %e, "data directory unavailable, favorites and theme will not persist");
            Stores::in_memory()
        }
    };

    let options = AppOptions {
        api_base_url: config.api_base_url.clone(),
        share: ShareSettings {
            base_url: config.share_base_url.clone(),
            clipboard: config.clipboard,
        },
        header_minimize_at: config.header_minimize_at,
        initial_address: config.initial_address.clone(),
    };

    AppState::new(stores, palettes, options)
}
