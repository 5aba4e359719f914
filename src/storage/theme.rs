//! Persisted theme preference.
//!
//! The user picks light, dark, or system. System follows the host terminal's
//! palette, which Zellij reports through mode updates; the store tells the
//! caller when to start and stop listening for them.

use crate::domain::error::{MumsError, Result};
use crate::storage::backend::KeyValueStore;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Storage key for the theme preference.
pub const THEME_KEY: &str = "mums_theme";

/// The user's chosen theme.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ThemePreference {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemePreference {
    /// Next preference in the header toggle cycle: system, light, dark.
    ///
    /// ```
    /// use mums::storage::ThemePreference;
    ///
    /// let p = ThemePreference::System;
    /// assert_eq!(p.next(), ThemePreference::Light);
    /// assert_eq!(p.next().next().next(), p);
    /// ```
    #[must_use]
    pub const fn next(self) -> Self {
        match self {
            Self::System => Self::Light,
            Self::Light => Self::Dark,
            Self::Dark => Self::System,
        }
    }

    /// Short label shown in the header.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::System => "Auto",
            Self::Light => "Light",
            Self::Dark => "Dark",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::System => "system",
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }
}

impl fmt::Display for ThemePreference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ThemePreference {
    type Err = MumsError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim() {
            "light" => Ok(Self::Light),
            "dark" => Ok(Self::Dark),
            "system" => Ok(Self::System),
            other => Err(MumsError::Theme(format!("unknown theme preference: {other:?}"))),
        }
    }
}

/// Effective appearance after resolving the preference against the host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Appearance {
    Light,
    Dark,
}

impl Appearance {
    #[must_use]
    pub const fn from_dark(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }
}

/// Outcome of a preference change.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThemeUpdate {
    pub appearance: Appearance,
    /// `Some(true)` to start following host palette updates, `Some(false)` to
    /// stop, `None` when the subscription is unchanged.
    pub watch_host: Option<bool>,
}

/// Theme store with an injected key-value backend.
///
/// # Examples
///
/// ```
/// use mums::storage::{Appearance, MemoryStore, ThemePreference, ThemeStore};
///
/// let mut themes = ThemeStore::new(Box::new(MemoryStore::default()));
/// themes.load();
/// themes.on_host_appearance(false);
/// assert_eq!(themes.effective(), Appearance::Light);
///
/// themes.set(ThemePreference::Dark)?;
/// assert_eq!(themes.effective(), Appearance::Dark);
/// # Ok::<(), mums::MumsError>(())
/// ```
pub struct ThemeStore {
    backend: Box<dyn KeyValueStore>,
    preference: ThemePreference,
    host_dark: bool,
    watching: bool,
    loaded: bool,
}

impl ThemeStore {
    /// Creates a store holding the default preference.
    ///
    /// The host is assumed dark until it reports otherwise.
    #[must_use]
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            preference: ThemePreference::System,
            host_dark: true,
            watching: false,
            loaded: false,
        }
    }

    /// Reads the stored preference; missing or invalid values fall back to system.
    pub fn load(&mut self) -> ThemeUpdate {
        let _span = tracing::debug_span!("theme_load").entered();

        self.preference = match self.read_stored() {
            Ok(Some(preference)) => preference,
            Ok(None) => ThemePreference::System,
            Err(e) => {
                tracing::warn!(error = %e, "ignoring unreadable theme preference");
                ThemePreference::System
            }
        };
        self.loaded = true;
        tracing::debug!(preference = %self.preference, "theme preference loaded");
        self.apply()
    }

    fn read_stored(&self) -> Result<Option<ThemePreference>> {
        let Some(raw) = self.backend.get(THEME_KEY)? else {
            return Ok(None);
        };
        if let Ok(preference) = serde_json::from_str::<ThemePreference>(&raw) {
            return Ok(Some(preference));
        }
        // Also accept a bare word, as written by hand.
        raw.parse::<ThemePreference>().map(Some).map_err(|_| MumsError::CorruptData {
            key: THEME_KEY.to_string(),
            reason: format!("unexpected value {raw:?}"),
        })
    }

    /// Persists and applies a preference. Setting the current preference again
    /// changes nothing observable.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails; the preference is applied
    /// regardless. Before [`ThemeStore::load`] nothing is written.
    pub fn set(&mut self, preference: ThemePreference) -> Result<ThemeUpdate> {
        let _span = tracing::debug_span!("theme_set", preference = %preference).entered();

        self.preference = preference;
        let update = self.apply();
        if !self.loaded {
            tracing::debug!("theme not loaded yet, skipping write");
            return Ok(update);
        }
        let json = serde_json::to_string(&preference)
            .map_err(|e| MumsError::Storage(format!("failed to serialize theme: {e}")))?;
        self.backend.set(THEME_KEY, &json)?;
        Ok(update)
    }

    /// Advances to the next preference in the cycle and persists it.
    ///
    /// # Errors
    ///
    /// Returns an error if the backend write fails.
    pub fn cycle(&mut self) -> Result<ThemeUpdate> {
        self.set(self.preference.next())
    }

    /// Records the host's current appearance.
    ///
    /// Returns the new effective appearance when it changed as a result.
    pub fn on_host_appearance(&mut self, dark: bool) -> Option<Appearance> {
        let before = self.effective();
        self.host_dark = dark;
        let after = self.effective();
        if before == after {
            None
        } else {
            tracing::debug!(dark, "host appearance changed effective theme");
            Some(after)
        }
    }

    /// Stops following the host. Returns `true` if a subscription was active.
    pub fn shutdown(&mut self) -> bool {
        std::mem::replace(&mut self.watching, false)
    }

    #[must_use]
    pub fn preference(&self) -> ThemePreference {
        self.preference
    }

    #[must_use]
    pub fn follows_host(&self) -> bool {
        self.preference == ThemePreference::System
    }

    /// Dark when the preference is dark, or when it is system and the host is dark.
    #[must_use]
    pub fn effective(&self) -> Appearance {
        Appearance::from_dark(match self.preference {
            ThemePreference::Dark => true,
            ThemePreference::Light => false,
            ThemePreference::System => self.host_dark,
        })
    }

    fn apply(&mut self) -> ThemeUpdate {
        let follow = self.follows_host();
        let watch_host = (follow != self.watching).then_some(follow);
        self.watching = follow;
        ThemeUpdate {
            appearance: self.effective(),
            watch_host,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::backend::MemoryStore;

    fn store_with(raw: Option<&str>) -> ThemeStore {
        let backend = raw.map_or_else(MemoryStore::default, |v| MemoryStore::with_value(THEME_KEY, v));
        ThemeStore::new(Box::new(backend))
    }

    #[test]
    fn cycle_visits_all_preferences_in_order() {
        let mut themes = store_with(None);
        themes.load();

        let mut seen = vec![themes.preference()];
        for _ in 0..3 {
            themes.cycle().unwrap();
            seen.push(themes.preference());
        }
        assert_eq!(
            seen,
            vec![
                ThemePreference::System,
                ThemePreference::Light,
                ThemePreference::Dark,
                ThemePreference::System
            ]
        );
    }

    #[test]
    fn loads_json_and_bare_values() {
        let mut json = store_with(Some("\"light\""));
        json.load();
        assert_eq!(json.preference(), ThemePreference::Light);

        let mut bare = store_with(Some("dark"));
        bare.load();
        assert_eq!(bare.preference(), ThemePreference::Dark);
    }

    #[test]
    fn invalid_value_falls_back_to_system() {
        let mut themes = store_with(Some("\"sepia\""));
        let update = themes.load();
        assert_eq!(themes.preference(), ThemePreference::System);
        assert_eq!(update.watch_host, Some(true));
    }

    #[test]
    fn system_follows_host_until_overridden() {
        let mut themes = store_with(None);
        themes.load();

        assert_eq!(themes.on_host_appearance(false), Some(Appearance::Light));
        assert_eq!(themes.on_host_appearance(false), None);

        let update = themes.set(ThemePreference::Dark).unwrap();
        assert_eq!(update.appearance, Appearance::Dark);
        assert_eq!(update.watch_host, Some(false));
        assert_eq!(themes.on_host_appearance(true), None);
        assert_eq!(themes.on_host_appearance(false), None);
    }

    #[test]
    fn set_is_idempotent() {
        let mut themes = store_with(None);
        themes.load();

        let first = themes.set(ThemePreference::Light).unwrap();
        let second = themes.set(ThemePreference::Light).unwrap();
        assert_eq!(first.appearance, second.appearance);
        assert_eq!(second.watch_host, None);
        assert_eq!(themes.effective(), Appearance::Light);
    }

    #[test]
    fn set_persists_preference() {
        let mut themes = store_with(None);
        themes.load();
        themes.set(ThemePreference::Dark).unwrap();
        assert_eq!(themes.backend.get(THEME_KEY).unwrap().as_deref(), Some("\"dark\""));
    }

    #[test]
    fn changes_before_load_leave_stored_value_alone() {
        let mut themes = store_with(Some("\"dark\""));
        themes.cycle().unwrap();
        themes.set(ThemePreference::Light).unwrap();
        assert_eq!(themes.preference(), ThemePreference::Light);
        assert_eq!(themes.backend.get(THEME_KEY).unwrap().as_deref(), Some("\"dark\""));

        themes.load();
        assert_eq!(themes.preference(), ThemePreference::Dark);

        themes.cycle().unwrap();
        assert_eq!(themes.backend.get(THEME_KEY).unwrap().as_deref(), Some("\"system\""));
    }

    #[test]
    fn shutdown_reports_active_subscription_once() {
        let mut themes = store_with(None);
        themes.load();
        assert!(themes.shutdown());
        assert!(!themes.shutdown());
    }
}
