//! Palettes and ANSI escape sequence generation.
//!
//! The plugin carries two palettes, one per [`Appearance`]. Which one is used
//! is decided by the theme store; the renderer only ever sees the active one.
//! Palettes are built-in Catppuccin variants or a custom TOML file.
//!
//! # Built-in Palettes
//!
//! - `catppuccin-mocha`: dark (default dark palette)
//! - `catppuccin-frappe`: cool dark
//! - `catppuccin-latte`: light (default light palette)
//!
//! # TOML Format
//!
//! ```toml
//! name = "my-palette"
//!
//! [colors]
//! header_fg = "#cdd6f4"
//! selection_fg = "#1e1e2e"
//! selection_bg = "#f5c2e7"
//! text_normal = "#cdd6f4"
//! text_dim = "#6c7086"
//! border = "#45475a"
//! search_bar_border = "#f5c2e7"
//! match_highlight_fg = "#1e1e2e"
//! match_highlight_bg = "#f9e2af"
//! empty_state_fg = "#89b4fa"
//! favorite_fg = "#f38ba8"
//! error_fg = "#f38ba8"
//! badge_fg = "#94e2d5"
//! ```
//!
//! # Example
//!
//! ```rust
//! use mums::ui::theme::Theme;
//!
//! let theme = Theme::from_name("catppuccin-mocha").unwrap();
//! println!("{}", Theme::fg(&theme.colors.header_fg));
//! println!("{}Bold Text{}", Theme::bold(), Theme::reset());
//! ```

use crate::domain::error::{MumsError, Result};
use crate::storage::Appearance;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A named palette.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Theme {
    pub name: String,
    pub colors: ThemeColors,
}

/// Hex colors (`#rrggbb`) for every UI role.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ThemeColors {
    pub header_fg: String,
    #[serde(default)]
    pub header_bg: Option<String>,

    pub selection_fg: String,
    pub selection_bg: String,

    pub text_normal: String,
    pub text_dim: String,

    pub border: String,

    pub search_bar_border: String,
    pub match_highlight_fg: String,
    pub match_highlight_bg: String,

    pub empty_state_fg: String,

    /// Heart marker on favorited recipes.
    pub favorite_fg: String,
    /// Inline error messages.
    pub error_fg: String,
    /// Category/area badges and chips.
    pub badge_fg: String,
}

impl Theme {
    /// Loads a built-in palette by name.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let toml_str = match name {
            "catppuccin-mocha" => include_str!("../../themes/catppuccin-mocha.toml"),
            "catppuccin-frappe" => include_str!("../../themes/catppuccin-frappe.toml"),
            "catppuccin-latte" => include_str!("../../themes/catppuccin-latte.toml"),
            _ => return None,
        };

        match toml::from_str(toml_str) {
            Ok(theme) => Some(theme),
            Err(e) => {
                tracing::warn!(name, error = %e, "built-in palette failed to parse");
                None
            }
        }
    }

    /// Loads a palette from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns [`MumsError::Theme`] if the file cannot be read or parsed.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| MumsError::Theme(format!("failed to read palette file: {e}")))?;

        toml::from_str(&contents).map_err(|e| MumsError::Theme(format!("failed to parse palette TOML: {e}")))
    }

    /// Mocha colors, built in code so that a default always exists.
    #[must_use]
    pub fn fallback() -> Self {
        let c = |hex: &str| hex.to_string();
        Self {
            name: "fallback".to_string(),
            colors: ThemeColors {
                header_fg: c("#cdd6f4"),
                header_bg: None,
                selection_fg: c("#1e1e2e"),
                selection_bg: c("#f5c2e7"),
                text_normal: c("#cdd6f4"),
                text_dim: c("#6c7086"),
                border: c("#45475a"),
                search_bar_border: c("#f5c2e7"),
                match_highlight_fg: c("#1e1e2e"),
                match_highlight_bg: c("#f9e2af"),
                empty_state_fg: c("#89b4fa"),
                favorite_fg: c("#f38ba8"),
                error_fg: c("#f38ba8"),
                badge_fg: c("#94e2d5"),
            },
        }
    }

    fn hex_to_rgb(hex: &str) -> (u8, u8, u8) {
        let hex = hex.trim_start_matches('#').trim();

        if hex.len() != 6 || !hex.is_ascii() {
            return (255, 255, 255);
        }

        let r = u8::from_str_radix(&hex[0..2], 16).unwrap_or(255);
        let g = u8::from_str_radix(&hex[2..4], 16).unwrap_or(255);
        let b = u8::from_str_radix(&hex[4..6], 16).unwrap_or(255);

        (r, g, b)
    }

    /// ANSI truecolor foreground sequence for a hex color.
    #[must_use]
    pub fn fg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[38;2;{r};{g};{b}m")
    }

    /// ANSI truecolor background sequence for a hex color.
    #[must_use]
    pub fn bg(hex: &str) -> String {
        let (r, g, b) = Self::hex_to_rgb(hex);
        format!("\u{001b}[48;2;{r};{g};{b}m")
    }

    #[must_use]
    pub const fn bold() -> &'static str {
        "\u{001b}[1m"
    }

    #[must_use]
    pub const fn dim() -> &'static str {
        "\u{001b}[2m"
    }

    #[must_use]
    pub const fn underline() -> &'static str {
        "\u{001b}[4m"
    }

    #[must_use]
    pub const fn reset() -> &'static str {
        "\u{001b}[0m"
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self::from_name("catppuccin-mocha").unwrap_or_else(Self::fallback)
    }
}

/// The dark and light palettes, selected by the effective appearance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Palettes {
    pub dark: Theme,
    pub light: Theme,
}

impl Palettes {
    /// Resolves palettes from configuration.
    ///
    /// A custom `theme_file` is used for both appearances; otherwise the named
    /// built-ins are used, falling back to Mocha and Latte.
    #[must_use]
    pub fn resolve(dark: Option<&str>, light: Option<&str>, file: Option<&str>) -> Self {
        if let Some(path) = file {
            match Theme::from_file(path) {
                Ok(theme) => {
                    return Self {
                        dark: theme.clone(),
                        light: theme,
                    }
                }
                Err(e) => tracing::warn!(path, error = %e, "custom palette ignored"),
            }
        }

        let named = |name: Option<&str>, default: &str| {
            name.and_then(Theme::from_name)
                .or_else(|| Theme::from_name(default))
                .unwrap_or_else(Theme::fallback)
        };

        Self {
            dark: named(dark, "catppuccin-mocha"),
            light: named(light, "catppuccin-latte"),
        }
    }

    #[must_use]
    pub const fn active(&self, appearance: Appearance) -> &Theme {
        match appearance {
            Appearance::Dark => &self.dark,
            Appearance::Light => &self.light,
        }
    }
}

impl Default for Palettes {
    fn default() -> Self {
        Self::resolve(None, None, None)
    }
}

/// Whether a background color reads as dark (relative luminance below one half).
#[must_use]
pub fn is_dark_background(r: u8, g: u8, b: u8) -> bool {
    let luminance = 0.2126 * f64::from(r) + 0.7152 * f64::from(g) + 0.0722 * f64::from(b);
    luminance < 128.0
}

/// Approximate RGB value of an xterm 256-color index.
#[must_use]
pub fn xterm_to_rgb(index: u8) -> (u8, u8, u8) {
    const BASIC: [(u8, u8, u8); 16] = [
        (0, 0, 0),
        (205, 0, 0),
        (0, 205, 0),
        (205, 205, 0),
        (0, 0, 238),
        (205, 0, 205),
        (0, 205, 205),
        (229, 229, 229),
        (127, 127, 127),
        (255, 0, 0),
        (0, 255, 0),
        (255, 255, 0),
        (92, 92, 255),
        (255, 0, 255),
        (0, 255, 255),
        (255, 255, 255),
    ];

    match index {
        0..=15 => BASIC[usize::from(index)],
        16..=231 => {
            let cube = index - 16;
            let level = |v: u8| if v == 0 { 0 } else { 55 + v * 40 };
            (level(cube / 36), level((cube / 6) % 6), level(cube % 6))
        }
        _ => {
            let gray = 8 + (index - 232) * 10;
            (gray, gray, gray)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_palettes_parse() {
        for name in ["catppuccin-mocha", "catppuccin-frappe", "catppuccin-latte"] {
            assert!(Theme::from_name(name).is_some(), "{name} should parse");
        }
        assert!(Theme::from_name("solarized").is_none());
    }

    #[test]
    fn unknown_names_fall_back_to_defaults() {
        let palettes = Palettes::resolve(Some("nope"), None, None);
        assert_eq!(palettes.dark.name, "catppuccin-mocha");
        assert_eq!(palettes.light.name, "catppuccin-latte");
        assert_eq!(palettes.active(Appearance::Light).name, "catppuccin-latte");
    }

    #[test]
    fn custom_file_used_for_both_appearances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("mine.toml");
        let mut custom = Theme::fallback();
        custom.name = "mine".into();
        std::fs::write(&path, toml::to_string(&custom).unwrap()).unwrap();

        let palettes = Palettes::resolve(None, None, path.to_str());
        assert_eq!(palettes.dark, custom);
        assert_eq!(palettes.light, custom);
    }

    #[test]
    fn background_darkness() {
        assert!(is_dark_background(0x1e, 0x1e, 0x2e));
        assert!(!is_dark_background(0xef, 0xf1, 0xf5));
        assert_eq!(xterm_to_rgb(0), (0, 0, 0));
        assert_eq!(xterm_to_rgb(231), (255, 255, 255));
        assert!(!is_dark_background(238, 238, 238));
        assert_eq!(xterm_to_rgb(255), (238, 238, 238));
    }

    #[test]
    fn ansi_sequences() {
        assert_eq!(Theme::fg("#ff0000"), "\u{1b}[38;2;255;0;0m");
        assert_eq!(Theme::bg("bogus"), "\u{1b}[48;2;255;255;255m");
    }
}
