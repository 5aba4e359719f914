//! Input mode and panel state types.
//!
//! These enums decide how keys are interpreted and what the body of the UI
//! shows. The detail view is not a mode: it is open whenever a recipe id is
//! part of the navigation state, and it captures navigation keys while open.
//!
//! # State Machine
//!
//! ```text
//!            "/"                       Enter / Esc
//!  Normal ─────────► Typing (query) ───────────────► Normal
//!    │ "c"                                            ▲
//!    ▼                 Enter (pick) / Esc             │
//!  Panel::Categories ─────────────────────────────────┘
//! ```
//!
//! # Example
//!
//! ```rust
//! use mums::app::modes::{InputMode, Panel};
//!
//! let mode = InputMode::Typing;
//! let panel = Panel::Results;
//! assert!(mode.is_typing());
//! assert!(!panel.captures_text());
//! ```

/// How printable keys are interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum InputMode {
    /// Keys are commands (`/`, `c`, `f`, `r`, ...).
    #[default]
    Normal,

    /// Printable keys edit the search query.
    Typing,
}

impl InputMode {
    #[must_use]
    pub const fn is_typing(self) -> bool {
        matches!(self, Self::Typing)
    }
}

/// What the body of the plugin shows below the search bar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Panel {
    /// Search results for the current query and category.
    #[default]
    Results,

    /// The user's favorites, in the order they were added.
    Favorites,

    /// Category picker; printable keys edit its filter.
    Categories,
}

impl Panel {
    /// Whether printable keys go to this panel's own text field.
    #[must_use]
    pub const fn captures_text(self) -> bool {
        matches!(self, Self::Categories)
    }
}
