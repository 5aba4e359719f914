//! View model types representing renderable UI state.
//!
//! View models are computed from application state by
//! `AppState::compute_viewmodel()` and consumed by the renderer. They carry no
//! business logic, only display-ready data: windowed rows, highlight ranges,
//! wrapped detail lines and the header minimisation flag.
//!
//! # Example
//!
//! ```rust
//! use mums::ui::viewmodel::{Body, EmptyState, FooterInfo, HeaderInfo, SearchBarInfo, UIViewModel};
//!
//! let vm = UIViewModel {
//!     header: HeaderInfo {
//!         title: " Mums ".to_string(),
//!         theme_label: "Auto",
//!         favorites: 0,
//!         subtitle: Some("Recipes from TheMealDB".to_string()),
//!     },
//!     search_bar: SearchBarInfo {
//!         query: String::new(),
//!         category: None,
//!         is_typing: false,
//!         is_loading: false,
//!     },
//!     body: Body::Empty(EmptyState {
//!         message: "Search for a dish or pick a category.".to_string(),
//!         subtitle: "/ to search, c for categories".to_string(),
//!     }),
//!     detail: None,
//!     footer: FooterInfo { keybindings: "q: quit".to_string(), notice: None },
//! };
//! assert!(vm.detail.is_none());
//! ```

use crate::search::DetailTab;

/// Complete UI view model for rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UIViewModel {
    pub header: HeaderInfo,
    pub search_bar: SearchBarInfo,

    /// Content below the search bar.
    pub body: Body,

    /// Detail overlay, drawn over the body when a recipe is open.
    pub detail: Option<DetailInfo>,

    pub footer: FooterInfo,
}

/// Content of the area between the search bar and the footer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Body {
    /// A titled, windowed list (results, favorites or categories).
    List(ListInfo),

    /// Nothing to list, with an explanation.
    Empty(EmptyState),

    /// An inline error message.
    Error(String),

    /// A request is in flight.
    Loading,
}

/// A windowed list of rows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListInfo {
    /// Title line above the rows, e.g. `Results (12)`.
    pub title: String,

    /// Picker filter text, shown in the title line when present.
    pub filter: Option<String>,

    /// Rows inside the visible window.
    pub items: Vec<DisplayItem>,
}

/// Display information for a single row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Recipe or category name, truncated to fit.
    pub name: String,

    /// Secondary column (recipe id or category description).
    pub detail: String,

    pub is_selected: bool,

    /// Whether the row is a favorited recipe.
    pub is_favorite: bool,

    /// Character ranges to highlight, `(start, end)` with exclusive end.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Header display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HeaderInfo {
    pub title: String,

    /// Theme preference label (`Auto`, `Light`, `Dark`).
    pub theme_label: &'static str,

    /// Number of stored favorites.
    pub favorites: usize,

    /// Secondary line; `None` when the header is minimized.
    pub subtitle: Option<String>,
}

/// Footer display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FooterInfo {
    /// Keybinding help text for the current context.
    pub keybindings: String,

    /// Transient message (share link, permission problem), shown above the hints.
    pub notice: Option<String>,
}

/// Empty state message display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
}

/// Search bar display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchBarInfo {
    pub query: String,

    /// Active category filter, shown as a chip.
    pub category: Option<String>,

    /// Whether keys currently edit the query (cursor shown).
    pub is_typing: bool,

    pub is_loading: bool,
}

/// Detail overlay display information.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetailInfo {
    pub title: String,

    /// Category and area badges.
    pub badges: Vec<String>,

    pub is_favorite: bool,

    pub tab: DetailTab,

    /// What the content area shows.
    pub content: DetailContent,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetailContent {
    Loading,
    Failed(String),

    /// Wrapped lines inside the visible window, plus trailing links.
    Ready {
        lines: Vec<String>,
        links: Vec<String>,
        /// Whether lines were cut off below the window.
        more: bool,
    },
}

/// Whether the header collapses to a single line.
///
/// The header is minimized once the view has scrolled past `threshold` rows.
///
/// ```
/// use mums::ui::viewmodel::header_minimized;
///
/// assert!(!header_minimized(3, 3));
/// assert!(header_minimized(4, 3));
/// ```
#[must_use]
pub const fn header_minimized(scroll_offset: usize, threshold: usize) -> bool {
    scroll_offset > threshold
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn header_minimizes_strictly_past_threshold() {
        assert!(!header_minimized(0, 0));
        assert!(header_minimized(1, 0));
        assert!(!header_minimized(2, 3));
        assert!(header_minimized(10, 3));
    }
}
