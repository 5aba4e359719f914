//! Terminal UI: view models, palettes and component renderers.
//!
//! - [`viewmodel`]: display-ready data computed from `AppState`
//! - [`renderer`]: entry point printing one frame
//! - [`components`]: header, search bar, list, detail overlay, footer
//! - [`helpers`]: cursor positioning, highlighting and text layout
//! - [`theme`]: dark/light palettes and ANSI sequences

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::render;
pub use theme::{Palettes, Theme};
pub use viewmodel::{Body, DetailContent, DetailInfo, DisplayItem, EmptyState, FooterInfo, HeaderInfo, ListInfo, SearchBarInfo, UIViewModel};
