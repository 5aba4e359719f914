//! Top-level rendering coordinator.
//!
//! The renderer follows a two-step process:
//!
//! 1. **View Model Computation**: transform `AppState` into `UIViewModel`
//! 2. **Component Rendering**: delegate to the component renderers with the
//!    palette of the effective appearance
//!
//! # Example
//!
//! ```rust,no_run
//! use mums::app::{AppOptions, AppState, Stores};
//! use mums::ui::render;
//! use mums::ui::theme::Palettes;
//!
//! let state = AppState::new(Stores::in_memory(), Palettes::default(), AppOptions::default());
//! render(&state, 24, 80); // Render to stdout
//! ```

use crate::app::AppState;
use crate::ui::components;

/// Renders the plugin UI to stdout.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_frame(&viewmodel, state.theme(), cols, rows);
}
