//! Application layer: the recipe browser as a pure state machine.
//!
//! This module sits between the plugin runtime (`main.rs`) and the catalog,
//! search, navigation and storage layers. It implements the event-driven
//! architecture that powers the interactive UI.
//!
//! # Architecture
//!
//! ```text
//! Host Input → Events → Event Handler → State Mutations → Actions → Side Effects
//!                           ↑                                  ↓
//!                           └────── HTTP results / timers ─────┘
//! ```
//!
//! # Modules
//!
//! - [`actions`]: host requests (HTTP, timers, address, clipboard)
//! - [`handler`]: key, host and pipe events mapped onto state changes
//! - [`modes`]: typing vs. normal input, and which panel is showing
//! - [`state`]: the owned components plus view model computation

pub mod actions;
pub mod handler;
pub mod modes;
pub mod state;

pub use actions::Action;
pub use handler::{handle_event, Event};
pub use modes::{InputMode, Panel};
pub use state::{AppOptions, AppState, Stores};
