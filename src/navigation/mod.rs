//! Address state synchronization.
//!
//! - `address`: [`NavigationState`] codec and [`AddressHistory`]
//! - `sync`: debounced write direction and external read direction

pub mod address;
pub mod sync;

pub use address::{AddressHistory, NavigationState, PARAM_CATEGORY, PARAM_MEAL, PARAM_QUERY};
pub use sync::{AddressSync, DEBOUNCE};
