//! Two-way synchronization between navigation state and the address.
//!
//! Read direction: an external navigation (cold load, pipe message, history
//! back/forward) overwrites the state unconditionally.
//!
//! Write direction: every state change restarts a debounce window. The host
//! timer cannot be canceled, so each change schedules its own timer and the
//! synchronizer counts the ones still outstanding. Only the timer that brings
//! the count back to zero writes, and it writes the state as it is at that
//! moment, replacing the current history entry.
//!
//! ```text
//! change ─► timer#1 ┐
//! change ─► timer#2 ┤   #1 fires: 2 outstanding, skip
//! change ─► timer#3 ┘   #2 fires: 1 outstanding, skip
//!                       #3 fires: 0 outstanding, replace address
//! ```

use crate::navigation::address::{AddressHistory, NavigationState};
use std::time::Duration;

/// Quiet period after the last change before the address is rewritten.
pub const DEBOUNCE: Duration = Duration::from_millis(250);

#[derive(Debug, Default)]
pub struct AddressSync {
    history: AddressHistory,
    outstanding_timers: u32,
    dirty: bool,
}

impl AddressSync {
    /// Starts at `address` and returns the state it encodes.
    pub fn new(address: &str) -> (Self, NavigationState) {
        let state = NavigationState::from_query_string(address);
        let sync = Self {
            history: AddressHistory::new(state.to_query_string()),
            outstanding_timers: 0,
            dirty: false,
        };
        (sync, state)
    }

    /// Records a state change and returns the delay, in seconds, of the timer
    /// the caller must schedule.
    pub fn on_state_changed(&mut self) -> f64 {
        self.dirty = true;
        self.outstanding_timers += 1;
        tracing::trace!(outstanding = self.outstanding_timers, "address debounce restarted");
        DEBOUNCE.as_secs_f64()
    }

    /// Handles an elapsed debounce timer.
    ///
    /// Returns the new address when this timer closes the window and the
    /// encoded state differs from the current entry.
    pub fn on_timer(&mut self, state: &NavigationState) -> Option<String> {
        self.outstanding_timers = self.outstanding_timers.saturating_sub(1);
        if self.outstanding_timers > 0 || !self.dirty {
            return None;
        }
        self.dirty = false;

        let address = state.to_query_string();
        if address == self.history.current() {
            return None;
        }
        tracing::debug!(address = %address, "replacing address");
        self.history.replace(address.clone());
        Some(address)
    }

    /// Navigates to an externally supplied address, pushing a history entry.
    ///
    /// Any pending debounced write is dropped; the returned state must replace
    /// the caller's state.
    pub fn navigate_external(&mut self, address: &str) -> NavigationState {
        let state = NavigationState::from_query_string(address);
        let normalized = state.to_query_string();
        tracing::debug!(address = %normalized, "external navigation");

        if normalized != self.history.current() {
            self.history.push(normalized);
        }
        self.dirty = false;
        state
    }

    /// Moves back one history entry.
    pub fn back(&mut self) -> Option<NavigationState> {
        let address = self.history.back()?.to_string();
        self.dirty = false;
        Some(NavigationState::from_query_string(&address))
    }

    /// Moves forward one history entry.
    pub fn forward(&mut self) -> Option<NavigationState> {
        let address = self.history.forward()?.to_string();
        self.dirty = false;
        Some(NavigationState::from_query_string(&address))
    }

    /// The address as last written or navigated to.
    #[must_use]
    pub fn current_address(&self) -> &str {
        self.history.current()
    }

    /// Whether a debounced write is still waiting for its window to close.
    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.dirty
    }
}
