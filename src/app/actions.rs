//! Actions representing side effects to be executed by the plugin runtime.
//!
//! The event handler never talks to the host. It returns a `Vec<Action>` and
//! the plugin shim in `main.rs` translates each action into a Zellij API call
//! (`web_request`, `set_timeout`, `rename_plugin_pane`, ...).
//!
//! # Example
//!
//! ```rust
//! use mums::app::Action;
//!
//! let actions = vec![
//!     Action::HttpGet {
//!         request_id: 1,
//!         url: "https://www.themealdb.com/api/json/v1/1/categories.php".to_string(),
//!     },
//!     Action::ScheduleTimer { seconds: 0.25 },
//! ];
//! assert_eq!(actions.len(), 2);
//! ```

use crate::catalog::ApiRequest;

/// Commands representing side effects to be executed by the plugin runtime.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// Performs a GET request through the host.
    ///
    /// The response must come back as [`crate::Event::HttpResponse`] carrying the
    /// same `request_id`.
    HttpGet {
        /// Correlation id of the catalog request.
        request_id: u64,
        /// Fully built request URL.
        url: String,
    },

    /// Schedules a one-shot timer; expiry comes back as [`crate::Event::Timer`].
    ScheduleTimer {
        /// Delay in seconds.
        seconds: f64,
    },

    /// Publishes a new current address (history entry replaced, pane title updated).
    ReplaceAddress {
        /// Encoded address, `""` for the empty state.
        address: String,
    },

    /// Places text on the terminal clipboard.
    CopyToClipboard {
        /// Text to copy.
        text: String,
    },

    /// Starts (`true`) or stops (`false`) listening for host palette changes.
    WatchHostAppearance(bool),

    /// Hides the plugin pane, keeping its state.
    CloseFocus,

    /// Closes the plugin for good.
    Quit,
}

impl From<ApiRequest> for Action {
    fn from(request: ApiRequest) -> Self {
        Self::HttpGet {
            request_id: request.id.0,
            url: request.url,
        }
    }
}
