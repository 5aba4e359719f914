//! Event handling and state transition logic.
//!
//! This module implements the core event handler that processes user input and
//! host events, translating them into state changes and action sequences.
//!
//! # Architecture
//!
//! The handler follows a unidirectional data flow pattern:
//! 1. Events arrive from the plugin runtime (keys, HTTP results, timers, pipes)
//! 2. [`handle_event`] pattern-matches the event type
//! 3. The navigation state and stores are mutated
//! 4. Components catch up with the navigation state, collecting actions
//!
//! Every change of query, category or open recipe goes through one path that
//! re-evaluates the search, follows the detail view and (for changes made
//! here, not ones read from the address) restarts the address debounce.
//!
//! # Event Types
//!
//! - **Input**: `StartTyping`, `Char`, `Backspace`, `Confirm`, `Dismiss`, `MoveUp`, `MoveDown`
//! - **Commands**: `OpenCategories`, `ClearCategory`, `OpenFavorites`, `ToggleFavorite`,
//!   `RandomRecipe`, `CycleTheme`, `Share`, `SwitchDetailTab`
//! - **Navigation**: `NavigateBack`, `NavigateForward`, `Navigate`
//! - **Host**: `Started`, `PermissionDenied`, `HttpResponse`, `Timer`, `HostAppearance`
//!
//! # Example
//!
//! ```rust
//! use mums::app::{handle_event, AppOptions, AppState, Event, Stores};
//! use mums::ui::theme::Palettes;
//!
//! let mut state = AppState::new(Stores::in_memory(), Palettes::default(), AppOptions::default());
//! let (render, actions) = handle_event(&mut state, &Event::Started)?;
//! assert!(render);
//! assert!(!actions.is_empty());
//! # Ok::<(), mums::MumsError>(())
//! ```

use super::modes::{InputMode, Panel};
use crate::app::{Action, AppState};
use crate::catalog::{RequestId, Settlement};
use crate::domain::error::Result;
use crate::navigation::NavigationState;
use crate::share::{self, ShareMethod};

/// Events triggered by user input or the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Permissions were granted: load stores and issue the initial requests.
    Started,
    /// Permissions were denied; nothing can be fetched.
    PermissionDenied,

    /// Focuses the search query.
    StartTyping,
    /// Appends a character to the focused text field.
    Char(char),
    /// Removes the last character from the focused text field.
    Backspace,
    /// Moves the selection (or detail scroll) down.
    MoveDown,
    /// Moves the selection (or detail scroll) up.
    MoveUp,
    /// Opens the selection, picks a category, or ends typing.
    Confirm,
    /// Closes the innermost open thing.
    Dismiss,

    OpenCategories,
    ClearCategory,
    /// Shows the favorites panel, or returns from it.
    OpenFavorites,
    /// Toggles the open recipe, or the selected row, as a favorite.
    ToggleFavorite,
    RandomRecipe,
    CycleTheme,
    Share,
    SwitchDetailTab,

    NavigateBack,
    NavigateForward,
    /// External navigation to an address (pipe message).
    Navigate {
        address: String,
    },

    /// A host web request finished.
    HttpResponse {
        request_id: u64,
        status: u16,
        body: Vec<u8>,
    },
    /// The address debounce timer fired.
    Timer,
    /// The host palette reports a dark or light background.
    HostAppearance {
        dark: bool,
    },

    /// Hides the plugin pane.
    CloseFocus,
    /// Closes the plugin.
    Quit,
}

/// Processes an event, mutates application state, and returns actions to execute.
///
/// # Returns
///
/// `(render, actions)`: whether the UI must be redrawn, and the side effects
/// to execute in order.
///
/// # Errors
///
/// Store failures are logged and do not surface here; the `Result` is kept for
/// failures that leave the state unusable.
#[allow(clippy::too_many_lines)]
pub fn handle_event(state: &mut AppState, event: &Event) -> Result<(bool, Vec<Action>)> {
    let _span = tracing::debug_span!("handle_event", event_type = ?event_name(event)).entered();

    let mut actions = Vec::new();
    let had_notice = state.notice.is_some();
    if is_user_input(event) {
        state.notice = None;
    }

    let render = match event {
        Event::Started => {
            start(state, &mut actions);
            true
        }
        Event::PermissionDenied => {
            tracing::warn!("web access denied");
            state.notice = Some("Web access was denied; recipes cannot be loaded.".to_string());
            true
        }

        Event::StartTyping => {
            state.input_mode = InputMode::Typing;
            state.panel = Panel::Results;
            true
        }
        Event::Char(c) => {
            if state.panel.captures_text() {
                state.picker_filter.push(*c);
                state.picker_selected = 0;
                true
            } else if state.input_mode.is_typing() {
                edit_query(state, &mut actions, |query| query.push(*c));
                true
            } else {
                had_notice
            }
        }
        Event::Backspace => {
            if state.panel.captures_text() {
                state.picker_filter.pop();
                state.picker_selected = 0;
                true
            } else if state.input_mode.is_typing() {
                edit_query(state, &mut actions, |query| {
                    query.pop();
                });
                true
            } else {
                had_notice
            }
        }
        Event::MoveDown => {
            if state.detail.is_open() {
                state.detail.scroll = (state.detail.scroll + 1).min(state.detail_scroll_limit());
            } else {
                state.move_selection_down();
            }
            true
        }
        Event::MoveUp => {
            if state.detail.is_open() {
                state.detail.scroll = state.detail.scroll.saturating_sub(1);
            } else {
                state.move_selection_up();
            }
            true
        }
        Event::Confirm => {
            confirm(state, &mut actions);
            true
        }
        Event::Dismiss => {
            dismiss(state, &mut actions);
            true
        }

        Event::OpenCategories => {
            state.input_mode = InputMode::Normal;
            state.panel = Panel::Categories;
            state.picker_filter.clear();
            state.picker_selected = 0;
            true
        }
        Event::ClearCategory => {
            if state.nav.category.is_empty() {
                had_notice
            } else {
                change_nav(state, &mut actions, |nav| nav.category.clear());
                true
            }
        }
        Event::OpenFavorites => {
            state.input_mode = InputMode::Normal;
            state.panel = if state.panel == Panel::Favorites {
                Panel::Results
            } else {
                Panel::Favorites
            };
            state.selected_index = 0;
            true
        }
        Event::ToggleFavorite => {
            let Some(record) = state.favorite_target() else {
                tracing::debug!("nothing to toggle");
                return Ok((had_notice, actions));
            };
            match state.favorites.toggle(&record) {
                Ok(added) => tracing::info!(id = %record.id, added, "favorite toggled"),
                Err(e) => tracing::warn!(id = %record.id, error = %e, "failed to persist favorites"),
            }
            state.clamp_selection();
            true
        }
        Event::RandomRecipe => {
            if state.started {
                let request = state.search.random(&mut state.client);
                actions.push(request.into());
            }
            had_notice
        }
        Event::CycleTheme => {
            match state.themes.cycle() {
                Ok(update) => {
                    if let Some(watch) = update.watch_host {
                        actions.push(Action::WatchHostAppearance(watch));
                    }
                }
                Err(e) => tracing::warn!(error = %e, "failed to persist theme preference"),
            }
            true
        }
        Event::Share => {
            let outcome = share::share(&state.share, &state.nav, &state.nav.open_recipe_id);
            if outcome.method == ShareMethod::Clipboard {
                actions.push(Action::CopyToClipboard {
                    text: outcome.link.clone(),
                });
            }
            state.notice = Some(outcome.notice());
            true
        }
        Event::SwitchDetailTab => {
            if state.detail.is_open() {
                state.detail.tab = state.detail.tab.toggled();
                state.detail.scroll = 0;
                true
            } else {
                had_notice
            }
        }

        Event::NavigateBack => match state.address.back() {
            Some(nav) => {
                apply_navigation(state, nav, &mut actions);
                true
            }
            None => had_notice,
        },
        Event::NavigateForward => match state.address.forward() {
            Some(nav) => {
                apply_navigation(state, nav, &mut actions);
                true
            }
            None => had_notice,
        },
        Event::Navigate { address } => {
            tracing::info!(address = %address, "external navigation");
            let nav = state.address.navigate_external(address);
            apply_navigation(state, nav, &mut actions);
            true
        }

        Event::HttpResponse {
            request_id,
            status,
            body,
        } => settle(state, RequestId(*request_id), *status, body, &mut actions),
        Event::Timer => {
            if let Some(address) = state.address.on_timer(&state.nav) {
                tracing::debug!(address = %address, "address written");
                actions.push(Action::ReplaceAddress { address });
                true
            } else {
                false
            }
        }
        Event::HostAppearance { dark } => state.themes.on_host_appearance(*dark).is_some(),

        Event::CloseFocus => {
            actions.push(Action::CloseFocus);
            false
        }
        Event::Quit => {
            if state.themes.shutdown() {
                actions.push(Action::WatchHostAppearance(false));
            }
            state.search.cancel_all();
            state.detail.close();
            actions.push(Action::Quit);
            false
        }
    };

    Ok((render, actions))
}

fn event_name(event: &Event) -> &'static str {
    match event {
        Event::Started => "Started",
        Event::PermissionDenied => "PermissionDenied",
        Event::StartTyping => "StartTyping",
        Event::Char(_) => "Char",
        Event::Backspace => "Backspace",
        Event::MoveDown => "MoveDown",
        Event::MoveUp => "MoveUp",
        Event::Confirm => "Confirm",
        Event::Dismiss => "Dismiss",
        Event::OpenCategories => "OpenCategories",
        Event::ClearCategory => "ClearCategory",
        Event::OpenFavorites => "OpenFavorites",
        Event::ToggleFavorite => "ToggleFavorite",
        Event::RandomRecipe => "RandomRecipe",
        Event::CycleTheme => "CycleTheme",
        Event::Share => "Share",
        Event::SwitchDetailTab => "SwitchDetailTab",
        Event::NavigateBack => "NavigateBack",
        Event::NavigateForward => "NavigateForward",
        Event::Navigate { .. } => "Navigate",
        Event::HttpResponse { .. } => "HttpResponse",
        Event::Timer => "Timer",
        Event::HostAppearance { .. } => "HostAppearance",
        Event::CloseFocus => "CloseFocus",
        Event::Quit => "Quit",
    }
}

const fn is_user_input(event: &Event) -> bool {
    !matches!(
        event,
        Event::Started
            | Event::PermissionDenied
            | Event::HttpResponse { .. }
            | Event::Timer
            | Event::HostAppearance { .. }
    )
}

/// Loads the stores and issues the requests the cold-load state needs.
fn start(state: &mut AppState, actions: &mut Vec<Action>) {
    if state.started {
        return;
    }
    state.started = true;

    let count = state.favorites.load();
    let update = state.themes.load();
    tracing::info!(favorites = count, theme = %state.themes.preference(), "stores loaded");
    if let Some(watch) = update.watch_host {
        actions.push(Action::WatchHostAppearance(watch));
    }

    if let Some(request) = state.categories.fetch_once(&mut state.client) {
        actions.push(request.into());
    }
    if let Some(request) = state.search.evaluate(&mut state.client, &state.nav.category, &state.nav.query) {
        actions.push(request.into());
    }
    if let Some(request) = state.detail.follow(&mut state.client, &state.nav.open_recipe_id) {
        actions.push(request.into());
    }
    actions.push(Action::ReplaceAddress {
        address: state.address.current_address().to_string(),
    });
}

fn edit_query(state: &mut AppState, actions: &mut Vec<Action>, edit: impl FnOnce(&mut String)) {
    change_nav(state, actions, |nav| edit(&mut nav.query));
}

/// Applies a change made in the UI and schedules the address write.
fn change_nav(state: &mut AppState, actions: &mut Vec<Action>, change: impl FnOnce(&mut NavigationState)) {
    let before = state.nav.clone();
    change(&mut state.nav);
    if sync_components(state, &before, actions) {
        actions.push(Action::ScheduleTimer {
            seconds: state.address.on_state_changed(),
        });
    }
}

/// Replaces the navigation state with one read from the address.
///
/// The address is not written back; the pane title is refreshed instead.
fn apply_navigation(state: &mut AppState, nav: NavigationState, actions: &mut Vec<Action>) {
    let before = std::mem::replace(&mut state.nav, nav);
    state.input_mode = InputMode::Normal;
    state.panel = Panel::Results;
    sync_components(state, &before, actions);
    actions.push(Action::ReplaceAddress {
        address: state.address.current_address().to_string(),
    });
}

/// Brings search and detail in line with the navigation state.
///
/// Returns whether anything changed.
fn sync_components(state: &mut AppState, before: &NavigationState, actions: &mut Vec<Action>) -> bool {
    let search_changed = before.query != state.nav.query || before.category != state.nav.category;
    let detail_changed = before.open_recipe_id != state.nav.open_recipe_id;

    if search_changed {
        state.selected_index = 0;
        if state.started {
            if let Some(request) = state.search.evaluate(&mut state.client, &state.nav.category, &state.nav.query) {
                actions.push(request.into());
            }
        }
    }
    if detail_changed && (state.started || state.nav.open_recipe_id.is_empty()) {
        if let Some(request) = state.detail.follow(&mut state.client, &state.nav.open_recipe_id) {
            actions.push(request.into());
        }
    }

    search_changed || detail_changed
}

fn confirm(state: &mut AppState, actions: &mut Vec<Action>) {
    if state.panel == Panel::Categories {
        let picked = state.picker_matches().into_iter().nth(state.picker_selected);
        state.panel = Panel::Results;
        state.picker_filter.clear();
        state.picker_selected = 0;
        if let Some(category) = picked {
            tracing::debug!(category = %category.name, "category picked");
            change_nav(state, actions, |nav| nav.category = category.name);
        }
        return;
    }

    if state.input_mode.is_typing() {
        state.input_mode = InputMode::Normal;
        return;
    }

    if state.detail.is_open() {
        return;
    }

    if let Some(recipe) = state.selected_recipe() {
        state.panel = Panel::Results;
        change_nav(state, actions, |nav| nav.open_recipe_id = recipe.id);
    }
}

fn dismiss(state: &mut AppState, actions: &mut Vec<Action>) {
    if state.detail.is_open() || !state.nav.open_recipe_id.is_empty() {
        change_nav(state, actions, |nav| nav.open_recipe_id.clear());
    } else if state.panel != Panel::Results {
        state.panel = Panel::Results;
        state.picker_filter.clear();
        state.clamp_selection();
    } else if state.input_mode.is_typing() {
        state.input_mode = InputMode::Normal;
    }
}

/// Routes a host response to whichever component issued the request.
fn settle(state: &mut AppState, id: RequestId, status: u16, body: &[u8], actions: &mut Vec<Action>) -> bool {
    let response = match state.client.settle(id, status, body) {
        Settlement::Delivered(response) => response,
        Settlement::Canceled { .. } | Settlement::Unknown => return false,
    };

    if state.search.is_current(id) {
        state.search.apply(&response);
        state.clamp_selection();
        return true;
    }
    if state.search.is_random(id) {
        if let Some(detail) = state.search.apply_random(&response) {
            state.panel = Panel::Results;
            state.input_mode = InputMode::Normal;
            let recipe_id = detail.id.clone();
            state.detail.show(detail);
            change_nav(state, actions, |nav| nav.open_recipe_id = recipe_id);
        }
        return true;
    }
    if state.detail.is_current(id) {
        return state.detail.apply(&response);
    }
    if state.categories.is_current(id) {
        state.categories.apply(&response);
        return state.panel == Panel::Categories;
    }
    false
}
