//! Zellij plugin wrapper and entry point.
//!
//! Thin integration layer between the mums library and the Zellij plugin
//! runtime. Host events become [`mums::Event`]s, the library decides, and the
//! returned [`Action`]s are carried out here with Zellij API calls.
//!
//! # Plugin Lifecycle
//!
//! 1. **Load**: parse config, initialize tracing, build `AppState`
//! 2. **Permissions**: web access is requested; nothing is fetched until granted
//! 3. **Update**: translate host events, delegate to `handle_event`
//! 4. **Render**: flush a pending clipboard write, then draw the frame
//!
//! # Event Mapping
//!
//! - `WebRequestResult` → `Event::HttpResponse` (correlated by `request_id` context)
//! - `Timer` → `Event::Timer` (address debounce)
//! - `ModeUpdate` → `Event::HostAppearance` (only while following the host)
//! - pipe `mums::navigate` → `Event::Navigate`
//!
//! # Keybindings
//!
//! While typing, or while the category picker is open, printable keys edit
//! the text and only `Enter`, `Esc`, `Backspace`, arrows and `Ctrl+n`/`Ctrl+p`
//! are special.
//!
//! In normal mode:
//! - `/`: type a search
//! - `j`/`Down`, `k`/`Up`: move (or scroll the open recipe)
//! - `Enter`: open selected recipe
//! - `Esc`: close overlay / leave panel
//! - `c`: pick category, `x`: clear category
//! - `F`: favorites panel, `f`: toggle favorite
//! - `r`: random recipe, `t`: cycle theme, `s`: share
//! - `Tab`: switch ingredients/instructions
//! - `[`/`Alt+Left`, `]`/`Alt+Right`: history back/forward
//! - `q`: hide, `Q`: quit

#![allow(clippy::multiple_crate_versions)]

use std::collections::BTreeMap;
use zellij_tile::prelude::*;

use mums::catalog::REQUEST_HEADERS;
use mums::share::{osc52, NAVIGATE_PIPE};
use mums::ui::theme::{is_dark_background, xterm_to_rgb, Palettes};
use mums::{handle_event, Action, AppOptions, AppState, Config, Event, Stores};

register_plugin!(State);

const REQUEST_ID: &str = "request_id";

struct State {
    app: AppState,

    watching_appearance: bool,

    /// OSC 52 sequence to emit with the next frame.
    pending_clipboard: Option<String>,
}

impl Default for State {
    fn default() -> Self {
        Self {
            app: AppState::new(Stores::in_memory(), Palettes::default(), AppOptions::default()),
            watching_appearance: false,
            pending_clipboard: None,
        }
    }
}

impl ZellijPlugin for State {
    fn load(&mut self, configuration: BTreeMap<String, String>) {
        let config = Config::from_zellij(&configuration);
        mums::observability::init_tracing(&config);

        let span = tracing::debug_span!("plugin_load");
        let _guard = span.entered();

        tracing::debug!(address = %config.initial_address, api = %config.api_base_url, "parsed configuration");
        self.app = mums::initialize(&config);

        request_permission(&[
            PermissionType::WebAccess,
            PermissionType::ReadApplicationState,
        ]);

        subscribe(&[
            EventType::Key,
            EventType::WebRequestResult,
            EventType::Timer,
            EventType::PermissionRequestResult,
        ]);

        tracing::debug!("plugin load complete - waiting for permissions");
    }

    fn update(&mut self, event: zellij_tile::prelude::Event) -> bool {
        let event_name = Self::get_event_name(&event);
        let span = tracing::debug_span!("plugin_update_event", event_type = %event_name);
        let _guard = span.entered();

        let our_event = match event {
            zellij_tile::prelude::Event::Key(ref key) => match self.map_key_event(key) {
                Some(event) => event,
                None => return false,
            },
            zellij_tile::prelude::Event::WebRequestResult(status, _headers, body, context) => {
                match Self::map_web_result(status, body, &context) {
                    Some(event) => event,
                    None => return false,
                }
            }
            zellij_tile::prelude::Event::Timer(_) => Event::Timer,
            zellij_tile::prelude::Event::ModeUpdate(ref mode_info) => Self::map_mode_update(mode_info),
            zellij_tile::prelude::Event::PermissionRequestResult(status) => match status {
                PermissionStatus::Granted => Event::Started,
                PermissionStatus::Denied => Event::PermissionDenied,
            },
            _ => return false,
        };

        self.dispatch(&our_event)
    }

    fn pipe(&mut self, pipe_message: PipeMessage) -> bool {
        if pipe_message.name != NAVIGATE_PIPE {
            tracing::debug!(name = %pipe_message.name, "ignoring pipe message with unknown name");
            return false;
        }
        let address = pipe_message.payload.unwrap_or_default().trim().to_string();
        tracing::debug!(address = %address, "navigate request received");
        self.dispatch(&Event::Navigate { address })
    }

    fn render(&mut self, rows: usize, cols: usize) {
        if let Some(sequence) = self.pending_clipboard.take() {
            print!("{sequence}");
        }
        mums::ui::render(&self.app, rows, cols);
    }
}

impl State {
    fn dispatch(&mut self, event: &Event) -> bool {
        match handle_event(&mut self.app, event) {
            Ok((should_render, actions)) => {
                tracing::debug!(action_count = actions.len(), should_render, "event handled successfully");
                for action in &actions {
                    self.execute_action(action);
                }
                should_render || self.pending_clipboard.is_some()
            }
            Err(e) => {
                tracing::warn!(error = %e, "error handling event");
                false
            }
        }
    }

    fn get_event_name(event: &zellij_tile::prelude::Event) -> String {
        match event {
            zellij_tile::prelude::Event::Key(key) => format!("Key({:?})", key.bare_key),
            zellij_tile::prelude::Event::WebRequestResult(status, ..) => format!("WebRequestResult({status})"),
            zellij_tile::prelude::Event::Timer(..) => "Timer".to_string(),
            zellij_tile::prelude::Event::ModeUpdate(..) => "ModeUpdate".to_string(),
            zellij_tile::prelude::Event::PermissionRequestResult(..) => "PermissionRequestResult".to_string(),
            _ => "Other".to_string(),
        }
    }

    fn map_key_event(&self, key: &KeyWithModifier) -> Option<Event> {
        tracing::debug!(bare_key = ?key.bare_key, "key event");

        if key.has_modifiers(&[KeyModifier::Ctrl]) {
            return match key.bare_key {
                BareKey::Char('n') => Some(Event::MoveDown),
                BareKey::Char('p') => Some(Event::MoveUp),
                _ => None,
            };
        }
        if key.has_modifiers(&[KeyModifier::Alt]) {
            return match key.bare_key {
                BareKey::Left => Some(Event::NavigateBack),
                BareKey::Right => Some(Event::NavigateForward),
                _ => None,
            };
        }

        let editing = self.app.input_mode.is_typing() || self.app.panel.captures_text();
        Some(match key.bare_key {
            BareKey::Enter => Event::Confirm,
            BareKey::Esc => Event::Dismiss,
            BareKey::Backspace => Event::Backspace,
            BareKey::Down => Event::MoveDown,
            BareKey::Up => Event::MoveUp,
            BareKey::Char(c) if editing => Event::Char(c),
            BareKey::Tab => Event::SwitchDetailTab,
            BareKey::Char('/') => Event::StartTyping,
            BareKey::Char('j') => Event::MoveDown,
            BareKey::Char('k') => Event::MoveUp,
            BareKey::Char('c') => Event::OpenCategories,
            BareKey::Char('x') => Event::ClearCategory,
            BareKey::Char('F') => Event::OpenFavorites,
            BareKey::Char('f') => Event::ToggleFavorite,
            BareKey::Char('r') => Event::RandomRecipe,
            BareKey::Char('t') => Event::CycleTheme,
            BareKey::Char('s') => Event::Share,
            BareKey::Char('[') => Event::NavigateBack,
            BareKey::Char(']') => Event::NavigateForward,
            BareKey::Char('q') => Event::CloseFocus,
            BareKey::Char('Q') => Event::Quit,
            _ => return None,
        })
    }

    fn map_web_result(status: u16, body: Vec<u8>, context: &BTreeMap<String, String>) -> Option<Event> {
        let Some(request_id) = context.get(REQUEST_ID).and_then(|id| id.parse::<u64>().ok()) else {
            tracing::debug!(status, "web result without request id");
            return None;
        };
        tracing::debug!(request_id, status, body_len = body.len(), "web request result");
        Some(Event::HttpResponse {
            request_id,
            status,
            body,
        })
    }

    fn map_mode_update(mode_info: &ModeInfo) -> Event {
        let (r, g, b) = match mode_info.style.colors.text_unselected.background {
            PaletteColor::Rgb(rgb) => rgb,
            PaletteColor::EightBit(index) => xterm_to_rgb(index),
        };
        let dark = is_dark_background(r, g, b);
        tracing::debug!(r, g, b, dark, "host palette");
        Event::HostAppearance { dark }
    }

    #[tracing::instrument(level = "debug", skip(self))]
    fn execute_action(&mut self, action: &Action) {
        match action {
            Action::HttpGet { request_id, url } => {
                let headers = REQUEST_HEADERS
                    .iter()
                    .map(|(name, value)| ((*name).to_string(), (*value).to_string()))
                    .collect();
                let mut context = BTreeMap::new();
                context.insert(REQUEST_ID.to_string(), request_id.to_string());
                web_request(url, HttpVerb::Get, headers, vec![], context);
            }
            Action::ScheduleTimer { seconds } => {
                set_timeout(*seconds);
            }
            Action::ReplaceAddress { address } => {
                let title = if address.is_empty() {
                    "mums".to_string()
                } else {
                    format!("mums {address}")
                };
                rename_plugin_pane(get_plugin_ids().plugin_id, title);
            }
            Action::CopyToClipboard { text } => {
                self.pending_clipboard = Some(osc52(text));
            }
            Action::WatchHostAppearance(watch) => {
                if *watch && !self.watching_appearance {
                    subscribe(&[EventType::ModeUpdate]);
                } else if !*watch && self.watching_appearance {
                    unsubscribe(&[EventType::ModeUpdate]);
                }
                self.watching_appearance = *watch;
            }
            Action::CloseFocus => {
                tracing::debug!("closing plugin focus");
                hide_self();
            }
            Action::Quit => {
                tracing::debug!("closing plugin");
                close_self();
            }
        }
    }
}
