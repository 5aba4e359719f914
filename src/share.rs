//! Share affordance.
//!
//! Builds a link that reopens the current view and picks how to hand it to
//! the user. The terminal host has no native share surface, so delivery is the
//! clipboard (OSC 52) when enabled and an inline notice otherwise.

use crate::navigation::NavigationState;
use base64::engine::general_purpose::STANDARD;
use base64::Engine as _;

/// Name of the pipe that accepts navigation messages.
pub const NAVIGATE_PIPE: &str = "mums::navigate";

/// Share configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShareSettings {
    /// Prefix for shared links, e.g. `https://recipes.example/`.
    pub base_url: Option<String>,
    /// Whether the terminal clipboard may be written.
    pub clipboard: bool,
}

/// How a link reaches the user, in order of preference.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShareMethod {
    Native,
    Clipboard,
    Prompt,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShareOutcome {
    pub link: String,
    pub method: ShareMethod,
}

impl ShareOutcome {
    /// One-line message confirming the share.
    #[must_use]
    pub fn notice(&self) -> String {
        match self.method {
            ShareMethod::Native | ShareMethod::Clipboard => format!("Link copied: {}", self.link),
            ShareMethod::Prompt => format!("Share link: {}", self.link),
        }
    }
}

/// Builds the shareable link for a view with `recipe_id` open (or none).
///
/// With a base URL the link is the base followed by the encoded address.
/// Without one, it is a `zellij pipe` command that navigates a running
/// instance to the same state.
///
/// ```
/// use mums::navigation::NavigationState;
/// use mums::share::{share_link, ShareSettings};
///
/// let nav = NavigationState { query: "pie".into(), ..Default::default() };
/// let settings = ShareSettings { base_url: Some("https://r.example/".into()), clipboard: true };
/// assert_eq!(share_link(&settings, &nav, "52772"), "https://r.example/?q=pie&meal=52772");
/// ```
#[must_use]
pub fn share_link(settings: &ShareSettings, nav: &NavigationState, recipe_id: &str) -> String {
    let shared = NavigationState {
        open_recipe_id: recipe_id.to_string(),
        ..nav.clone()
    };
    let address = shared.to_query_string();

    match settings.base_url.as_deref().map(str::trim).filter(|b| !b.is_empty()) {
        Some(base) => format!("{}{address}", base.trim_end_matches('?')),
        None => format!(
            "zellij pipe --name {NAVIGATE_PIPE} -- {}",
            shell_quote(if address.is_empty() { "?" } else { &address })
        ),
    }
}

/// Picks the delivery method. No native share surface exists in a terminal.
#[must_use]
pub const fn choose_method(settings: &ShareSettings) -> ShareMethod {
    if settings.clipboard {
        ShareMethod::Clipboard
    } else {
        ShareMethod::Prompt
    }
}

#[must_use]
pub fn share(settings: &ShareSettings, nav: &NavigationState, recipe_id: &str) -> ShareOutcome {
    let link = share_link(settings, nav, recipe_id);
    let method = choose_method(settings);
    tracing::debug!(method = ?method, link = %link, "sharing");
    ShareOutcome { link, method }
}

/// OSC 52 escape sequence that sets the system clipboard to `text`.
///
/// ```
/// assert_eq!(mums::share::osc52("hi"), "\x1b]52;c;aGk=\x07");
/// ```
#[must_use]
pub fn osc52(text: &str) -> String {
    format!("\u{1b}]52;c;{}\u{7}", STANDARD.encode(text))
}

fn shell_quote(text: &str) -> String {
    format!("'{}'", text.replace('\'', r"'\''"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nav(query: &str, category: &str) -> NavigationState {
        NavigationState {
            query: query.into(),
            category: category.into(),
            open_recipe_id: String::new(),
        }
    }

    #[test]
    fn link_without_base_is_pipe_command() {
        let settings = ShareSettings::default();
        assert_eq!(
            share_link(&settings, &nav("", "Seafood"), "52959"),
            "zellij pipe --name mums::navigate -- '?cat=Seafood&meal=52959'"
        );
    }

    #[test]
    fn pipe_command_carries_encoded_apostrophe() {
        let link = share_link(&ShareSettings::default(), &nav("it's", ""), "");
        assert_eq!(link, "zellij pipe --name mums::navigate -- '?q=it%27s'");
    }

    #[test]
    fn shell_quote_escapes_single_quotes() {
        assert_eq!(shell_quote("it's"), r"'it'\''s'");
        assert_eq!(shell_quote("?q=pie"), "'?q=pie'");
    }

    #[test]
    fn base_url_with_trailing_question_mark() {
        let settings = ShareSettings {
            base_url: Some("https://r.example/app?".into()),
            clipboard: false,
        };
        assert_eq!(
            share_link(&settings, &nav("", ""), "1"),
            "https://r.example/app?meal=1"
        );
    }

    #[test]
    fn delivery_falls_back_to_prompt() {
        let clipboard = ShareSettings {
            base_url: None,
            clipboard: true,
        };
        assert_eq!(choose_method(&clipboard), ShareMethod::Clipboard);

        let outcome = share(&ShareSettings::default(), &nav("soup", ""), "");
        assert_eq!(outcome.method, ShareMethod::Prompt);
        assert!(outcome.notice().starts_with("Share link: zellij pipe"));
    }
}
