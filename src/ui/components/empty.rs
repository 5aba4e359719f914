//! Empty, loading and error state renderers.

use crate::ui::helpers::{position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

fn centered(row: usize, text: &str, cols: usize) {
    let text = truncate(text, cols);
    let len = text_width(&text);
    let padding = cols.saturating_sub(len) / 2;

    position_cursor(row, 1);
    print!("{}", " ".repeat(padding));
    print!("{text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + len)));
}

/// Renders a centered message with a dim subtitle below it.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) {
    print!("{}", Theme::fg(&theme.colors.empty_state_fg));
    centered(row, &empty.message, cols);
    print!("{}", Theme::reset());

    print!("{}", Theme::dim());
    print!("{}", Theme::fg(&theme.colors.text_dim));
    centered(row + 1, &empty.subtitle, cols);
    print!("{}", Theme::reset());
}

/// Renders a single centered line in `color`.
pub fn render_message(row: usize, message: &str, color: &str, cols: usize) {
    print!("{}", Theme::fg(color));
    centered(row, message, cols);
    print!("{}", Theme::reset());
}
