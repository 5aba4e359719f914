//! Search bar component renderer.
//!
//! Renders the query inside a bordered box. The active category appears as a
//! chip at the right edge, and a cursor is drawn while the query is focused.

use crate::ui::helpers::{position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin on each side of the box.
const SEARCH_BOX_MARGIN: usize = 2;

/// Renders the three-row search box at `row` and returns the next free row.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let border = if search.is_typing {
        &theme.colors.search_bar_border
    } else {
        &theme.colors.border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let chip = match (&search.category, search.is_loading) {
        (Some(category), true) => format!(" … [{category}] "),
        (Some(category), false) => format!(" [{category}] "),
        (None, true) => " … ".to_string(),
        (None, false) => String::new(),
    };
    let cursor = if search.is_typing { "▏" } else { "" };
    let query_width = inner_width.saturating_sub(text_width(&chip) + 10);
    let search_text = format!(" Search: {}{cursor}", truncate(&search.query, query_width));
    let padding = inner_width.saturating_sub(text_width(&search_text) + text_width(&chip));

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{search_text}");
    print!("{}", " ".repeat(padding));
    print!("{}", Theme::fg(&theme.colors.badge_fg));
    print!("{chip}");
    print!("{}", Theme::fg(border));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(border));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
