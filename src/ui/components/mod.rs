//! Composable UI component renderers.
//!
//! Each component prints one part of the interface at a given row and returns
//! the next free row.
//!
//! # Components
//!
//! - [`header`]: title bar with theme and favorites badges, optional subtitle
//! - [`search`]: search input box with category chip
//! - [`list`]: titled list of results, favorites or categories
//! - [`empty`]: empty, loading and error states
//! - [`detail`]: recipe overlay with tabs
//! - [`footer`]: keybinding hints and notices
//!
//! # Layout
//!
//! ```text
//! row 1      (margin)
//! row 2      header title
//! row 3      header subtitle (dropped when minimized)
//!            border
//!            search box (3 rows)
//!            body: list title + rows | empty | error | loading
//!            (detail overlay drawn over the body)
//! rows-1     border (moves up one row when a notice is shown)
//! rows       footer hints
//! ```

mod detail;
mod empty;
mod footer;
mod header;
mod list;
mod search;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{Body, UIViewModel};

use detail::render_detail;
use empty::{render_empty_state, render_message};
use footer::render_footer;
use header::render_header;
use list::render_list;
use search::render_search_bar;

fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Renders a complete frame.
pub fn render_frame(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let mut current_row = 2;

    current_row = render_header(current_row, &vm.header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);

    let notice_rows = usize::from(vm.footer.notice.is_some());
    let border_row = rows.saturating_sub(1 + notice_rows);
    let body_rows = border_row.saturating_sub(current_row);

    match &vm.body {
        Body::List(list) => {
            render_list(current_row, list, theme, cols);
        }
        Body::Empty(empty) => render_empty_state(current_row + 1, empty, theme, cols),
        Body::Error(message) => render_message(current_row + 1, message, &theme.colors.error_fg, cols),
        Body::Loading => render_message(current_row + 1, "Loading...", &theme.colors.text_dim, cols),
    }

    if let Some(detail) = &vm.detail {
        render_detail(current_row, body_rows, detail, theme, cols);
    }

    render_border(border_row, &theme.colors.border, cols);
    render_footer(border_row + 1, &vm.footer, theme, cols);
}
