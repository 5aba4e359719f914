//! Footer component renderer.

use crate::ui::helpers::{position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::FooterInfo;

/// Renders the notice (if any) at `row` followed by the centered keybinding
/// hints. Returns the next free row.
pub fn render_footer(row: usize, footer: &FooterInfo, theme: &Theme, cols: usize) -> usize {
    let mut row = row;

    if let Some(notice) = &footer.notice {
        let notice = truncate(notice, cols.saturating_sub(1));
        position_cursor(row, 1);
        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.badge_fg));
        print!(" {notice}");
        print!("{}", " ".repeat(cols.saturating_sub(text_width(&notice) + 1)));
        print!("{}", Theme::reset());
        row += 1;
    }

    let help_text = truncate(&footer.keybindings, cols);
    let text_len = text_width(&help_text);
    let padding = cols.saturating_sub(text_len) / 2;

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{}", " ".repeat(padding));
    print!("{help_text}");
    print!("{}", " ".repeat(cols.saturating_sub(padding + text_len)));
    print!("{}", Theme::reset());
    row + 1
}
