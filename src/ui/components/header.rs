//! Header component renderer.
//!
//! Renders the title bar with theme-aware colors and, unless the header is
//! minimized, a dim subtitle line below it.

use crate::ui::helpers::{position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::HeaderInfo;

/// Renders the header at `row` and returns the next free row.
///
/// The title sits on the left, the favorites count and theme label on the
/// right. Both lines are padded to the full width so a header background
/// color covers the whole bar.
pub fn render_header(row: usize, header: &HeaderInfo, theme: &Theme, cols: usize) -> usize {
    let badges = format!("♥ {}  ◐ {} ", header.favorites, header.theme_label);
    let title_len = text_width(&header.title);
    let badges_len = text_width(&badges);

    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }

    print!("{}", header.title);
    print!("{}", " ".repeat(cols.saturating_sub(title_len + badges_len)));
    print!("{}", Theme::fg(&theme.colors.favorite_fg));
    print!("{badges}");
    print!("{}", Theme::reset());

    let Some(subtitle) = &header.subtitle else {
        return row + 1;
    };

    let subtitle = truncate(subtitle, cols.saturating_sub(1));
    position_cursor(row + 1, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    if let Some(bg) = &theme.colors.header_bg {
        print!("{}", Theme::bg(bg));
    }
    print!(" {subtitle}");
    print!("{}", " ".repeat(cols.saturating_sub(text_width(&subtitle) + 1)));
    print!("{}", Theme::reset());
    row + 2
}
