//! List component renderer for results, favorites and categories.

use crate::ui::helpers::{self, position_cursor, text_width};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, ListInfo};

/// Width of the name column, marker included.
const NAME_COLUMN_WIDTH: usize = 42;

/// Renders the title line and the visible rows. Returns the next free row.
pub fn render_list(row: usize, list: &ListInfo, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::bold());
    print!("{}", Theme::fg(&theme.colors.header_fg));
    print!(" {}", list.title);
    print!("{}", Theme::reset());
    if let Some(filter) = &list.filter {
        print!("{}", Theme::fg(&theme.colors.search_bar_border));
        print!("  filter: {filter}▏");
        print!("{}", Theme::reset());
    }

    let mut current_row = row + 1;
    for item in &list.items {
        current_row = render_row(current_row, item, theme, cols);
    }
    current_row
}

fn render_row(row: usize, item: &DisplayItem, theme: &Theme, cols: usize) -> usize {
    position_cursor(row, 1);

    let (base_fg, base_bg): (&str, Option<&str>) = if item.is_selected {
        (theme.colors.selection_fg.as_str(), Some(theme.colors.selection_bg.as_str()))
    } else {
        (theme.colors.text_normal.as_str(), None)
    };
    let base = |marker_color: Option<&str>| {
        print!("{}", Theme::fg(marker_color.unwrap_or(base_fg)));
        if let Some(bg) = base_bg {
            print!("{}", Theme::bg(bg));
        }
    };

    if item.is_favorite {
        base(Some(theme.colors.favorite_fg.as_str()));
        print!(" ♥ ");
    } else {
        base(None);
        print!("   ");
    }
    base(None);

    helpers::render_highlighted_text(&item.name, &item.highlight_ranges, theme, item.is_selected);
    if !item.is_selected && !item.highlight_ranges.is_empty() {
        base(None);
    }

    let name_len = 3 + text_width(&item.name);
    print!("{}", " ".repeat(NAME_COLUMN_WIDTH.saturating_sub(name_len)));

    if !item.is_selected {
        print!("{}", Theme::fg(&theme.colors.text_dim));
    }
    print!("{}", item.detail);

    let line_len = NAME_COLUMN_WIDTH.max(name_len) + text_width(&item.detail);
    print!("{}", " ".repeat(cols.saturating_sub(line_len)));

    print!("{}", Theme::reset());
    row + 1
}
