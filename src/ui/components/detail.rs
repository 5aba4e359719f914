//! Recipe detail overlay renderer.
//!
//! Draws a bordered box over the body area: title and favorite marker in the
//! top border, badges, tab strip, then the windowed content and links.

use crate::search::DetailTab;
use crate::ui::helpers::{position_cursor, text_width, truncate};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DetailContent, DetailInfo};

const MARGIN: usize = 1;

/// Renders the overlay in `height` rows starting at `row`.
pub fn render_detail(row: usize, height: usize, detail: &DetailInfo, theme: &Theme, cols: usize) {
    if height < 4 {
        return;
    }
    let inner = cols.saturating_sub(MARGIN * 2 + 2);
    let last_row = row + height - 1;

    // Top border carrying the title.
    let heart = if detail.is_favorite { " ♥" } else { "" };
    let title = truncate(&detail.title, inner.saturating_sub(6 + text_width(heart)));
    let title_len = text_width(&title) + 2 + text_width(heart);
    position_cursor(row, 1 + MARGIN);
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("┌─");
    print!("{}{} {title}", Theme::bold(), Theme::fg(&theme.colors.header_fg));
    print!("{}{heart} ", Theme::fg(&theme.colors.favorite_fg));
    print!("{}{}", Theme::reset(), Theme::fg(&theme.colors.search_bar_border));
    print!("{}┐", "─".repeat(inner.saturating_sub(title_len + 1)));
    print!("{}", Theme::reset());

    let badges = detail
        .badges
        .iter()
        .map(|b| format!("[{b}]"))
        .collect::<Vec<_>>()
        .join(" ");
    line(row + 1, &badges, &theme.colors.badge_fg, theme, inner);

    let tabs = [DetailTab::Ingredients, DetailTab::Instructions]
        .iter()
        .map(|tab| {
            if *tab == detail.tab {
                format!("[{}]", tab.title())
            } else {
                format!(" {} ", tab.title())
            }
        })
        .collect::<Vec<_>>()
        .join("  ");
    line(row + 2, &tabs, &theme.colors.header_fg, theme, inner);

    position_cursor(row + 3, 1 + MARGIN);
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("├{}┤", "─".repeat(inner));
    print!("{}", Theme::reset());

    let mut current = row + 4;
    match &detail.content {
        DetailContent::Loading => {
            line(current, "Loading recipe...", &theme.colors.text_dim, theme, inner);
            current += 1;
        }
        DetailContent::Failed(message) => {
            line(current, message, &theme.colors.error_fg, theme, inner);
            current += 1;
        }
        DetailContent::Ready { lines, links, more } => {
            let link_start = last_row.saturating_sub(links.len());
            for text in lines {
                if current >= link_start {
                    break;
                }
                line(current, text, &theme.colors.text_normal, theme, inner);
                current += 1;
            }
            if *more && current > row + 4 && current <= link_start {
                line(current - 1, "...", &theme.colors.text_dim, theme, inner);
            }
            while current < link_start {
                line(current, "", &theme.colors.text_normal, theme, inner);
                current += 1;
            }
            for link in links {
                line(current, link, &theme.colors.empty_state_fg, theme, inner);
                current += 1;
            }
        }
    }

    while current < last_row {
        line(current, "", &theme.colors.text_normal, theme, inner);
        current += 1;
    }

    position_cursor(last_row, 1 + MARGIN);
    print!("{}", Theme::fg(&theme.colors.search_bar_border));
    print!("└{}┘", "─".repeat(inner));
    print!("{}", Theme::reset());
}

fn line(row: usize, text: &str, color: &str, theme: &Theme, inner: usize) {
    let text = truncate(text, inner.saturating_sub(1));
    position_cursor(row, 1 + MARGIN);
    print!("{}│", Theme::fg(&theme.colors.search_bar_border));
    print!("{} {text}", Theme::fg(color));
    print!("{}", " ".repeat(inner.saturating_sub(text_width(&text) + 1)));
    print!("{}│", Theme::fg(&theme.colors.search_bar_border));
    print!("{}", Theme::reset());
}
