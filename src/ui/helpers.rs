//! Rendering and layout helpers.
//!
//! Cursor positioning and highlighted text print straight to stdout, which the
//! host captures as the plugin's frame. The remaining helpers are pure text
//! layout used while computing view models.

use crate::ui::theme::Theme;

/// Moves the terminal cursor to a 1-based `(row, col)` position.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Prints text with match highlighting.
///
/// `ranges` are `(start, end)` character ranges with exclusive end. Selected
/// rows are printed without highlighting so the selection colors stay intact.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_selected: bool) {
    if ranges.is_empty() || is_selected {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }
        if start > current_pos {
            let normal: String = chars[current_pos..start].iter().collect();
            print!("{normal}");
        }

        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted: String = chars[start..end].iter().collect();
        print!("{highlighted}");
        print!("{}", Theme::reset());
        print!("{}", Theme::fg(&theme.colors.text_normal));

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Number of terminal columns a string occupies (one per char).
#[must_use]
pub fn text_width(text: &str) -> usize {
    text.chars().count()
}

/// Truncates to `max` chars, ending with `...` when cut.
#[must_use]
pub fn truncate(text: &str, max: usize) -> String {
    if text_width(text) <= max {
        return text.to_string();
    }
    if max <= 3 {
        return text.chars().take(max).collect();
    }
    let kept: String = text.chars().take(max - 3).collect();
    format!("{kept}...")
}

/// Greedy word wrap. Blank input lines are kept as paragraph breaks and words
/// longer than `width` are split.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let paragraph = paragraph.trim();
        if paragraph.is_empty() {
            if lines.last().is_some_and(|l: &String| !l.is_empty()) {
                lines.push(String::new());
            }
            continue;
        }

        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                lines.push(word.drain(..width).collect());
            }
            if word.is_empty() {
                continue;
            }

            let needed = if line.is_empty() { word.len() } else { text_width(&line) + 1 + word.len() };
            if needed > width {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.extend(word);
        }
        if !line.is_empty() {
            lines.push(line);
        }
    }

    while lines.last().is_some_and(String::is_empty) {
        lines.pop();
    }
    lines
}

/// Visible `(start, end)` window of `available` rows over `len` rows, keeping
/// `selected` near the middle and the window full near the end.
#[must_use]
pub fn visible_window(len: usize, selected: usize, available: usize) -> (usize, usize) {
    if len == 0 || available == 0 {
        return (0, 0);
    }
    let mut start = selected.saturating_sub(available / 2);
    let end = (start + available).min(len);
    if end - start < available && len >= available {
        start = end - available;
    }
    (start, end)
}

/// Character ranges where `needle` occurs in `text`, ignoring case.
#[must_use]
pub fn substring_ranges(text: &str, needle: &str) -> Vec<(usize, usize)> {
    let fold = |c: char| c.to_lowercase().next().unwrap_or(c);
    let haystack: Vec<char> = text.chars().map(fold).collect();
    let needle: Vec<char> = needle.trim().chars().map(fold).collect();
    if needle.is_empty() || needle.len() > haystack.len() {
        return Vec::new();
    }

    let mut ranges = Vec::new();
    let mut i = 0;
    while i + needle.len() <= haystack.len() {
        if haystack[i..i + needle.len()] == needle[..] {
            ranges.push((i, i + needle.len()));
            i += needle.len();
        } else {
            i += 1;
        }
    }
    ranges
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_on_word_boundaries() {
        let lines = wrap_text("Preheat the oven to 180C.\n\nMix well.", 12);
        assert_eq!(lines, vec!["Preheat the", "oven to", "180C.", "", "Mix well."]);
    }

    #[test]
    fn wraps_long_words() {
        assert_eq!(wrap_text("abcdefgh", 3), vec!["abc", "def", "gh"]);
    }

    #[test]
    fn window_stays_full_at_end() {
        assert_eq!(visible_window(10, 9, 4), (6, 10));
        assert_eq!(visible_window(10, 0, 4), (0, 4));
        assert_eq!(visible_window(3, 2, 10), (0, 3));
        assert_eq!(visible_window(0, 0, 5), (0, 0));
    }

    #[test]
    fn finds_case_insensitive_matches() {
        assert_eq!(substring_ranges("Chicken Pie pie", "PIE"), vec![(8, 11), (12, 15)]);
        assert!(substring_ranges("Soup", "").is_empty());
    }

    #[test]
    fn truncates_by_chars() {
        assert_eq!(truncate("Crème brûlée tart", 10), "Crème b...");
        assert_eq!(truncate("Pie", 10), "Pie");
    }
}
