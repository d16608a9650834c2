//! Search input box renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::SearchBarInfo;

/// Horizontal margin for the search box (spaces on left and right).
pub(super) const SEARCH_BOX_MARGIN: usize = 5;

const PROMPT: &str = " Search Hacker News: ";

/// Renders the 3-line bordered input box and returns the next free row.
///
/// ```text
/// [margin] ┌──────────────────────────────┐ [margin]
/// [margin] │ Search Hacker News: query▏   │ [margin]
/// [margin] └──────────────────────────────┘ [margin]
/// ```
///
/// A focused box uses `search_bar_focus` for its frame and shows a cursor bar
/// after the query. When the query is wider than the box, its tail is shown.
pub fn render_search_bar(row: usize, search: &SearchBarInfo, theme: &Theme, cols: usize) -> usize {
    let box_width = cols.saturating_sub(SEARCH_BOX_MARGIN * 2);
    let inner_width = box_width.saturating_sub(2);
    let frame = if search.is_focused {
        &theme.colors.search_bar_focus
    } else {
        &theme.colors.search_bar_border
    };

    position_cursor(row, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(frame));
    print!("┌{}┐", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    let cursor = if search.is_focused { "▏" } else { "" };
    let prompt_len = PROMPT.chars().count();
    let room = inner_width.saturating_sub(prompt_len + cursor.chars().count());
    let query_len = search.query.chars().count();
    let visible_query: String = search
        .query
        .chars()
        .skip(query_len.saturating_sub(room))
        .collect();
    let used = prompt_len + visible_query.chars().count() + cursor.chars().count();

    position_cursor(row + 1, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(frame));
    print!("│");
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{PROMPT}");
    print!("{}", Theme::fg(&theme.colors.text_normal));
    print!("{visible_query}");
    print!("{}", Theme::fg(&theme.colors.search_bar_focus));
    print!("{cursor}");
    print!("{}", " ".repeat(inner_width.saturating_sub(used)));
    print!("{}", Theme::fg(frame));
    print!("│");
    print!("{}", Theme::reset());

    position_cursor(row + 2, 1);
    print!("{}", " ".repeat(SEARCH_BOX_MARGIN));
    print!("{}", Theme::fg(frame));
    print!("└{}┘", "─".repeat(inner_width));
    print!("{}", Theme::reset());

    row + 3
}
