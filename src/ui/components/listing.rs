//! Story listing renderer (front page, categories, search results).

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ListingItem;

/// Rows used per story: title line and meta line.
pub(super) const ROWS_PER_ITEM: usize = 2;

/// Renders as many stories as fit between `row` and `last_row`, scrolled so the
/// selected story stays visible.
pub fn render_listing(row: usize, last_row: usize, items: &[ListingItem], theme: &Theme, cols: usize) -> usize {
    let capacity = (last_row.saturating_sub(row) / ROWS_PER_ITEM).max(1);
    let selected = items.iter().position(|i| i.is_selected).unwrap_or(0);
    let start = (selected + 1).saturating_sub(capacity);

    let mut current_row = row;
    for item in items.iter().skip(start).take(capacity) {
        current_row = render_story(current_row, item, theme, cols);
    }
    current_row
}

fn render_story(row: usize, item: &ListingItem, theme: &Theme, cols: usize) -> usize {
    let rank = format!("{:>3}. ", item.rank);
    let domain = item
        .domain
        .as_ref()
        .map(|d| format!(" ({d})"))
        .unwrap_or_default();
    let title_room = cols.saturating_sub(rank.len() + domain.chars().count() + 1);
    let title: String = item.title.chars().take(title_room).collect();

    position_cursor(row, 1);
    print!("{}", Theme::fg(&theme.colors.text_dim));
    print!("{rank}");
    if item.is_selected {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }
    print!("{}{title}", Theme::bold());
    print!("{}", Theme::reset());
    print!("{}", Theme::fg(&theme.colors.link_fg));
    print!("{domain}");
    print!("{}", Theme::reset());

    position_cursor(row + 1, rank.len() + 1);
    print!("{}", Theme::fg(&theme.colors.meta_fg));
    print!("{}", item.meta);
    print!("{}", Theme::reset());

    row + ROWS_PER_ITEM
}
