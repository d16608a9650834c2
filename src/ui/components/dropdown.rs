//! Suggestion/history dropdown renderer.

use super::DROPDOWN_INSET;
use crate::ui::helpers::{self, position_cursor};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{DisplayItem, DropdownInfo};

/// Renders candidate rows, then the status line, stopping before `last_row`.
///
/// Returns the next free row.
pub fn render_dropdown(row: usize, last_row: usize, dropdown: &DropdownInfo, theme: &Theme, cols: usize) -> usize {
    let width = cols.saturating_sub(DROPDOWN_INSET * 2);
    let mut current_row = row;

    for item in &dropdown.items {
        if current_row >= last_row {
            return current_row;
        }
        current_row = render_item(current_row, item, theme, width);
    }

    if let Some(status) = &dropdown.status {
        if current_row < last_row {
            position_cursor(current_row, DROPDOWN_INSET + 1);
            print!("{}", Theme::dim());
            print!("{}", Theme::fg(&theme.colors.status_fg));
            print!(" {}", status.message);
            print!("{}", Theme::reset());
            current_row += 1;
        }
    }

    current_row
}

fn render_item(row: usize, item: &DisplayItem, theme: &Theme, width: usize) -> usize {
    position_cursor(row, DROPDOWN_INSET + 1);

    if item.is_active {
        print!("{}", Theme::fg(&theme.colors.selection_fg));
        print!("{}", Theme::bg(&theme.colors.selection_bg));
    } else {
        print!("{}", Theme::fg(&theme.colors.text_normal));
    }

    print!(" ");
    helpers::render_highlighted_text(&item.label, &item.highlight_ranges, theme, item.is_active);

    let used = 1 + item.label.chars().count();
    print!("{}", " ".repeat(width.saturating_sub(used)));
    print!("{}", Theme::reset());
    row + 1
}
