//! Navigation menu renderer.

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::DisplayItem;

/// Renders one row per destination, prefixed with its jump digit.
///
/// Rows that do not fit above `last_row` are dropped. Returns the next free row.
pub fn render_menu(row: usize, last_row: usize, items: &[DisplayItem], theme: &Theme, cols: usize) -> usize {
    let mut current_row = row;

    for (idx, item) in items.iter().enumerate() {
        if current_row >= last_row {
            break;
        }
        let label: String = item.label.chars().take(cols.saturating_sub(8)).collect();

        position_cursor(current_row, 3);
        print!("{}{idx}  ", Theme::fg(&theme.colors.link_fg));
        if item.is_active {
            print!("{}{}", Theme::fg(&theme.colors.selection_fg), Theme::bg(&theme.colors.selection_bg));
            print!("{}", Theme::bold());
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }
        print!(" {label} {}", Theme::reset());

        current_row += 1;
    }

    current_row
}
