//! Empty state component renderer.

use crate::ui::helpers::print_centered;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::EmptyState;

/// Renders a centered message with a dimmed subtitle below it.
///
/// Failures use `error_fg` for the message.
pub fn render_empty_state(row: usize, empty: &EmptyState, theme: &Theme, cols: usize) -> usize {
    let color = if empty.is_error {
        &theme.colors.error_fg
    } else {
        &theme.colors.status_fg
    };
    print_centered(row, &empty.message, &Theme::fg(color), cols);

    let subtitle_style = format!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim));
    print_centered(row + 1, &empty.subtitle, &subtitle_style, cols);

    row + 2
}
