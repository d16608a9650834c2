//! Composable UI component renderers.
//!
//! # Components
//!
//! - [`header`]: Title bar
//! - [`footer`]: Keybinding hints
//! - [`search`]: Search input box
//! - [`dropdown`]: Suggestion/history candidates and status line
//! - [`listing`]: Story rows with meta lines
//! - [`thread`]: Item header and indented comment tree
//! - [`empty`]: Centered empty-state message
//! - [`menu`]: Navigation destinations
//!
//! # Layouts
//!
//! - [`render_search_screen`]: Header + search box + dropdown + footer
//! - [`render_listing_screen`]: Header + stories (or empty state) + footer
//! - [`render_thread_screen`]: Header + scrolled thread + footer
//! - [`render_menu_screen`]: Header + destinations + footer

mod dropdown;
mod empty;
mod footer;
mod header;
mod listing;
mod menu;
mod search;
mod thread;

use crate::ui::helpers::position_cursor;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ListingViewModel, MenuViewModel, ThreadViewModel, UIViewModel};

use dropdown::render_dropdown;
use empty::render_empty_state;
use footer::render_footer;
use header::render_header;
use listing::render_listing;
use menu::render_menu;
use search::render_search_bar;
use thread::render_thread;

/// Left/right inset of dropdown rows, aligned with the inside of the search box.
pub const DROPDOWN_INSET: usize = search::SEARCH_BOX_MARGIN + 1;

/// 1-indexed screen row of the first dropdown entry on the search screen.
pub const DROPDOWN_FIRST_ROW: usize = 7;

/// Maps a 1-indexed screen position on the search screen to a candidate index.
///
/// Returns `None` outside the visible dropdown rows.
#[must_use]
pub fn dropdown_hit_test(dropdown: &crate::ui::viewmodel::DropdownInfo, row: usize, col: usize, cols: usize) -> Option<usize> {
    let inside_columns = col > DROPDOWN_INSET && col <= cols.saturating_sub(DROPDOWN_INSET);
    let visible = row.checked_sub(DROPDOWN_FIRST_ROW)?;
    (inside_columns && visible < dropdown.items.len()).then(|| dropdown.offset + visible)
}

/// Renders a horizontal border line and returns the next row.
fn render_border(row: usize, color: &str, cols: usize) -> usize {
    position_cursor(row, 1);
    print!("{}", Theme::fg(color));
    print!("{}", "─".repeat(cols));
    print!("{}", Theme::reset());
    row + 1
}

/// Draws header and border from row 2 and the bottom border and footer.
///
/// Returns `(first_content_row, bottom_border_row)`.
fn render_chrome(
    header: &crate::ui::viewmodel::HeaderInfo,
    footer: &crate::ui::viewmodel::FooterInfo,
    theme: &Theme,
    cols: usize,
    rows: usize,
) -> (usize, usize) {
    let mut current_row = 2;
    current_row = render_header(current_row, header, theme, cols);
    current_row = render_border(current_row, &theme.colors.border, cols);

    let footer_row = rows.max(current_row + 2);
    let border_row = footer_row - 1;
    render_border(border_row, &theme.colors.border, cols);
    render_footer(footer_row, footer, theme, cols);

    (current_row, border_row)
}

/// Search screen layout.
///
/// ```text
/// [blank line]
/// [Header]
/// [Border]
/// [Search box - 3 lines]
/// [Dropdown rows / status]
/// [Border]
/// [Footer]
/// ```
pub fn render_search_screen(vm: &UIViewModel, theme: &Theme, cols: usize, rows: usize) {
    let (mut current_row, border_row) = render_chrome(&vm.header, &vm.footer, theme, cols, rows);
    current_row = render_search_bar(current_row, &vm.search_bar, theme, cols);
    debug_assert_eq!(current_row, DROPDOWN_FIRST_ROW);
    render_dropdown(current_row, border_row, &vm.dropdown, theme, cols);
}

/// Story listing layout. Shows the empty state in place of rows when set.
pub fn render_listing_screen(vm: &ListingViewModel, theme: &Theme, cols: usize, rows: usize) {
    let (current_row, border_row) = render_chrome(&vm.header, &vm.footer, theme, cols, rows);
    if let Some(empty) = &vm.empty_state {
        render_empty_state(current_row + 2, empty, theme, cols);
        return;
    }
    render_listing(current_row + 1, border_row, &vm.items, theme, cols);
}

/// Navigation menu layout.
pub fn render_menu_screen(vm: &MenuViewModel, theme: &Theme, cols: usize, rows: usize) {
    let (current_row, border_row) = render_chrome(&vm.header, &vm.footer, theme, cols, rows);
    render_menu(current_row + 1, border_row, &vm.items, theme, cols);
}

/// Item thread layout. Returns the largest useful scroll offset.
pub fn render_thread_screen(vm: &ThreadViewModel, scroll: usize, theme: &Theme, cols: usize, rows: usize) -> usize {
    let (current_row, border_row) = render_chrome(&vm.header, &vm.footer, theme, cols, rows);
    render_thread(current_row + 1, border_row, vm, scroll, theme, cols)
}
