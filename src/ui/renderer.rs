//! Top-level rendering coordinator.
//!
//! Each screen is rendered in two steps: compute (or receive) a view model, then
//! hand it to the matching layout in [`components`]. Nothing here clears the
//! screen or flushes stdout; the terminal loop owns both.

use crate::app::AppState;
use crate::ui::components;
use crate::ui::theme::Theme;
use crate::ui::viewmodel::{ListingViewModel, MenuViewModel, ThreadViewModel};

/// Renders the search box and dropdown for `state`.
pub fn render(state: &AppState, rows: usize, cols: usize) {
    let viewmodel = state.compute_viewmodel(rows, cols);
    components::render_search_screen(&viewmodel, &state.theme, cols, rows);
}

/// Renders a story listing.
pub fn render_listing(vm: &ListingViewModel, theme: &Theme, rows: usize, cols: usize) {
    components::render_listing_screen(vm, theme, cols, rows);
}

/// Renders the navigation menu.
pub fn render_menu(vm: &MenuViewModel, theme: &Theme, rows: usize, cols: usize) {
    components::render_menu_screen(vm, theme, cols, rows);
}

/// Renders an item thread and returns the largest useful scroll offset.
pub fn render_thread(vm: &ThreadViewModel, scroll: usize, theme: &Theme, rows: usize, cols: usize) -> usize {
    components::render_thread_screen(vm, scroll, theme, cols, rows)
}
