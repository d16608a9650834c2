//! Terminal rendering layer.
//!
//! ```text
//! AppState ─► compute_viewmodel ─► UIViewModel ─┐
//! Vec<StoryHit> ─► ListingViewModel ────────────┼─► components ─► ANSI output
//! Item ─► ThreadViewModel ──────────────────────┤
//! NavigationMenu ─► MenuViewModel ──────────────┘
//! ```
//!
//! # Modules
//!
//! - [`viewmodel`]: Display-ready snapshots of each screen
//! - [`renderer`]: Entry points per screen
//! - [`components`]: Layouts and their building blocks
//! - [`helpers`]: Cursor moves, match highlighting, HTML clean-up, wrapping
//! - [`theme`]: Color palettes and ANSI escape generation

pub mod components;
pub mod helpers;
pub mod renderer;
pub mod theme;
pub mod viewmodel;

pub use renderer::{render, render_listing, render_menu, render_thread};
pub use theme::Theme;
pub use viewmodel::{
    CommentLine, DisplayItem, DropdownInfo, EmptyState, FooterInfo, HeaderInfo, ListingItem,
    ListingViewModel, MenuViewModel, SearchBarInfo, StatusLine, ThreadViewModel, UIViewModel,
};
