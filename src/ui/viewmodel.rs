//! View model types representing renderable UI state.
//!
//! View models are immutable, display-ready snapshots. The search screen model
//! comes from `AppState::compute_viewmodel()`; listing and thread models are
//! built from provider data with [`ListingViewModel::from_hits`] and
//! [`ThreadViewModel::from_item`]. None of them carry business logic.

use crate::domain::story::time_ago;
use crate::domain::{Comment, Item, StoryHit};
use crate::ui::helpers::strip_html;

/// Complete view model for the search screen.
#[derive(Debug, Clone)]
pub struct UIViewModel {
    pub header: HeaderInfo,

    /// Input box contents and focus.
    pub search_bar: SearchBarInfo,

    /// Candidate rows plus an optional status line.
    pub dropdown: DropdownInfo,

    pub footer: FooterInfo,
}

/// One dropdown row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DisplayItem {
    /// Label, already truncated to the dropdown width.
    pub label: String,

    /// Whether this row is the keyboard-active candidate.
    pub is_active: bool,

    /// Character ranges to highlight as `(start, end)`, end exclusive, in char
    /// indices.
    pub highlight_ranges: Vec<(usize, usize)>,
}

/// Dropdown contents.
#[derive(Debug, Clone, Default)]
pub struct DropdownInfo {
    pub items: Vec<DisplayItem>,

    /// Candidate index of `items[0]` when the list is windowed.
    pub offset: usize,

    /// Shown below the items (loading) or in their place (empty states).
    pub status: Option<StatusLine>,
}

/// A single informational line in the dropdown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLine {
    pub message: String,
}

impl StatusLine {
    #[must_use]
    pub fn loading() -> Self {
        Self {
            message: "Loading suggestions…".to_string(),
        }
    }

    #[must_use]
    pub fn no_history() -> Self {
        Self {
            message: "No search history yet".to_string(),
        }
    }

    #[must_use]
    pub fn no_results() -> Self {
        Self {
            message: "No results found".to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct HeaderInfo {
    pub title: String,
}

#[derive(Debug, Clone)]
pub struct FooterInfo {
    /// Keybinding help text (e.g. "Enter: open  Esc: back").
    pub keybindings: String,
}

/// Search input display information.
#[derive(Debug, Clone)]
pub struct SearchBarInfo {
    pub query: String,

    /// Focused boxes are drawn with the accent border and a cursor.
    pub is_focused: bool,
}

/// Message shown when a listing or thread has nothing to display.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmptyState {
    pub message: String,
    pub subtitle: String,
    /// Drawn in the theme's error color instead of the status color.
    pub is_error: bool,
}

/// A story list (front page, category or search results).
#[derive(Debug, Clone)]
pub struct ListingViewModel {
    pub header: HeaderInfo,
    pub items: Vec<ListingItem>,
    pub empty_state: Option<EmptyState>,
    pub footer: FooterInfo,
}

/// One story row: rank, title, domain and meta line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingItem {
    pub rank: usize,
    pub title: String,
    /// Host part of the story URL, if it links out.
    pub domain: Option<String>,
    /// "{points} points • {comments} comments • by {author} • {time ago}"
    pub meta: String,
    pub is_selected: bool,
}

impl ListingViewModel {
    /// Builds a listing titled `title` from provider hits.
    #[must_use]
    pub fn from_hits(title: &str, hits: &[StoryHit], selected: Option<usize>) -> Self {
        let items = hits
            .iter()
            .enumerate()
            .map(|(idx, hit)| ListingItem {
                rank: idx + 1,
                title: hit.title.clone(),
                domain: hit.url.as_deref().and_then(url_domain),
                meta: hit.meta_line(),
                is_selected: selected == Some(idx),
            })
            .collect::<Vec<_>>();

        let empty_state = items.is_empty().then(|| EmptyState {
            message: "No results found".to_string(),
            subtitle: "Try a different keyword".to_string(),
            is_error: false,
        });

        Self {
            header: HeaderInfo {
                title: format!(" {title} "),
            },
            items,
            empty_state,
            footer: FooterInfo {
                keybindings: "↑/↓: select  Enter: comments  Esc: back  Ctrl+n: browse  Ctrl+c: quit".to_string(),
            },
        }
    }
}

impl ListingViewModel {
    /// Placeholder shown while a listing is being fetched.
    #[must_use]
    pub fn loading(title: &str) -> Self {
        Self::message(title, "Loading…", "Fetching stories from Hacker News", false)
    }

    /// Placeholder shown when a listing or item fetch failed.
    #[must_use]
    pub fn failed(title: &str, reason: &str) -> Self {
        Self::message(title, "Could not load stories", reason, true)
    }

    fn message(title: &str, message: &str, subtitle: &str, is_error: bool) -> Self {
        let mut vm = Self::from_hits(title, &[], None);
        vm.empty_state = Some(EmptyState {
            message: message.to_string(),
            subtitle: subtitle.to_string(),
            is_error,
        });
        vm
    }
}

/// The navigation menu: one row per destination.
#[derive(Debug, Clone)]
pub struct MenuViewModel {
    pub header: HeaderInfo,
    pub items: Vec<DisplayItem>,
    pub footer: FooterInfo,
}

/// An item page: story header followed by its flattened comment tree.
#[derive(Debug, Clone)]
pub struct ThreadViewModel {
    pub header: HeaderInfo,
    pub title: String,
    pub url: Option<String>,
    pub meta: String,
    /// Story body for Ask/Show posts, tags stripped.
    pub body: Option<String>,
    pub comments: Vec<CommentLine>,
    pub footer: FooterInfo,
}

/// One comment, pre-order, with its nesting depth.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentLine {
    pub depth: usize,
    pub author: String,
    pub age: String,
    pub text: String,
}

impl ThreadViewModel {
    #[must_use]
    pub fn from_item(item: &Item) -> Self {
        let mut comments = Vec::new();
        for child in &item.children {
            flatten_comments(child, 0, &mut comments);
        }

        let mut meta = format!(
            "{} points • {} comments • by {}",
            item.points.unwrap_or(0),
            item.comment_count(),
            item.author.as_deref().unwrap_or("unknown"),
        );
        if let Some(created) = item.created_at_i {
            meta.push_str(" • ");
            meta.push_str(&time_ago(created));
        }

        Self {
            header: HeaderInfo {
                title: " Hacker News ".to_string(),
            },
            title: item.title.clone().unwrap_or_default(),
            url: item.url.clone(),
            meta,
            body: item.text.as_deref().map(strip_html).filter(|t| !t.is_empty()),
            comments,
            footer: FooterInfo {
                keybindings: "↑/↓: scroll  Esc: back  Ctrl+c: quit".to_string(),
            },
        }
    }
}

/// Deleted comments (no author and no text) are skipped along with their
/// position, but their replies are kept one level up.
fn flatten_comments(comment: &Comment, depth: usize, out: &mut Vec<CommentLine>) {
    let deleted = comment.author.is_none() && comment.text.is_none();
    let child_depth = if deleted {
        depth
    } else {
        out.push(CommentLine {
            depth,
            author: comment.author.clone().unwrap_or_else(|| "[deleted]".to_string()),
            age: comment.created_at_i.map(time_ago).unwrap_or_default(),
            text: comment.text.as_deref().map(strip_html).unwrap_or_default(),
        });
        depth + 1
    };

    for child in &comment.children {
        flatten_comments(child, child_depth, out);
    }
}

fn url_domain(url: &str) -> Option<String> {
    let parsed = reqwest::Url::parse(url).ok()?;
    let host = parsed.host_str()?;
    Some(host.trim_start_matches("www.").to_string())
}
