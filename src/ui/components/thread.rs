//! Item page renderer: story header, optional body and the comment tree.

use crate::ui::helpers::{position_cursor, wrap_text};
use crate::ui::theme::Theme;
use crate::ui::viewmodel::ThreadViewModel;

/// Spaces of indentation per comment nesting level.
const INDENT_PER_LEVEL: usize = 2;

/// Deeper comments are drawn at this depth so text keeps some width.
const MAX_VISUAL_DEPTH: usize = 8;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Style {
    Title,
    Link,
    Meta,
    Body,
    Byline,
}

struct Line {
    indent: usize,
    style: Style,
    text: String,
}

/// Renders the thread scrolled down by `scroll` lines, between `row` and
/// `last_row`.
///
/// Returns the largest useful scroll offset so callers can clamp theirs.
pub fn render_thread(row: usize, last_row: usize, vm: &ThreadViewModel, scroll: usize, theme: &Theme, cols: usize) -> usize {
    let lines = layout(vm, cols);
    let height = last_row.saturating_sub(row);
    let max_scroll = lines.len().saturating_sub(height);

    for (offset, line) in lines.iter().skip(scroll.min(max_scroll)).take(height).enumerate() {
        position_cursor(row + offset, 1);
        print!("{}", " ".repeat(line.indent));
        match line.style {
            Style::Title => print!("{}{}", Theme::bold(), Theme::fg(&theme.colors.text_normal)),
            Style::Link => print!("{}{}", Theme::underline(), Theme::fg(&theme.colors.link_fg)),
            Style::Meta => print!("{}", Theme::fg(&theme.colors.meta_fg)),
            Style::Body => print!("{}", Theme::fg(&theme.colors.text_normal)),
            Style::Byline => print!("{}{}", Theme::dim(), Theme::fg(&theme.colors.text_dim)),
        }
        print!("{}", line.text);
        print!("{}", Theme::reset());
    }

    max_scroll
}

fn layout(vm: &ThreadViewModel, cols: usize) -> Vec<Line> {
    let width = cols.saturating_sub(2).max(20);
    let mut lines = Vec::new();

    let mut push = |indent: usize, style: Style, text: &str| {
        for wrapped in wrap_text(text, width.saturating_sub(indent)) {
            lines.push(Line {
                indent,
                style,
                text: wrapped,
            });
        }
    };

    push(1, Style::Title, &vm.title);
    if let Some(url) = &vm.url {
        push(1, Style::Link, url);
    }
    push(1, Style::Meta, &vm.meta);
    if let Some(body) = &vm.body {
        push(1, Style::Body, "");
        push(1, Style::Body, body);
    }

    for comment in &vm.comments {
        let indent = 1 + comment.depth.min(MAX_VISUAL_DEPTH) * INDENT_PER_LEVEL;
        push(indent, Style::Body, "");
        push(indent, Style::Byline, &format!("{} {}", comment.author, comment.age));
        push(indent, Style::Body, &comment.text);
    }

    lines
}
