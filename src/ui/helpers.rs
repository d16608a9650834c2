//! Shared rendering utilities.
//!
//! Cursor positioning, match highlighting and the text clean-up applied to
//! comment bodies before they reach the screen.

use crate::ui::theme::Theme;

/// Moves the cursor to a 1-indexed `(row, col)`.
pub fn position_cursor(row: usize, col: usize) {
    print!("\u{1b}[{row};{col}H");
}

/// Writes `text` on `row` centered in `cols`, wrapped in the `style` escape
/// and padded out to the full width so stale cells are overwritten.
///
/// Text wider than the row is cut at `cols` chars.
pub fn print_centered(row: usize, text: &str, style: &str, cols: usize) {
    let visible: String = text.chars().take(cols).collect();
    let len = visible.chars().count();
    let left = (cols - len) / 2;

    position_cursor(row, 1);
    print!("{style}{:left$}{visible}{:right$}{}", "", "", Theme::reset(), right = cols - len - left);
}

/// Renders text with highlighted character ranges.
///
/// Ranges are `(start, end)` char indices, end exclusive. On the active row the
/// highlight is drawn with the match colors and the selection colors are
/// restored afterwards, so the rest of the row keeps its background.
pub fn render_highlighted_text(text: &str, ranges: &[(usize, usize)], theme: &Theme, is_active: bool) {
    if ranges.is_empty() {
        print!("{text}");
        return;
    }

    let chars: Vec<char> = text.chars().collect();
    let mut current_pos = 0;

    for &(start, end) in ranges {
        let start = start.min(chars.len());
        let end = end.min(chars.len());
        if start < current_pos || start >= end {
            continue;
        }

        let normal_section: String = chars[current_pos..start].iter().collect();
        print!("{normal_section}");

        print!("{}", Theme::bold());
        print!("{}", Theme::fg(&theme.colors.match_highlight_fg));
        print!("{}", Theme::bg(&theme.colors.match_highlight_bg));
        let highlighted_section: String = chars[start..end].iter().collect();
        print!("{highlighted_section}");
        print!("{}", Theme::reset());

        if is_active {
            print!("{}", Theme::fg(&theme.colors.selection_fg));
            print!("{}", Theme::bg(&theme.colors.selection_bg));
        } else {
            print!("{}", Theme::fg(&theme.colors.text_normal));
        }

        current_pos = end;
    }

    if current_pos < chars.len() {
        let remaining: String = chars[current_pos..].iter().collect();
        print!("{remaining}");
    }
}

/// Strips HTML tags and decodes the entities HN emits in comment bodies.
///
/// Paragraph tags become blank-line breaks.
///
/// ```rust
/// use hnsearch::ui::helpers::strip_html;
///
/// assert_eq!(strip_html("a<p>b &amp; <i>c</i>"), "a\n\nb & c");
/// ```
#[must_use]
pub fn strip_html(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut rest = html;

    while let Some(open) = rest.find('<') {
        out.push_str(&rest[..open]);
        let Some(close) = rest[open..].find('>') else {
            out.push_str(&rest[open..]);
            rest = "";
            break;
        };
        let tag = rest[open + 1..open + close].trim().to_ascii_lowercase();
        if tag == "p" || tag.starts_with("p ") {
            out.push_str("\n\n");
        } else if tag.starts_with("br") {
            out.push('\n');
        }
        rest = &rest[open + close + 1..];
    }
    out.push_str(rest);

    decode_entities(&out).trim().to_string()
}

fn decode_entities(text: &str) -> String {
    const NAMED: [(&str, &str); 6] = [
        ("&quot;", "\""),
        ("&#x27;", "'"),
        ("&#39;", "'"),
        ("&#x2F;", "/"),
        ("&lt;", "<"),
        ("&gt;", ">"),
    ];

    let mut out = text.to_string();
    for (entity, plain) in NAMED {
        out = out.replace(entity, plain);
    }
    // last, so "&amp;lt;" decodes to "&lt;" and not "<"
    out.replace("&amp;", "&")
}

/// Greedy word wrap to `width` chars. Words longer than a line are split.
#[must_use]
pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    let width = width.max(1);
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        let mut line = String::new();
        let mut line_len = 0;
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > width {
                if line_len > 0 {
                    lines.push(std::mem::take(&mut line));
                    line_len = 0;
                }
                lines.push(word.drain(..width).collect());
            }
            let word_len = word.len();
            if word_len == 0 {
                continue;
            }
            if line_len > 0 && line_len + 1 + word_len > width {
                lines.push(std::mem::take(&mut line));
                line_len = 0;
            }
            if line_len > 0 {
                line.push(' ');
                line_len += 1;
            }
            line.extend(word);
            line_len += word_len;
        }
        lines.push(line);
    }

    lines
}
