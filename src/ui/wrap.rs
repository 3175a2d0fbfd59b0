//! Word wrapping for styled lines
//!
//! ratatui's `Wrap` does not repeat a prefix on continuation lines and does
//! not report how many rows it used, so message text is wrapped here.

use ratatui::{
    style::Style,
    text::{Line, Span},
};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Truncate `text` to `max_width` columns, appending `…` when cut.
pub fn truncate_to_width(text: &str, max_width: usize) -> String {
    if text.width() <= max_width {
        return text.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let mut out = String::new();
    let mut width = 0;
    for c in text.chars() {
        let w = c.width().unwrap_or(0);
        if width + w + 1 > max_width {
            break;
        }
        out.push(c);
        width += w;
    }
    out.push('…');
    out
}

/// Wrap `line` to `max_width` columns, starting every row with `prefix`.
///
/// Breaks at spaces; words wider than a row are split by character.
pub fn wrap_line_with_prefix(
    line: Line<'static>,
    prefix: &'static str,
    prefix_style: Style,
    max_width: usize,
) -> Vec<Line<'static>> {
    let content_width = max_width.saturating_sub(prefix.width()).max(1);
    let mut rows: Vec<Line<'static>> = Vec::new();
    let mut row: Vec<Span<'static>> = vec![Span::styled(prefix, prefix_style)];
    let mut row_width = 0usize;

    let mut push_row = |row: &mut Vec<Span<'static>>, row_width: &mut usize| {
        rows.push(Line::from(std::mem::replace(
            row,
            vec![Span::styled(prefix, prefix_style)],
        )));
        *row_width = 0;
    };

    for span in line.spans {
        let style = span.style;
        for word in split_keep_spaces(&span.content) {
            let word_width = word.width();

            if word_width <= content_width.saturating_sub(row_width) {
                row.push(Span::styled(word.to_string(), style));
                row_width += word_width;
                continue;
            }
            if word.trim().is_empty() {
                // Whitespace at a break point is dropped
                push_row(&mut row, &mut row_width);
                continue;
            }
            if row_width > 0 && word_width <= content_width {
                push_row(&mut row, &mut row_width);
                row.push(Span::styled(word.to_string(), style));
                row_width = word_width;
                continue;
            }

            // Split an over-long word across rows
            let mut chunk = String::new();
            for c in word.chars() {
                let w = c.width().unwrap_or(0);
                if row_width + w > content_width && (row_width > 0 || !chunk.is_empty()) {
                    row.push(Span::styled(std::mem::take(&mut chunk), style));
                    push_row(&mut row, &mut row_width);
                }
                chunk.push(c);
                row_width += w;
            }
            if !chunk.is_empty() {
                row.push(Span::styled(chunk, style));
            }
        }
    }

    rows.push(Line::from(row));
    rows
}

/// Wrap every line of `lines`.
pub fn wrap_lines_with_prefix(
    lines: Vec<Line<'static>>,
    prefix: &'static str,
    prefix_style: Style,
    max_width: usize,
) -> Vec<Line<'static>> {
    lines
        .into_iter()
        .flat_map(|line| wrap_line_with_prefix(line, prefix, prefix_style, max_width))
        .collect()
}

/// Split into alternating runs of spaces and non-spaces.
fn split_keep_spaces(text: &str) -> Vec<&str> {
    let mut parts = Vec::new();
    let mut start = 0;
    let mut in_space = None;

    for (i, c) in text.char_indices() {
        let is_space = c == ' ';
        match in_space {
            Some(prev) if prev != is_space => {
                parts.push(&text[start..i]);
                start = i;
            }
            _ => {}
        }
        in_space = Some(is_space);
    }
    if start < text.len() {
        parts.push(&text[start..]);
    }
    parts
}
