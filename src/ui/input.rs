//! Input box and key hints

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_NOTICE};
use super::wrap::wrap_line_with_prefix;
use crate::app::App;

/// Most rows the input box grows to
pub const MAX_INPUT_ROWS: u16 = 6;

/// Height of the input box including borders for `width` columns.
pub fn input_height(app: &App, width: u16) -> u16 {
    let rows = input_rows(app, width.saturating_sub(2) as usize).len();
    let rows = u16::try_from(rows).unwrap_or(u16::MAX);
    rows.clamp(1, MAX_INPUT_ROWS) + 2
}

fn input_rows(app: &App, width: usize) -> Vec<Line<'static>> {
    app.input
        .split('\n')
        .flat_map(|l| wrap_line_with_prefix(Line::raw(l.to_string()), "", Style::default(), width))
        .collect()
}

/// Render the input box into `area` and place the cursor.
pub fn render_input(frame: &mut Frame, area: Rect, app: &App) {
    let border = if app.is_streaming() { COLOR_BORDER } else { COLOR_ACCENT };
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(border))
        .title(Span::styled(" Message ", Style::new().fg(COLOR_DIM)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let rows = input_rows(app, inner.width as usize);
    let cursor_col = rows
        .last()
        .map(|l| l.spans.iter().map(|s| s.content.width()).sum::<usize>())
        .unwrap_or(0);
    let cursor_col = u16::try_from(cursor_col).unwrap_or(u16::MAX);

    // Keep the tail, where the cursor is
    let skip = rows.len().saturating_sub(inner.height as usize);
    let rows: Vec<Line<'static>> = rows.into_iter().skip(skip).collect();
    let cursor_row = u16::try_from(rows.len().saturating_sub(1)).unwrap_or(u16::MAX);

    frame.render_widget(Paragraph::new(rows), inner);
    frame.set_cursor_position((
        inner.x + cursor_col.min(inner.width.saturating_sub(1)),
        inner.y + cursor_row.min(inner.height.saturating_sub(1)),
    ));
}

/// Render the status line: the pending notice, or the key hints.
pub fn render_status_line(frame: &mut Frame, area: Rect, app: &App) {
    let line = match &app.notice {
        Some(notice) => Line::styled(notice.clone(), Style::new().fg(COLOR_NOTICE)),
        None if app.is_streaming() => Line::styled(
            " Esc stop generating · Ctrl+C quit",
            Style::new().fg(COLOR_DIM),
        ),
        None => Line::styled(
            " Enter send · Alt+Enter newline · ↑/↓ switch chat · PgUp/PgDn scroll · Ctrl+C quit",
            Style::new().fg(COLOR_DIM),
        ),
    };
    frame.render_widget(Paragraph::new(line), area);
}
