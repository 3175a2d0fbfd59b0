//! Message pane for the open conversation

use ratatui::{
    layout::{Alignment, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
    Frame,
};

use super::theme::{
    spinner_frame, COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, COLOR_ERROR, COLOR_OWN, COLOR_REMOTE,
};
use super::wrap::wrap_lines_with_prefix;
use crate::app::App;
use crate::markdown::render_markdown;
use crate::models::{Contact, MessageRecord, MessageStatus, Sender};

/// Cursor drawn after a reply that is still streaming
const STREAM_CURSOR: &str = "▌";

/// Lines for one record, wrapped to `width` columns.
pub fn message_lines(
    record: &MessageRecord,
    contact: &Contact,
    width: usize,
    tick: u64,
) -> Vec<Line<'static>> {
    let (author, bar_color) = match record.sender {
        Sender::Own => ("You".to_string(), COLOR_OWN),
        Sender::Remote => (format!("{} {}", contact.avatar, contact.name), COLOR_REMOTE),
    };
    let bar = Style::new().fg(bar_color);

    let mut lines = vec![Line::from(vec![
        Span::styled(author, bar.add_modifier(Modifier::BOLD)),
        Span::styled(format!("  {}", record.timestamp), Style::new().fg(COLOR_DIM)),
    ])];

    let body: Vec<Line<'static>> = match record.status {
        MessageStatus::Pending if record.text.is_empty() => vec![Line::styled(
            spinner_frame(tick).to_string(),
            Style::new().fg(COLOR_DIM),
        )],
        MessageStatus::Pending => {
            let mut body = render_markdown(&record.text, Style::default());
            if let Some(last) = body.last_mut() {
                last.spans
                    .push(Span::styled(STREAM_CURSOR, Style::new().fg(COLOR_ACCENT)));
            }
            body
        }
        MessageStatus::Failed => record
            .text
            .lines()
            .map(|l| Line::styled(l.to_string(), Style::new().fg(COLOR_ERROR)))
            .collect(),
        MessageStatus::Final => match record.sender {
            Sender::Own => record.text.lines().map(|l| Line::raw(l.to_string())).collect(),
            Sender::Remote => render_markdown(&record.text, Style::default()),
        },
    };

    let bar = if record.status == MessageStatus::Failed {
        Style::new().fg(COLOR_ERROR)
    } else {
        bar
    };
    lines.extend(wrap_lines_with_prefix(body, "│ ", bar, width));
    lines
}

/// All lines of the open conversation, one blank line between records.
pub fn conversation_lines(app: &App, width: usize) -> Vec<Line<'static>> {
    let Some(contact) = app.active_contact() else {
        return Vec::new();
    };

    let mut lines = Vec::new();
    for record in app.store.filter_by_conversation(contact.id) {
        if !lines.is_empty() {
            lines.push(Line::default());
        }
        lines.extend(message_lines(record, contact, width, app.tick_count));
    }
    lines
}

/// Render the open conversation, pinned to the bottom unless scrolled.
pub fn render_conversation(frame: &mut Frame, area: Rect, app: &App) {
    let title = app
        .active_contact()
        .map(|c| format!(" {} {} ", c.avatar, c.name))
        .unwrap_or_default();
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(Style::new().fg(COLOR_BORDER))
        .title(Span::styled(title, Style::new().fg(COLOR_ACCENT)));
    let inner = block.inner(area);
    frame.render_widget(block, area);

    let lines = conversation_lines(app, inner.width as usize);
    if lines.is_empty() {
        let empty = Paragraph::new("No messages yet")
            .style(Style::new().fg(COLOR_DIM))
            .alignment(Alignment::Center);
        frame.render_widget(empty, inner);
        return;
    }

    let visible = visible_window(lines, inner.height as usize, app.scroll_from_bottom as usize);
    frame.render_widget(Paragraph::new(visible), inner);
}

/// The `height` lines ending `scroll_from_bottom` lines above the last one.
///
/// Sliced here rather than through `Paragraph::scroll`, whose offset is a
/// `u16` and cannot address long conversations.
pub fn visible_window(
    lines: Vec<Line<'static>>,
    height: usize,
    scroll_from_bottom: usize,
) -> Vec<Line<'static>> {
    let max_scroll = lines.len().saturating_sub(height);
    let top = max_scroll - scroll_from_bottom.min(max_scroll);
    lines.into_iter().skip(top).take(height).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn numbered(count: usize) -> Vec<Line<'static>> {
        (0..count).map(|i| Line::raw(format!("line{}", i))).collect()
    }

    fn texts(lines: &[Line<'static>]) -> Vec<String> {
        lines.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn test_window_is_pinned_to_bottom() {
        let window = visible_window(numbered(10), 3, 0);
        assert_eq!(texts(&window), ["line7", "line8", "line9"]);
    }

    #[test]
    fn test_window_scrolls_and_clamps_at_top() {
        let window = visible_window(numbered(10), 3, 2);
        assert_eq!(texts(&window), ["line5", "line6", "line7"]);

        let window = visible_window(numbered(10), 3, 500);
        assert_eq!(texts(&window), ["line0", "line1", "line2"]);
    }

    #[test]
    fn test_window_shorter_than_height() {
        let window = visible_window(numbered(2), 5, 3);
        assert_eq!(texts(&window), ["line0", "line1"]);
    }

    #[test]
    fn test_window_past_u16_range() {
        let window = visible_window(numbered(70_000), 2, 0);
        assert_eq!(texts(&window), ["line69998", "line69999"]);
    }
}
