//! Contact list pane

use ratatui::{
    layout::Rect,
    style::Style,
    text::{Line, Span},
    widgets::{Block, Borders, List, ListItem, ListState},
    Frame,
};
use unicode_width::UnicodeWidthStr;

use super::theme::{COLOR_ACCENT, COLOR_BORDER, COLOR_DIM, STYLE_SELECTED};
use super::wrap::truncate_to_width;
use crate::app::App;
use crate::models::{Contact, MessageStatus};

/// Preview text and time for a contact row.
///
/// The latest record wins; an empty conversation shows the greeting.
pub fn contact_preview(app: &App, contact: &Contact) -> (String, String) {
    match app.store.last_message(contact.id) {
        Some(record) if record.status == MessageStatus::Pending && record.text.is_empty() => {
            ("typing…".to_string(), record.timestamp.clone())
        }
        Some(record) => {
            let first_line = record.text.lines().next().unwrap_or_default().to_string();
            (first_line, record.timestamp.clone())
        }
        None => (contact.greeting.clone(), String::new()),
    }
}

fn contact_item(app: &App, contact: &Contact, width: usize) -> ListItem<'static> {
    let (preview, time) = contact_preview(app, contact);

    let name = format!("{} {}", contact.avatar, contact.name);
    let gap = width.saturating_sub(name.width() + time.width()).max(1);
    let header = Line::from(vec![
        Span::raw(truncate_to_width(&name, width.saturating_sub(time.width() + 1))),
        Span::raw(" ".repeat(gap)),
        Span::styled(time, Style::new().fg(COLOR_DIM)),
    ]);
    let preview = Line::styled(
        format!("   {}", truncate_to_width(&preview, width.saturating_sub(3))),
        Style::new().fg(COLOR_DIM),
    );

    ListItem::new(vec![header, preview])
}

/// Render the contact list into `area`.
pub fn render_contacts(frame: &mut Frame, area: Rect, app: &App) {
    let inner_width = area.width.saturating_sub(2) as usize;
    let items: Vec<ListItem> = app
        .contacts
        .iter()
        .map(|contact| contact_item(app, contact, inner_width))
        .collect();

    let list = List::new(items)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(Style::new().fg(COLOR_BORDER))
                .title(Span::styled(" Chats ", Style::new().fg(COLOR_ACCENT))),
        )
        .highlight_style(STYLE_SELECTED);

    let mut state = ListState::default().with_selected(Some(app.active_contact));
    frame.render_stateful_widget(list, area, &mut state);
}
