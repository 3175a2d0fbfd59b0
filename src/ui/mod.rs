//! UI rendering
//!
//! Layout:
//! - Left: contact list with last-message previews
//! - Right: the open conversation above a growing input box
//! - Bottom row: notice or key hints

mod contacts;
mod conversation;
mod input;
mod theme;
mod wrap;

pub use contacts::contact_preview;
pub use conversation::{conversation_lines, message_lines};
pub use input::input_height;
pub use theme::spinner_frame;
pub use wrap::{truncate_to_width, wrap_line_with_prefix, wrap_lines_with_prefix};

use ratatui::{
    layout::{Constraint, Direction, Layout},
    Frame,
};

use crate::app::App;

/// Width of the contact pane; it is hidden below twice this width.
pub const CONTACTS_WIDTH: u16 = 28;

/// Draw the whole UI.
pub fn render(frame: &mut Frame, app: &App) {
    let area = frame.area();

    let [main, status] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(3), Constraint::Length(1)])
        .areas(area);

    let chat_area = if main.width >= CONTACTS_WIDTH * 2 {
        let [left, right] = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Length(CONTACTS_WIDTH), Constraint::Min(10)])
            .areas(main);
        contacts::render_contacts(frame, left, app);
        right
    } else {
        main
    };

    let input_rows = input::input_height(app, chat_area.width);
    let [messages, input_area] = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(1), Constraint::Length(input_rows)])
        .areas(chat_area);

    conversation::render_conversation(frame, messages, app);
    input::render_input(frame, input_area, app);
    input::render_status_line(frame, status, app);
}
