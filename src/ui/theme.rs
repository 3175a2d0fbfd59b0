//! Color theme for the chat UI

use ratatui::style::{Color, Modifier, Style};

/// Borders of unfocused panes
pub const COLOR_BORDER: Color = Color::DarkGray;

/// Highlights and the focused pane
pub const COLOR_ACCENT: Color = Color::Cyan;

/// Secondary text: timestamps, previews, hints
pub const COLOR_DIM: Color = Color::DarkGray;

/// Bar beside messages typed by the user
pub const COLOR_OWN: Color = Color::Green;

/// Bar beside replies
pub const COLOR_REMOTE: Color = Color::Blue;

/// Failure notices
pub const COLOR_ERROR: Color = Color::Red;

/// Notices above the input
pub const COLOR_NOTICE: Color = Color::Yellow;

/// Selected contact row
pub const STYLE_SELECTED: Style = Style::new()
    .fg(Color::Black)
    .bg(COLOR_ACCENT)
    .add_modifier(Modifier::BOLD);

/// Typing indicator frames
pub const SPINNER_FRAMES: [&str; 4] = ["·  ", "·· ", "···", " ··"];

/// Spinner frame for `tick`; advances every 8 ticks.
pub fn spinner_frame(tick: u64) -> &'static str {
    SPINNER_FRAMES[((tick / 8) % SPINNER_FRAMES.len() as u64) as usize]
}
