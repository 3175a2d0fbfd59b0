//! Styles applied by the markdown renderer

use ratatui::style::{Color, Modifier, Style};

/// Fenced and indented code blocks
pub const STYLE_CODE_BLOCK: Style = Style::new().fg(Color::DarkGray);

/// Inline `code`
pub const STYLE_INLINE_CODE: Style = Style::new().fg(Color::Cyan);

/// Headings of any level
pub const STYLE_HEADING: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);

/// Markdown links and bare URLs
pub const STYLE_LINK: Style = Style::new()
    .fg(Color::Blue)
    .add_modifier(Modifier::UNDERLINED);

/// Bullet and number prefixes of list items
pub const STYLE_LIST_MARKER: Style = Style::new().fg(Color::Yellow);
