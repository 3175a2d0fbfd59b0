//! Keyboard and paste handling.

use crossterm::event::{KeyCode, KeyEvent, KeyEventKind, KeyModifiers};

use super::App;

/// Lines moved per PageUp/PageDown
const PAGE_LINES: u16 = 10;

impl App {
    /// Handle one key event from the terminal.
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        // Any key dismisses the previous notice
        self.notice = None;
        self.mark_dirty();

        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => self.quit(),
            KeyCode::Enter
                if key
                    .modifiers
                    .intersects(KeyModifiers::ALT | KeyModifiers::SHIFT) =>
            {
                self.input.push('\n');
            }
            KeyCode::Enter => {
                self.submit_input();
            }
            KeyCode::Esc => {
                self.cancel_active_stream();
            }
            KeyCode::Up => self.select_previous_contact(),
            KeyCode::Down => self.select_next_contact(),
            KeyCode::PageUp => self.scroll_up(PAGE_LINES),
            KeyCode::PageDown => self.scroll_down(PAGE_LINES),
            KeyCode::Backspace => {
                self.input.pop();
            }
            KeyCode::Char(c) => self.input.push(c),
            KeyCode::Tab => self.input.push_str("    "),
            _ => {}
        }
    }

    /// Insert pasted text into the input. Carriage returns are normalized.
    pub fn handle_paste(&mut self, text: &str) {
        self.input.push_str(&text.replace("\r\n", "\n").replace('\r', "\n"));
        self.mark_dirty();
    }
}
