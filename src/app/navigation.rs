//! Contact selection and scrolling.

use super::App;
use crate::models::ContactId;

impl App {
    /// Open the next contact, stopping at the last one.
    pub fn select_next_contact(&mut self) {
        if self.active_contact + 1 < self.contacts.len() {
            self.active_contact += 1;
            self.on_contact_changed();
        }
    }

    /// Open the previous contact, stopping at the first one.
    pub fn select_previous_contact(&mut self) {
        if self.active_contact > 0 {
            self.active_contact -= 1;
            self.on_contact_changed();
        }
    }

    /// Open the contact with `id`. Returns `false` if there is none.
    pub fn select_contact(&mut self, id: ContactId) -> bool {
        match self.contacts.iter().position(|c| c.id == id) {
            Some(index) => {
                if index != self.active_contact {
                    self.active_contact = index;
                    self.on_contact_changed();
                }
                true
            }
            None => false,
        }
    }

    fn on_contact_changed(&mut self) {
        self.scroll_from_bottom = 0;
        self.mark_dirty();
    }

    pub fn scroll_up(&mut self, lines: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_add(lines);
        self.mark_dirty();
    }

    pub fn scroll_down(&mut self, lines: u16) {
        self.scroll_from_bottom = self.scroll_from_bottom.saturating_sub(lines);
        self.mark_dirty();
    }
}
