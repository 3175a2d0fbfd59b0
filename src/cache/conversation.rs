//! Record-level operations for ConversationStore

use crate::models::{ChatMessage, ContactId, MessageId, MessageRecord, MessageStatus};

use super::ConversationStore;

impl ConversationStore {
    /// Add a record to the tail of its conversation
    pub fn append(&mut self, record: MessageRecord) {
        self.conversations
            .entry(record.conversation_id)
            .or_default()
            .push(record);
    }

    /// Look up a record by id
    pub fn get(&self, id: MessageId) -> Option<&MessageRecord> {
        self.conversations
            .values()
            .flat_map(|records| records.iter())
            .find(|record| record.id == id)
    }

    fn get_mut(&mut self, id: MessageId) -> Option<&mut MessageRecord> {
        self.conversations
            .values_mut()
            .flat_map(|records| records.iter_mut())
            .find(|record| record.id == id)
    }

    /// Replace the record with `id` in place, keeping its position.
    ///
    /// Returns false (and changes nothing) when no record has that id.
    pub fn replace(&mut self, id: MessageId, new_record: MessageRecord) -> bool {
        match self.get_mut(id) {
            Some(record) => {
                *record = new_record;
                true
            }
            None => {
                tracing::debug!("replace: message {} not found", id);
                false
            }
        }
    }

    /// Overwrite the text of a pending record.
    ///
    /// No-op when the id is unknown or the record has already settled.
    pub fn update_pending_text(&mut self, id: MessageId, text: &str) -> bool {
        match self.get_mut(id) {
            Some(record) if record.status == MessageStatus::Pending => {
                record.text.clear();
                record.text.push_str(text);
                true
            }
            Some(_) => {
                tracing::debug!("update_pending_text: message {} already settled", id);
                false
            }
            None => false,
        }
    }

    /// Ordered records of one conversation
    pub fn filter_by_conversation(&self, conversation_id: ContactId) -> &[MessageRecord] {
        self.conversations
            .get(&conversation_id)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Latest record of a conversation, for contact list previews
    pub fn last_message(&self, conversation_id: ContactId) -> Option<&MessageRecord> {
        self.filter_by_conversation(conversation_id).last()
    }

    /// Whether a reply is still streaming into this conversation
    pub fn has_pending(&self, conversation_id: ContactId) -> bool {
        self.filter_by_conversation(conversation_id)
            .iter()
            .any(MessageRecord::is_pending)
    }

    /// Settled history of a conversation in completion-request form.
    ///
    /// Pending placeholders and failure notices are deliberately left out;
    /// only settled turns reach the model.
    pub fn history_for(&self, conversation_id: ContactId) -> Vec<ChatMessage> {
        self.filter_by_conversation(conversation_id)
            .iter()
            .filter(|record| record.status == MessageStatus::Final)
            .map(|record| ChatMessage {
                role: record.sender.role(),
                content: record.text.clone(),
            })
            .collect()
    }
}
