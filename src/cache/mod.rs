//! In-memory conversation store
//!
//! Holds the ordered message records of every conversation for the lifetime
//! of the session. Nothing here is persisted.

mod conversation;

use std::collections::HashMap;

use crate::models::{ContactId, MessageId, MessageRecord, ASSISTANT_CONTACT_ID, ASSISTANT_GREETING};

/// Ordered message records per conversation, keyed by contact id
#[derive(Debug)]
pub struct ConversationStore {
    /// Records per conversation in insertion order
    pub(crate) conversations: HashMap<ContactId, Vec<MessageRecord>>,
    /// Next id to hand out; ids are never reused
    next_id: MessageId,
}

impl Default for ConversationStore {
    fn default() -> Self {
        Self {
            conversations: HashMap::new(),
            next_id: 1,
        }
    }
}

impl ConversationStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store whose assistant conversation opens with a greeting
    pub fn with_greeting() -> Self {
        let mut store = Self::new();
        let id = store.next_id();
        store.append(MessageRecord::remote(id, ASSISTANT_CONTACT_ID, ASSISTANT_GREETING));
        store
    }

    /// Allocate a fresh message id.
    pub fn next_id(&mut self) -> MessageId {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Total number of records across all conversations
    pub fn len(&self) -> usize {
        self.conversations.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
