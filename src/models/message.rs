use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// Identifier of a message record, unique within a [`ConversationStore`](crate::cache::ConversationStore).
pub type MessageId = u64;

/// Identifier of a contact; each contact owns exactly one conversation.
pub type ContactId = u32;

/// Who authored a message
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    /// The local user
    #[serde(rename = "self")]
    Own,
    /// The contact on the other side (the model, for assistant contacts)
    Remote,
}

impl Sender {
    /// Wire role used when the message is replayed to the completion endpoint.
    pub fn role(self) -> MessageRole {
        match self {
            Sender::Own => MessageRole::User,
            Sender::Remote => MessageRole::Assistant,
        }
    }
}

/// Lifecycle status of a message record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageStatus {
    /// Settled; the record is immutable
    Final,
    /// Placeholder for a reply that is still streaming in
    Pending,
    /// Settled failure notice; the record is immutable
    Failed,
}

/// Role of a message in the outbound completion request
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A single message in a conversation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MessageRecord {
    /// Store-assigned id
    pub id: MessageId,
    /// Conversation (contact) this record belongs to
    pub conversation_id: ContactId,
    /// Displayed text
    pub text: String,
    /// Author of the message
    pub sender: Sender,
    /// Display timestamp (`HH:MM`, local time)
    pub timestamp: String,
    /// Lifecycle status
    pub status: MessageStatus,
}

impl MessageRecord {
    /// A settled message typed by the local user.
    pub fn own(id: MessageId, conversation_id: ContactId, text: impl Into<String>) -> Self {
        Self {
            id,
            conversation_id,
            text: text.into(),
            sender: Sender::Own,
            timestamp: format_timestamp(Local::now()),
            status: MessageStatus::Final,
        }
    }

    /// A settled message from the remote side.
    pub fn remote(id: MessageId, conversation_id: ContactId, text: impl Into<String>) -> Self {
        Self {
            id,
            conversation_id,
            text: text.into(),
            sender: Sender::Remote,
            timestamp: format_timestamp(Local::now()),
            status: MessageStatus::Final,
        }
    }

    /// An empty remote placeholder that will receive streamed text.
    pub fn pending(id: MessageId, conversation_id: ContactId) -> Self {
        Self {
            status: MessageStatus::Pending,
            ..Self::remote(id, conversation_id, String::new())
        }
    }

    /// A settled remote failure notice carrying `reason`.
    pub fn failed(id: MessageId, conversation_id: ContactId, reason: &str) -> Self {
        Self {
            status: MessageStatus::Failed,
            ..Self::remote(id, conversation_id, failure_notice(reason))
        }
    }

    pub fn is_pending(&self) -> bool {
        self.status == MessageStatus::Pending
    }

    pub fn is_own(&self) -> bool {
        self.sender == Sender::Own
    }
}

/// User-facing text shown in place of a reply that could not be produced.
pub fn failure_notice(reason: &str) -> String {
    format!("Sorry, the message failed to send: {}", reason)
}

/// Format a timestamp the way message bubbles and contact rows show it.
pub fn format_timestamp(at: DateTime<Local>) -> String {
    at.format("%H:%M").to_string()
}
