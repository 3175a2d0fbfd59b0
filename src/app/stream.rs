//! Sending the composed input.

use futures::StreamExt;
use tokio::sync::oneshot;
use uuid::Uuid;

use super::{ActiveSend, App, AppMessage};
use crate::accumulator::StreamAccumulator;
use crate::completion::cancellable;
use crate::models::{MessageId, MessageRecord};

/// Notice shown when a second send is attempted while one is streaming.
pub const BUSY_NOTICE: &str = "Still answering. Press Esc to stop generating.";

/// What `submit_input` did
#[derive(Debug, Clone, PartialEq)]
pub enum SendOutcome {
    /// Input was blank; nothing happened
    Empty,
    /// A reply is still streaming; the input was kept
    Busy,
    /// Appended to a conversation that is not answered by the model
    Delivered,
    /// Appended, and a reply is streaming into placeholder `placeholder`
    Streaming { placeholder: MessageId },
}

impl App {
    /// Send the composed input to the active conversation.
    ///
    /// Blank input is rejected without creating a record; anything else is
    /// stored and sent exactly as typed. For the assistant the user record and
    /// an empty pending placeholder are appended and a task is spawned that
    /// streams the reply back as [`AppMessage`]s.
    ///
    /// Must be called from within a tokio runtime.
    pub fn submit_input(&mut self) -> SendOutcome {
        if self.input.trim().is_empty() {
            return SendOutcome::Empty;
        }

        let Some(contact) = self.active_contact().cloned() else {
            return SendOutcome::Empty;
        };

        if contact.assistant && self.is_streaming() {
            self.notice = Some(BUSY_NOTICE.to_string());
            self.mark_dirty();
            return SendOutcome::Busy;
        }

        // Stored and sent as typed
        let text = std::mem::take(&mut self.input);
        self.scroll_from_bottom = 0;
        self.mark_dirty();

        let user_id = self.store.next_id();
        self.store.append(MessageRecord::own(user_id, contact.id, text));

        if !contact.assistant {
            return SendOutcome::Delivered;
        }

        let history = self.store.history_for(contact.id);
        let placeholder = self.store.next_id();
        self.store.append(MessageRecord::pending(placeholder, contact.id));

        let send_id = Uuid::new_v4();
        let (cancel_tx, cancel_rx) = oneshot::channel();
        let mut events = cancellable(self.client().stream(history), cancel_rx);
        let message_tx = self.message_tx.clone();

        tracing::info!(
            "Send {} to contact {} (placeholder {})",
            send_id,
            contact.id,
            placeholder
        );

        let task = tokio::spawn(async move {
            while let Some(event) = events.next().await {
                if message_tx
                    .send(AppMessage::Stream { send_id, event })
                    .is_err()
                {
                    // UI loop is gone
                    break;
                }
            }
        });

        self.active_send = Some(ActiveSend {
            send_id,
            accumulator: StreamAccumulator::new(placeholder, contact.id),
            cancel_tx: Some(cancel_tx),
            task,
        });

        SendOutcome::Streaming { placeholder }
    }
}
