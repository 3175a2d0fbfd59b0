//! Application state and logic.
//!
//! `App` owns the contact list, the conversation store, the input buffer and
//! at most one in-flight send. Network tasks never touch the store; they
//! forward [`AppMessage`]s that the UI loop hands to [`App::handle_message`].

mod cancel;
mod handlers;
mod messages;
mod navigation;
mod stream;

pub use messages::AppMessage;
pub use stream::SendOutcome;

use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use uuid::Uuid;

use crate::accumulator::StreamAccumulator;
use crate::cache::ConversationStore;
use crate::completion::CompletionClient;
use crate::models::{default_contacts, Contact};

/// The send currently streaming into a placeholder
#[derive(Debug)]
pub struct ActiveSend {
    /// Correlates stream messages with this send
    pub send_id: Uuid,
    pub accumulator: StreamAccumulator,
    /// Taken when a cancel is requested
    cancel_tx: Option<oneshot::Sender<()>>,
    task: JoinHandle<()>,
}

/// Main application state
pub struct App {
    /// Contacts in display order
    pub contacts: Vec<Contact>,
    /// Index into `contacts` of the open conversation
    pub active_contact: usize,
    /// Text being composed
    pub input: String,
    /// All conversations
    pub store: ConversationStore,
    /// In-flight send, if any
    pub active_send: Option<ActiveSend>,
    /// One-line notice shown above the input until the next key press
    pub notice: Option<String>,
    /// Lines scrolled up from the bottom of the message pane
    pub scroll_from_bottom: u16,
    /// Animation counter advanced by the UI loop
    pub tick_count: u64,
    pub should_quit: bool,
    /// Set when state changed since the last draw
    pub needs_redraw: bool,
    client: CompletionClient,
    /// Sender handed to background tasks
    pub message_tx: mpsc::UnboundedSender<AppMessage>,
    /// Receiver taken by the UI loop
    pub message_rx: Option<mpsc::UnboundedReceiver<AppMessage>>,
}

impl App {
    /// Create the app with the default contacts and the greeting record.
    pub fn new(client: CompletionClient) -> Self {
        Self::with_contacts(client, default_contacts(), ConversationStore::with_greeting())
    }

    pub fn with_contacts(
        client: CompletionClient,
        contacts: Vec<Contact>,
        store: ConversationStore,
    ) -> Self {
        let (message_tx, message_rx) = mpsc::unbounded_channel();
        Self {
            contacts,
            active_contact: 0,
            input: String::new(),
            store,
            active_send: None,
            notice: None,
            scroll_from_bottom: 0,
            tick_count: 0,
            should_quit: false,
            needs_redraw: true,
            client,
            message_tx,
            message_rx: Some(message_rx),
        }
    }

    /// The open conversation's contact.
    pub fn active_contact(&self) -> Option<&Contact> {
        self.contacts.get(self.active_contact)
    }

    pub fn client(&self) -> &CompletionClient {
        &self.client
    }

    /// Whether a reply is currently streaming.
    pub fn is_streaming(&self) -> bool {
        self.active_send.is_some()
    }

    pub fn mark_dirty(&mut self) {
        self.needs_redraw = true;
    }

    /// Advance animations. Only a pending reply animates.
    pub fn tick(&mut self) {
        self.tick_count = self.tick_count.wrapping_add(1);
        if self.is_streaming() {
            self.mark_dirty();
        }
    }

    /// Stop the UI loop; an in-flight network task is aborted.
    pub fn quit(&mut self) {
        if let Some(send) = self.active_send.take() {
            send.task.abort();
        }
        self.should_quit = true;
    }

    /// Apply a message from a background task.
    pub fn handle_message(&mut self, msg: AppMessage) {
        match msg {
            AppMessage::Stream { send_id, event } => {
                let Some(send) = self.active_send.as_mut() else {
                    tracing::debug!("Dropping event for finished send {}", send_id);
                    return;
                };
                if send.send_id != send_id {
                    tracing::debug!("Dropping event for stale send {}", send_id);
                    return;
                }

                let settled = send.accumulator.apply(&mut self.store, event);
                if settled {
                    tracing::info!("Send {} settled as {:?}", send_id, send.accumulator.phase());
                    self.active_send = None;
                }
                self.mark_dirty();
            }
        }
    }
}
