//! Reply accumulation for one in-flight send.
//!
//! The accumulator owns the text received so far and is the only writer of
//! the pending placeholder it is bound to. It moves `Active -> Done` or
//! `Active -> Errored` exactly once and ignores everything afterwards.

use crate::cache::ConversationStore;
use crate::models::{ContactId, MessageId, MessageRecord};
use crate::sse::StreamEvent;

/// Lifecycle of a [`StreamAccumulator`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StreamPhase {
    /// Receiving fragments
    Active,
    /// Finalized into a settled reply
    Done,
    /// Replaced by a failure notice
    Errored,
}

/// Running buffer for one assistant reply.
#[derive(Debug)]
pub struct StreamAccumulator {
    buffer: String,
    target: MessageId,
    conversation_id: ContactId,
    phase: StreamPhase,
}

impl StreamAccumulator {
    /// Bind a new accumulator to the placeholder `target` in `conversation_id`.
    pub fn new(target: MessageId, conversation_id: ContactId) -> Self {
        Self {
            buffer: String::new(),
            target,
            conversation_id,
            phase: StreamPhase::Active,
        }
    }

    pub fn phase(&self) -> StreamPhase {
        self.phase
    }

    pub fn is_active(&self) -> bool {
        self.phase == StreamPhase::Active
    }

    pub fn buffer(&self) -> &str {
        &self.buffer
    }

    /// Id of the placeholder this accumulator writes to.
    pub fn target(&self) -> MessageId {
        self.target
    }

    pub fn conversation_id(&self) -> ContactId {
        self.conversation_id
    }

    /// Append a fragment and mirror the whole buffer into the placeholder.
    pub fn on_fragment(&mut self, store: &mut ConversationStore, text: &str) {
        if !self.is_active() {
            return;
        }
        self.buffer.push_str(text);
        store.update_pending_text(self.target, &self.buffer);
    }

    /// Replace the placeholder with the settled reply.
    pub fn on_stream_end(&mut self, store: &mut ConversationStore) {
        if !self.is_active() {
            return;
        }
        self.phase = StreamPhase::Done;
        let text = std::mem::take(&mut self.buffer);
        tracing::debug!("Reply {} finalized ({} bytes)", self.target, text.len());
        store.replace(
            self.target,
            MessageRecord::remote(self.target, self.conversation_id, text),
        );
    }

    /// Replace the placeholder with a failure notice; the partial reply is dropped.
    pub fn on_error(&mut self, store: &mut ConversationStore, reason: &str) {
        if !self.is_active() {
            return;
        }
        self.phase = StreamPhase::Errored;
        self.buffer.clear();
        tracing::warn!("Reply {} failed: {}", self.target, reason);
        store.replace(
            self.target,
            MessageRecord::failed(self.target, self.conversation_id, reason),
        );
    }

    /// Apply one stream event. Returns `true` once the accumulator is settled.
    pub fn apply(&mut self, store: &mut ConversationStore, event: StreamEvent) -> bool {
        match event {
            StreamEvent::Fragment(text) => self.on_fragment(store, &text),
            StreamEvent::End => self.on_stream_end(store),
            StreamEvent::Error(reason) => self.on_error(store, &reason),
        }
        !self.is_active()
    }
}
