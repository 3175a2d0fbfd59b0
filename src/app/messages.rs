//! AppMessage enum for async communication within the application.

use uuid::Uuid;

use crate::sse::StreamEvent;

/// Messages sent to the UI loop by background tasks
#[derive(Debug, Clone, PartialEq)]
pub enum AppMessage {
    /// One event of the send identified by `send_id`
    Stream { send_id: Uuid, event: StreamEvent },
}
