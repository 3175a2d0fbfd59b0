mod contact;
mod message;
mod request;

pub use contact::{default_contacts, Contact, ASSISTANT_CONTACT_ID, ASSISTANT_GREETING};
pub use message::*;
pub use request::{ChatMessage, CompletionRequest};
