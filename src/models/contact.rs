use super::message::ContactId;

/// A row in the contact list.
#[derive(Debug, Clone, PartialEq)]
pub struct Contact {
    pub id: ContactId,
    pub name: String,
    /// Single glyph shown next to the name
    pub avatar: String,
    /// Preview shown when the conversation has no messages yet
    pub greeting: String,
    /// Whether messages to this contact are answered by the completion endpoint
    pub assistant: bool,
}

impl Contact {
    pub fn new(id: ContactId, name: impl Into<String>, avatar: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            avatar: avatar.into(),
            greeting: String::new(),
            assistant: false,
        }
    }

    /// Mark the contact as backed by the completion endpoint.
    pub fn as_assistant(mut self) -> Self {
        self.assistant = true;
        self
    }

    pub fn with_greeting(mut self, greeting: impl Into<String>) -> Self {
        self.greeting = greeting.into();
        self
    }
}

/// Id of the seeded assistant contact.
pub const ASSISTANT_CONTACT_ID: ContactId = 1;

/// Greeting the assistant conversation opens with.
pub const ASSISTANT_GREETING: &str = "Hi, I'm your AI assistant. How can I help you?";

/// The contacts every session starts with.
pub fn default_contacts() -> Vec<Contact> {
    vec![
        Contact::new(ASSISTANT_CONTACT_ID, "AI Assistant", "🤖")
            .as_assistant()
            .with_greeting(ASSISTANT_GREETING),
        Contact::new(2, "Zhang San", "👨").with_greeting("See you tomorrow"),
        Contact::new(3, "Li Si", "👩").with_greeting("Okay, thanks"),
    ]
}
