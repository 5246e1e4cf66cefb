//! Conversation state: the ordered, append-only message history.
//!
//! The whole history is sent to the model on every turn, so request size
//! grows linearly with the length of the session.

mod message;

pub use message::{Message, Role};

/// An append-only sequence of messages, seeded once with context.
#[derive(Debug, Default)]
pub struct Conversation {
    messages: Vec<Message>,
    initialized: bool,
}

impl Conversation {
    /// Creates an empty, uninitialized conversation.
    pub const fn new() -> Self {
        Self {
            messages: Vec::new(),
            initialized: false,
        }
    }

    /// Seeds the conversation. Must be called exactly once, before any `append`.
    ///
    /// # Panics
    ///
    /// Panics if the conversation has already been initialized.
    pub fn initialize(&mut self, seed: Vec<Message>) {
        assert!(!self.initialized, "conversation initialized twice");
        self.messages = seed;
        self.initialized = true;
    }

    /// Appends a message to the end of the history.
    ///
    /// # Panics
    ///
    /// Panics if called before [`Conversation::initialize`].
    pub fn append(&mut self, role: Role, content: impl Into<String>) {
        assert!(
            self.initialized,
            "conversation appended to before initialization"
        );
        self.messages.push(Message::new(role, content));
    }

    /// The full history in insertion order.
    pub fn history(&self) -> &[Message] {
        &self.messages
    }

    pub const fn len(&self) -> usize {
        self.messages.len()
    }

    pub const fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub const fn is_initialized(&self) -> bool {
        self.initialized
    }
}
