use crate::conversation::Message;
use crate::models::Model;

/// Preamble sent as instructions with every request unless configured otherwise.
pub const DEFAULT_INSTRUCTIONS: &str = "You're a helpful and friendly assistant.";

/// Everything the service needs for one turn.
#[derive(Debug, Clone, Copy)]
pub struct CompletionRequest<'a> {
    pub model: Model,
    /// The full conversation history, oldest first.
    pub messages: &'a [Message],
    pub instructions: &'a str,
    /// Whether the model may use the hosted web search tool.
    pub web_search: bool,
}
