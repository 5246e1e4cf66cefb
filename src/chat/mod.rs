//! Interactive chat mode.
//!
//! Provides the REPL that reads user lines, sends the accumulated
//! conversation to the model and prints streamed replies.

/// Classification of user input lines.
pub mod input;
mod reader;
mod session;
mod ui;

pub use reader::{BufReadSource, LineSource, PromptSource, ReadOutcome};
pub use session::{ChatSession, SessionConfig};
