//! # hlpr - Chat with OpenAI models from the terminal
//!
//! `hlpr` is an interactive REPL that keeps a conversation with a model,
//! optionally seeded with the contents of local files.
//!
//! ## Features
//!
//! - **File context**: Pass `-f <path>` (repeatable) to include files in the conversation
//! - **Streaming replies**: See the answer as it arrives
//! - **Usage statistics**: `-s` prints token counts after every reply
//! - **Web search**: `-w` lets the model search the web
//!
//! ## Quick Start
//!
//! ```bash
//! # Start a chat with the default model
//! hlpr
//!
//! # Discuss a file with a specific model
//! hlpr -m gpt-4.1 -f ./notes.md
//!
//! # List supported models
//! hlpr --list-models
//! ```
//!
//! ## Configuration
//!
//! Settings are stored in `~/.config/hlpr/config.toml`:
//!
//! ```toml
//! [hlpr]
//! model = "gpt-4.1-mini"
//! stats = true
//! api_key_env = "OPENAI_API_KEY"
//! ```

/// Interactive chat mode.
pub mod chat;

/// Command-line interface definitions and handlers.
pub mod cli;

/// Streaming completion client.
pub mod completion;

/// Configuration file management.
pub mod config;

/// Loading file contents as conversation context.
pub mod context;

/// Conversation history.
pub mod conversation;

/// Ctrl+C handling.
pub mod interrupt;

/// Diagnostic logging setup.
pub mod logging;

/// Supported models.
pub mod models;

/// Global output configuration (quiet mode, colors, stderr/stdout routing).
pub mod output;

/// XDG-style path utilities for configuration.
pub mod paths;

/// Terminal UI components (spinner, colors).
pub mod ui;
