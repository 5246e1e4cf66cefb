//! Streaming completion client for the OpenAI Responses API.

mod client;
mod request;
mod service;
mod sse_parser;

pub use client::ResponsesClient;
pub use request::{CompletionRequest, DEFAULT_INSTRUCTIONS};
pub use service::{CompletionEvent, CompletionService, CompletionStream, Usage};
