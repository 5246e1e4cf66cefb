use anyhow::Result;
use async_trait::async_trait;
use futures_util::Stream;
use std::pin::Pin;

use super::request::CompletionRequest;

/// Token counts reported by the service for one response.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Usage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    /// Prompt tokens served from the provider's cache, when reported.
    pub cached_tokens: Option<u64>,
    pub total_tokens: u64,
}

/// One item of a streamed reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CompletionEvent {
    /// A fragment of reply text.
    Delta(String),
    /// The reply is complete. `usage` is `None` when the service omitted it.
    Completed { usage: Option<Usage> },
}

pub type CompletionStream = Pin<Box<dyn Stream<Item = Result<CompletionEvent>> + Send>>;

/// A remote model that turns a conversation into a streamed reply.
#[async_trait]
pub trait CompletionService: Send + Sync {
    /// Starts a completion for `request`.
    ///
    /// Errors returned here, or yielded by the stream, fail the turn.
    async fn stream(&self, request: &CompletionRequest<'_>) -> Result<CompletionStream>;
}
