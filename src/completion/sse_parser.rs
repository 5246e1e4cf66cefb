//! Server-Sent Events (SSE) parser for streaming Responses API replies.
//!
//! Each `data:` line carries one JSON event tagged by `type`. Only the events
//! that affect the reply are decoded; everything else is skipped.

use anyhow::Result;
use bytes::Bytes;
use futures_util::Stream;
use serde::Deserialize;
use tracing::debug;

use super::service::{CompletionEvent, Usage};

#[derive(Debug, Deserialize)]
#[serde(tag = "type")]
enum StreamEvent {
    #[serde(rename = "response.output_text.delta")]
    OutputTextDelta { delta: String },
    #[serde(rename = "response.completed")]
    Completed { response: ResponseBody },
    #[serde(rename = "response.incomplete")]
    Incomplete { response: ResponseBody },
    #[serde(rename = "response.failed")]
    Failed { response: ResponseBody },
    #[serde(rename = "error")]
    Error {
        #[serde(default)]
        code: Option<String>,
        #[serde(default)]
        message: Option<String>,
    },
    #[serde(other)]
    Other,
}

#[derive(Debug, Default, Deserialize)]
struct ResponseBody {
    #[serde(default)]
    usage: Option<WireUsage>,
    #[serde(default)]
    error: Option<WireError>,
}

// A usage block missing any count is reported as no usage at all.
#[derive(Debug, Default, Deserialize)]
struct WireUsage {
    input_tokens: Option<u64>,
    output_tokens: Option<u64>,
    total_tokens: Option<u64>,
    #[serde(default)]
    input_tokens_details: Option<InputTokensDetails>,
}

#[derive(Debug, Default, Deserialize)]
struct InputTokensDetails {
    cached_tokens: Option<u64>,
}

#[derive(Debug, Deserialize)]
struct WireError {
    #[serde(default)]
    code: Option<String>,
    #[serde(default)]
    message: Option<String>,
}

impl WireUsage {
    fn into_usage(self) -> Option<Usage> {
        Some(Usage {
            input_tokens: self.input_tokens?,
            output_tokens: self.output_tokens?,
            cached_tokens: self.input_tokens_details.and_then(|d| d.cached_tokens),
            total_tokens: self.total_tokens?,
        })
    }
}

fn describe_error(code: Option<String>, message: Option<String>) -> String {
    match (code, message) {
        (Some(code), Some(message)) => format!("{message} ({code})"),
        (None, Some(message)) => message,
        (Some(code), None) => code,
        (None, None) => "unknown error".to_string(),
    }
}

/// Converts a raw SSE byte stream into a stream of completion events.
///
/// The stream ends after the first terminal event (`response.completed`,
/// `response.incomplete`) or the first error. A transport error is yielded
/// once and ends the stream.
pub fn sse_to_events(
    byte_stream: impl Stream<Item = reqwest::Result<Bytes>> + Send + 'static,
) -> impl Stream<Item = Result<CompletionEvent>> + Send {
    async_stream::stream! {
        use futures_util::StreamExt;

        let mut byte_stream = std::pin::pin!(byte_stream);
        // Raw bytes; a chunk boundary may fall inside a multibyte character.
        let mut buffer: Vec<u8> = Vec::new();

        while let Some(chunk_result) = byte_stream.next().await {
            let chunk = match chunk_result {
                Ok(c) => c,
                Err(e) => {
                    yield Err(anyhow::anyhow!("Stream error: {e}"));
                    return;
                }
            };

            buffer.extend_from_slice(&chunk);

            while let Some(line_end) = buffer.iter().position(|&b| b == b'\n') {
                let line_bytes: Vec<u8> = buffer.drain(..=line_end).collect();
                let line = String::from_utf8_lossy(&line_bytes);

                if let Some(event) = parse_sse_line(line.trim()) {
                    let terminal = !matches!(event, Ok(CompletionEvent::Delta(_)));
                    yield event;
                    if terminal {
                        return;
                    }
                }
            }
        }

        let rest = String::from_utf8_lossy(&buffer);
        if let Some(event) = parse_sse_line(rest.trim()) {
            yield event;
        }
    }
}

/// Parses a single SSE line.
///
/// Returns `None` for non-data lines, unknown event types, empty deltas and
/// payloads that are not valid JSON.
fn parse_sse_line(line: &str) -> Option<Result<CompletionEvent>> {
    let json_str = line.strip_prefix("data:")?.trim_start();

    let event = match serde_json::from_str::<StreamEvent>(json_str) {
        Ok(event) => event,
        Err(e) => {
            debug!(error = %e, "skipping unparsable stream event");
            return None;
        }
    };

    match event {
        StreamEvent::OutputTextDelta { delta } if delta.is_empty() => None,
        StreamEvent::OutputTextDelta { delta } => Some(Ok(CompletionEvent::Delta(delta))),
        StreamEvent::Completed { response } | StreamEvent::Incomplete { response } => {
            Some(Ok(CompletionEvent::Completed {
                usage: response.usage.and_then(WireUsage::into_usage),
            }))
        }
        StreamEvent::Failed { response } => {
            let detail = response
                .error
                .map_or_else(|| "unknown error".to_string(), |e| describe_error(e.code, e.message));
            Some(Err(anyhow::anyhow!("Response failed: {detail}")))
        }
        StreamEvent::Error { code, message } => Some(Err(anyhow::anyhow!(
            "API stream error: {}",
            describe_error(code, message)
        ))),
        StreamEvent::Other => None,
    }
}
