use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use tracing::debug;

use super::request::CompletionRequest;
use super::service::{CompletionService, CompletionStream};
use super::sse_parser::sse_to_events;
use crate::conversation::Message;

#[derive(Debug, Serialize)]
struct ResponsesRequest<'a> {
    model: &'static str,
    instructions: &'a str,
    input: &'a [Message],
    #[serde(skip_serializing_if = "Vec::is_empty")]
    tools: Vec<Tool>,
    stream: bool,
}

#[derive(Debug, Serialize)]
struct Tool {
    #[serde(rename = "type")]
    kind: &'static str,
    search_context_size: &'static str,
}

impl Tool {
    const fn web_search() -> Self {
        Self {
            kind: "web_search_preview",
            search_context_size: "low",
        }
    }
}

impl<'a> ResponsesRequest<'a> {
    fn from_request(request: &CompletionRequest<'a>) -> Self {
        let mut tools = Vec::new();
        if request.web_search {
            tools.push(Tool::web_search());
        }

        Self {
            model: request.model.id(),
            instructions: request.instructions,
            input: request.messages,
            tools,
            stream: true,
        }
    }
}

/// Client for the OpenAI Responses API.
pub struct ResponsesClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl ResponsesClient {
    pub fn new(endpoint: String, api_key: String) -> Self {
        Self {
            client: Client::new(),
            endpoint,
            api_key,
        }
    }

    fn url(&self) -> String {
        format!("{}/v1/responses", self.endpoint.trim_end_matches('/'))
    }
}

#[async_trait]
impl CompletionService for ResponsesClient {
    async fn stream(&self, request: &CompletionRequest<'_>) -> Result<CompletionStream> {
        let url = self.url();
        let body = ResponsesRequest::from_request(request);

        debug!(
            %url,
            model = body.model,
            messages = body.input.len(),
            web_search = request.web_search,
            "sending responses request"
        );

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .with_context(|| format!("Failed to connect to API endpoint: {url}"))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            anyhow::bail!("API request failed with status {status}: {body}");
        }

        Ok(Box::pin(sse_to_events(response.bytes_stream())))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::models::Model;

    fn request(messages: &[Message], web_search: bool) -> CompletionRequest<'_> {
        CompletionRequest {
            model: Model::Gpt41Mini,
            messages,
            instructions: "Be brief.",
            web_search,
        }
    }

    #[test]
    fn test_request_body_carries_full_history() {
        let messages = vec![
            Message::system("Hello"),
            Message::user("What does the file say?"),
        ];
        let body = ResponsesRequest::from_request(&request(&messages, false));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["model"], "gpt-4.1-mini");
        assert_eq!(json["instructions"], "Be brief.");
        assert_eq!(json["stream"], true);
        assert_eq!(json["input"][0]["role"], "system");
        assert_eq!(json["input"][0]["content"], "Hello");
        assert_eq!(json["input"][1]["role"], "user");
        assert!(json.get("tools").is_none());
    }

    #[test]
    fn test_request_body_with_web_search() {
        let messages = vec![Message::user("news?")];
        let body = ResponsesRequest::from_request(&request(&messages, true));
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["tools"][0]["type"], "web_search_preview");
        assert_eq!(json["tools"][0]["search_context_size"], "low");
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let client = ResponsesClient::new("https://api.example.com/".to_string(), "k".to_string());
        assert_eq!(client.url(), "https://api.example.com/v1/responses");
    }

    #[tokio::test]
    async fn test_stream_fails_on_unreachable_endpoint() {
        let client = ResponsesClient::new("http://127.0.0.1:9".to_string(), "k".to_string());
        let messages = vec![Message::user("hi")];

        let result = client.stream(&request(&messages, false)).await;

        let Err(err) = result else {
            panic!("expected a connection error");
        };
        assert!(err.to_string().contains("Failed to connect"));
    }
}
