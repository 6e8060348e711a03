//! Live adapter for the `CompletionClient` port.
//!
//! Speaks the OpenAI-compatible chat-completions wire format against a
//! configurable endpoint: a single user message, Bearer authentication, and
//! the generated text in `choices[0].message.content`.

use reqwest::Client;
use serde::{Deserialize, Serialize};

use crate::ports::llm::{CompletionClient, CompletionFuture, CompletionRequest, CompletionResponse};

/// Live completion client calling a chat-completions endpoint.
pub struct LiveCompletionClient {
    client: Client,
    endpoint: String,
    api_key: String,
}

impl LiveCompletionClient {
    /// Creates a new live client for the given endpoint and credential.
    #[must_use]
    pub fn new(endpoint: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self { client: Client::new(), endpoint: endpoint.into(), api_key: api_key.into() }
    }
}

/// Request body sent to the chat-completions endpoint.
#[derive(Serialize)]
struct ChatRequest<'a> {
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

/// A single message in the chat request.
#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

/// Top-level response from the chat-completions endpoint.
#[derive(Deserialize)]
struct ChatResponse {
    choices: Vec<Choice>,
}

/// One completion choice in the response.
#[derive(Deserialize)]
struct Choice {
    message: ChoiceMessage,
}

/// The message inside a completion choice.
#[derive(Deserialize)]
struct ChoiceMessage {
    content: String,
}

impl CompletionClient for LiveCompletionClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let request = request.clone();

        Box::pin(async move {
            let body = ChatRequest {
                messages: vec![ChatMessage { role: "user", content: &request.prompt }],
                temperature: request.temperature,
                model: request.model.as_deref(),
                max_tokens: request.max_tokens,
            };

            let response = self
                .client
                .post(&self.endpoint)
                .bearer_auth(&self.api_key)
                .json(&body)
                .send()
                .await
                .map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("completion request failed: {e}").into()
                })?;

            let status = response.status();
            let response_text =
                response.text().await.map_err(|e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("failed to read completion response: {e}").into()
                })?;

            if !status.is_success() {
                return Err(format!(
                    "completion endpoint returned {}: {response_text}",
                    status.as_u16()
                )
                .into());
            }

            let parsed: ChatResponse = serde_json::from_str(&response_text).map_err(
                |e| -> Box<dyn std::error::Error + Send + Sync> {
                    format!("failed to parse completion response: {e}").into()
                },
            )?;

            let text = parsed
                .choices
                .into_iter()
                .next()
                .map(|choice| choice.message.content)
                .ok_or_else(|| {
                    Box::<dyn std::error::Error + Send + Sync>::from(
                        "completion response contained no choices",
                    )
                })?;

            Ok(CompletionResponse { text })
        })
    }
}
