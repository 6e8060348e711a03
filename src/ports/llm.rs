//! Completion client port for text-completion requests.

use std::error::Error;
use std::future::Future;
use std::pin::Pin;

use serde::{Deserialize, Serialize};

/// Boxed future type alias used by [`CompletionClient`] to keep the trait
/// dyn-compatible.
pub type CompletionFuture<'a> = Pin<
    Box<dyn Future<Output = Result<CompletionResponse, Box<dyn Error + Send + Sync>>> + Send + 'a>,
>;

/// A request to generate a completion.
///
/// Sampling parameters are pass-through configuration: the pipeline never
/// inspects them, it only forwards them from [`crate::config::GenConfig`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// The full prompt text to send.
    pub prompt: String,
    /// Sampling temperature.
    pub temperature: f32,
    /// Maximum number of tokens to generate, when capped.
    pub max_tokens: Option<u32>,
    /// Model identifier, when the endpoint needs one.
    pub model: Option<String>,
}

/// The response from a completion call.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    /// The generated text.
    pub text: String,
}

/// Sends completion requests to a text-completion service.
pub trait CompletionClient: Send + Sync {
    /// Generates a completion for the given request.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails (network, auth, rate-limit,
    /// non-2xx status). The generation protocol treats every error from this
    /// method as retryable.
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_>;
}
