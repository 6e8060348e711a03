//! Replaying adapter for the `CompletionClient` port.

use std::sync::Mutex;

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::llm::{CompletionClient, CompletionFuture, CompletionRequest, CompletionResponse};

/// Serves recorded completions from a cassette instead of the network.
///
/// An exhausted cassette yields an error rather than a panic: the generation
/// protocol treats it like any other transport failure, so a short cassette
/// ends the run through the ordinary retry-bound path.
pub struct ReplayingCompletionClient {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingCompletionClient {
    /// Create a replaying client backed by the given replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl CompletionClient for ReplayingCompletionClient {
    fn complete(&self, _request: &CompletionRequest) -> CompletionFuture<'_> {
        let next = match self.replayer.lock() {
            Ok(mut replayer) => Ok(replayer.next_exchange().map(|e| e.response.clone())),
            Err(_) => Err("cassette replayer lock poisoned".to_string()),
        };

        Box::pin(async move {
            match next {
                Ok(Some(text)) => Ok(CompletionResponse { text }),
                Ok(None) => Err("cassette exhausted: no recorded completion left".into()),
                Err(message) => Err(message.into()),
            }
        })
    }
}
