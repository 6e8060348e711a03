//! Recording adapter for the `CompletionClient` port.

use std::sync::{Arc, Mutex};

use crate::cassette::recorder::CassetteRecorder;
use crate::ports::llm::{CompletionClient, CompletionFuture, CompletionRequest};

/// Records successful completions while delegating to an inner client.
///
/// Failed requests are not recorded; a replayed cassette therefore contains
/// only the exchanges that moved the run forward.
pub struct RecordingCompletionClient {
    inner: Box<dyn CompletionClient>,
    recorder: Arc<Mutex<CassetteRecorder>>,
}

impl RecordingCompletionClient {
    /// Creates a recording client wrapping the given implementation.
    pub fn new(inner: Box<dyn CompletionClient>, recorder: Arc<Mutex<CassetteRecorder>>) -> Self {
        Self { inner, recorder }
    }
}

impl CompletionClient for RecordingCompletionClient {
    fn complete(&self, request: &CompletionRequest) -> CompletionFuture<'_> {
        let request = request.clone();
        let recorder = Arc::clone(&self.recorder);

        Box::pin(async move {
            let result = self.inner.complete(&request).await;

            if let Ok(response) = &result {
                if let Ok(mut recorder) = recorder.lock() {
                    recorder.record(request, response.text.clone());
                }
            }

            result
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::llm::CompletionResponse;

    /// Inner client that answers every request with a fixed response.
    struct FixedClient {
        text: String,
    }

    impl CompletionClient for FixedClient {
        fn complete(&self, _request: &CompletionRequest) -> CompletionFuture<'_> {
            let text = self.text.clone();
            Box::pin(async move { Ok(CompletionResponse { text }) })
        }
    }

    /// Inner client that always fails.
    struct FailingClient;

    impl CompletionClient for FailingClient {
        fn complete(&self, _request: &CompletionRequest) -> CompletionFuture<'_> {
            Box::pin(async move { Err("connection refused".into()) })
        }
    }

    fn request(prompt: &str) -> CompletionRequest {
        CompletionRequest {
            prompt: prompt.to_string(),
            temperature: 0.0,
            max_tokens: None,
            model: None,
        }
    }

    #[tokio::test]
    async fn records_successful_exchanges() {
        let dir = std::env::temp_dir().join("hdlgen_recording_client_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("rec.cassette.yaml");

        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "rec")));
        let client = RecordingCompletionClient::new(
            Box::new(FixedClient { text: "reply".into() }),
            Arc::clone(&recorder),
        );

        let response = client.complete(&request("hello")).await.unwrap();
        assert_eq!(response.text, "reply");

        drop(client);
        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        let written = recorder.finish().unwrap();
        let cassette: crate::cassette::format::Cassette =
            serde_yaml::from_str(&std::fs::read_to_string(written).unwrap()).unwrap();
        assert_eq!(cassette.exchanges.len(), 1);
        assert_eq!(cassette.exchanges[0].request.prompt, "hello");
        assert_eq!(cassette.exchanges[0].response, "reply");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn failures_are_not_recorded() {
        let dir = std::env::temp_dir().join("hdlgen_recording_failure_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("rec.cassette.yaml");

        let recorder = Arc::new(Mutex::new(CassetteRecorder::new(&path, "rec")));
        let client =
            RecordingCompletionClient::new(Box::new(FailingClient), Arc::clone(&recorder));

        assert!(client.complete(&request("hello")).await.is_err());

        drop(client);
        let recorder = Arc::try_unwrap(recorder).unwrap().into_inner().unwrap();
        let written = recorder.finish().unwrap();
        let cassette: crate::cassette::format::Cassette =
            serde_yaml::from_str(&std::fs::read_to_string(written).unwrap()).unwrap();
        assert!(cassette.exchanges.is_empty());

        let _ = std::fs::remove_dir_all(&dir);
    }
}
