//! Service context bundling the port trait objects.

use std::path::Path;
use std::sync::{Arc, Mutex};

use crate::adapters::live::{LiveCompletionClient, LiveFileSystem};
use crate::adapters::recording::RecordingCompletionClient;
use crate::adapters::replaying::ReplayingCompletionClient;
use crate::cassette::recorder::CassetteRecorder;
use crate::cassette::replayer::CassetteReplayer;
use crate::ports::filesystem::FileSystem;
use crate::ports::llm::CompletionClient;

/// Bundles the port trait objects into a single context.
///
/// Each field provides access to one external boundary. Constructors wire up
/// different adapter combinations (live, recording, replaying).
pub struct ServiceContext {
    /// Completion client for the text-completion service.
    pub llm: Box<dyn CompletionClient>,
    /// Filesystem for artifact and prompt I/O.
    pub fs: Box<dyn FileSystem>,
}

impl ServiceContext {
    /// Creates a live context calling the real endpoint and disk.
    #[must_use]
    pub fn live(endpoint: &str, api_key: &str) -> Self {
        Self {
            llm: Box::new(LiveCompletionClient::new(endpoint, api_key)),
            fs: Box::new(LiveFileSystem),
        }
    }

    /// Creates a recording context: live adapters, with every successful
    /// completion captured into the given recorder.
    ///
    /// The caller keeps a clone of the recorder handle and writes the
    /// cassette to disk once the run finishes.
    #[must_use]
    pub fn recording(
        endpoint: &str,
        api_key: &str,
        recorder: Arc<Mutex<CassetteRecorder>>,
    ) -> Self {
        let live = Box::new(LiveCompletionClient::new(endpoint, api_key));
        Self {
            llm: Box::new(RecordingCompletionClient::new(live, recorder)),
            fs: Box::new(LiveFileSystem),
        }
    }

    /// Creates a replaying context serving completions from a cassette file.
    /// The filesystem stays live so artifacts are still written.
    ///
    /// # Errors
    ///
    /// Returns an error if the cassette file cannot be read or parsed.
    pub fn replaying(path: &Path) -> Result<Self, String> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read cassette file {}: {e}", path.display()))?;
        let cassette: crate::cassette::format::Cassette = serde_yaml::from_str(&content)
            .map_err(|e| format!("Failed to parse cassette file {}: {e}", path.display()))?;

        Ok(Self {
            llm: Box::new(ReplayingCompletionClient::new(CassetteReplayer::new(cassette))),
            fs: Box::new(LiveFileSystem),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cassette::format::{Cassette, Exchange};
    use crate::ports::llm::CompletionRequest;
    use chrono::Utc;

    #[tokio::test]
    async fn replaying_context_serves_cassette_completions() {
        let dir = std::env::temp_dir().join("hdlgen_ctx_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("run.cassette.yaml");

        let cassette = Cassette {
            name: "test".into(),
            recorded_at: Utc::now(),
            exchanges: vec![Exchange {
                seq: 0,
                request: CompletionRequest {
                    prompt: "p".into(),
                    temperature: 0.0,
                    max_tokens: None,
                    model: None,
                },
                response: "recorded text".into(),
            }],
        };
        std::fs::write(&path, serde_yaml::to_string(&cassette).unwrap()).unwrap();

        let ctx = ServiceContext::replaying(&path).unwrap();
        let response = ctx
            .llm
            .complete(&CompletionRequest {
                prompt: "anything".into(),
                temperature: 0.0,
                max_tokens: None,
                model: None,
            })
            .await
            .unwrap();
        assert_eq!(response.text, "recorded text");

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn replaying_context_rejects_missing_file() {
        let err = ServiceContext::replaying(Path::new("/nonexistent/run.cassette.yaml"))
            .unwrap_err();
        assert!(err.contains("Failed to read cassette file"));
    }
}
