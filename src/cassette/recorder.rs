//! Records completion exchanges into a cassette file.

use std::path::PathBuf;

use chrono::Utc;

use super::format::{Cassette, Exchange};
use crate::ports::llm::CompletionRequest;

/// Accumulates exchanges and writes them as a YAML cassette file.
#[derive(Debug)]
pub struct CassetteRecorder {
    path: PathBuf,
    name: String,
    exchanges: Vec<Exchange>,
    next_seq: u64,
}

impl CassetteRecorder {
    /// Create a new recorder that will write to the given path.
    pub fn new(path: impl Into<PathBuf>, name: impl Into<String>) -> Self {
        Self { path: path.into(), name: name.into(), exchanges: Vec::new(), next_seq: 0 }
    }

    /// Record an exchange. The `seq` field is assigned automatically.
    pub fn record(&mut self, request: CompletionRequest, response: impl Into<String>) {
        let exchange = Exchange { seq: self.next_seq, request, response: response.into() };
        self.next_seq += 1;
        self.exchanges.push(exchange);
    }

    /// Finish recording and write the cassette YAML file to disk.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn finish(self) -> Result<PathBuf, std::io::Error> {
        let cassette =
            Cassette { name: self.name, recorded_at: Utc::now(), exchanges: self.exchanges };
        let yaml = serde_yaml::to_string(&cassette).map_err(std::io::Error::other)?;
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        std::fs::write(&self.path, yaml)?;
        Ok(self.path)
    }
}
