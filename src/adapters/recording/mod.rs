//! Recording adapters that capture interactions while delegating to live ones.

pub mod llm;

pub use llm::RecordingCompletionClient;
