//! Replaying adapters serving recorded interactions.

pub mod llm;

pub use llm::ReplayingCompletionClient;
