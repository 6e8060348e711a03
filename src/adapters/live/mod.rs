//! Live adapters backed by the real network and disk.

pub mod filesystem;
pub mod llm;

pub use filesystem::LiveFileSystem;
pub use llm::LiveCompletionClient;
