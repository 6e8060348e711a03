//! Cassette data structures for recorded completion exchanges.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ports::llm::CompletionRequest;

/// A single recorded completion exchange.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Exchange {
    /// Sequence number (assigned automatically by the recorder).
    pub seq: u64,
    /// The request that was sent.
    pub request: CompletionRequest,
    /// The text the service returned.
    pub response: String,
}

/// A cassette containing the exchanges of one run, in order.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Cassette {
    /// Human-readable name for this cassette.
    pub name: String,
    /// When this cassette was recorded.
    pub recorded_at: DateTime<Utc>,
    /// Ordered list of exchanges.
    pub exchanges: Vec<Exchange>,
}
