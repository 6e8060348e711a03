//! Replays recorded completion exchanges from a cassette.

use super::format::{Cassette, Exchange};

/// Serves a cassette's exchanges in recording order.
///
/// Replay is purely positional: the nth completion call receives the nth
/// recorded response, regardless of the prompt. The generation pipeline is
/// deterministic for a fixed decomposition, so positions line up as long as
/// the cassette was recorded from an equivalent run.
#[derive(Debug)]
pub struct CassetteReplayer {
    exchanges: Vec<Exchange>,
    cursor: usize,
}

impl CassetteReplayer {
    /// Create a new replayer over the given cassette.
    #[must_use]
    pub fn new(cassette: Cassette) -> Self {
        Self { exchanges: cassette.exchanges, cursor: 0 }
    }

    /// Return the next exchange, or `None` when the cassette is exhausted.
    pub fn next_exchange(&mut self) -> Option<&Exchange> {
        let exchange = self.exchanges.get(self.cursor)?;
        self.cursor += 1;
        Some(exchange)
    }

    /// Number of exchanges not yet served.
    #[must_use]
    pub fn remaining(&self) -> usize {
        self.exchanges.len() - self.cursor
    }
}
