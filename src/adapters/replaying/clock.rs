//! Replaying adapter for the Clock port.

use std::sync::Mutex;

use chrono::{DateTime, Utc};

use crate::cassette::replayer::CassetteReplayer;
use crate::ports::clock::Clock;

/// Replays recorded clock values from a cassette.
pub struct ReplayingClock {
    replayer: Mutex<CassetteReplayer>,
}

impl ReplayingClock {
    /// Creates a new replaying clock from a cassette replayer.
    #[must_use]
    pub fn new(replayer: CassetteReplayer) -> Self {
        Self { replayer: Mutex::new(replayer) }
    }
}

impl Clock for ReplayingClock {
    /// # Panics
    ///
    /// Panics if the cassette has no clock reading left; a clock cannot fail.
    fn now(&self) -> DateTime<Utc> {
        let output = self
            .replayer
            .lock()
            .expect("replayer lock poisoned")
            .next_output("clock", "now")
            .unwrap_or_else(|e| panic!("{e}"));
        serde_json::from_value(output).expect("clock::now: failed to deserialize DateTime<Utc>")
    }
}
