//! Stage timing for verbose logs

use std::time::{Duration, Instant};
use tracing::debug;

/// Elapsed-time marker between pipeline stages.
///
/// Each `mark` logs the time since the previous mark and restarts the
/// clock, so debug logs show how long every stage took.
pub struct Stopwatch {
    last: Instant,
}

impl Stopwatch {
    /// Start timing from now
    pub fn start() -> Self {
        Self {
            last: Instant::now(),
        }
    }

    /// Log the time since the previous mark under `label`, then reset
    pub fn mark(&mut self, label: &str) -> Duration {
        let elapsed = self.last.elapsed();
        debug!("{} ({} ms)", label, elapsed.as_millis());
        self.last = Instant::now();
        elapsed
    }
}
