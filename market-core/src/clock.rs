//! Rate limiter for the market regeneration pass.
//!
//! One clock gates the whole world: every settlement regenerates on the same
//! cadence, at most once per interval of real time.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// How often ledgers regenerate.
pub const REGEN_INTERVAL: Duration = Duration::from_secs(60);

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RegenClock {
    interval: Duration,
    last_run: Duration,
}

impl RegenClock {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            last_run: Duration::ZERO,
        }
    }

    /// Check whether a regeneration pass is due at `now` (time since world
    /// start). On firing, the timestamp advances *before* the caller runs the
    /// pass, so a re-entrant call during regeneration cannot double-fire.
    pub fn due(&mut self, now: Duration) -> bool {
        if now.saturating_sub(self.last_run) >= self.interval {
            self.last_run = now;
            true
        } else {
            false
        }
    }
}

impl Default for RegenClock {
    fn default() -> Self {
        Self::new(REGEN_INTERVAL)
    }
}
