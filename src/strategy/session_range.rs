//! Reference session range (00:00 UTC to the session-end hour)

use serde::{Deserialize, Serialize};
use tracing::debug;

/// High/low extremes of the reference window. Sentinels `high = 0.0`,
/// `low = +inf` mean no tick was observed before the boundary; callers must
/// treat that as "range undefined" rather than compare against them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SessionRange {
    pub high: f64,
    pub low: f64,
    pub finalized: bool,
}

impl Default for SessionRange {
    fn default() -> Self {
        Self::new()
    }
}

impl SessionRange {
    pub fn new() -> Self {
        Self {
            high: 0.0,
            low: f64::INFINITY,
            finalized: false,
        }
    }

    /// Feed one tick. Extends the range before `end_hour`; the first tick at
    /// or past it finalizes irreversibly. No-op once finalized.
    pub fn observe(&mut self, hour: u32, price: f64, end_hour: u32) {
        if self.finalized {
            return;
        }
        if hour < end_hour {
            self.high = self.high.max(price);
            self.low = self.low.min(price);
            debug!("session range update: high {:.5} low {:.5}", self.high, self.low);
        } else {
            self.finalized = true;
        }
    }

    /// False when no tick arrived before the boundary
    pub fn is_defined(&self) -> bool {
        self.high > 0.0 && self.low.is_finite()
    }
}
