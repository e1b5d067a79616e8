//! Shared market data types

use chrono::{DateTime, Timelike, Utc};
use serde::{Deserialize, Serialize};

/// A single OHLC bar. The feed delivers these at minute cadence; the engine
/// consolidates them into hourly bars for the indicators and order blocks.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    pub symbol: String,
    pub timestamp: DateTime<Utc>,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
}

impl Bar {
    /// Hour of day in UTC, used for session boundaries
    pub fn hour(&self) -> u32 {
        self.timestamp.hour()
    }
}
