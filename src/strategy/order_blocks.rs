//! Order block detection on completed higher-timeframe bars
//!
//! One optional level per side: the bullish block tracks the deepest low of
//! a strong bullish candle, the bearish block the highest high of a strong
//! bearish candle. Not cleared by the daily reset; structure context
//! outlives a single session.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::types::Bar;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderBlocks {
    pub bullish: Option<f64>,
    pub bearish: Option<f64>,
}

impl OrderBlocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inspect one completed higher-timeframe bar. Bars whose range does not
    /// exceed `threshold` are ignored; a candle updates at most one side and
    /// a doji updates neither.
    pub fn on_bar_close(&mut self, bar: &Bar, threshold: f64) {
        let range = bar.high - bar.low;
        if range <= threshold {
            return;
        }

        if bar.close > bar.open {
            if self.bullish.map_or(true, |ob| bar.low < ob) {
                self.bullish = Some(bar.low);
                debug!("bullish order block -> {:.5}", bar.low);
            }
        } else if bar.close < bar.open {
            if self.bearish.map_or(true, |ob| bar.high > ob) {
                self.bearish = Some(bar.high);
                debug!("bearish order block -> {:.5}", bar.high);
            }
        }
    }
}
