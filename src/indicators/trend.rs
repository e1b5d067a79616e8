//! Higher-timeframe trend filter from a fast/slow EMA pair

use serde::{Deserialize, Serialize};

use super::ema::Ema;

/// Directional bias on the higher timeframe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Bullish,
    Bearish,
}

impl std::fmt::Display for Trend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Trend::Bullish => write!(f, "BULLISH"),
            Trend::Bearish => write!(f, "BEARISH"),
        }
    }
}

/// Fast EMA above slow reads bullish, otherwise bearish. Not ready until
/// both averages have seeded.
#[derive(Debug, Clone)]
pub struct TrendFilter {
    fast: Ema,
    slow: Ema,
}

impl TrendFilter {
    pub fn new(fast_period: usize, slow_period: usize) -> Self {
        Self {
            fast: Ema::new(fast_period),
            slow: Ema::new(slow_period),
        }
    }

    /// Feed one higher-timeframe close
    pub fn update(&mut self, close: f64) {
        self.fast.update(close);
        self.slow.update(close);
    }

    pub fn is_ready(&self) -> bool {
        self.fast.is_ready() && self.slow.is_ready()
    }

    pub fn trend(&self) -> Option<Trend> {
        match (self.fast.value(), self.slow.value()) {
            (Some(fast), Some(slow)) => Some(if fast > slow {
                Trend::Bullish
            } else {
                Trend::Bearish
            }),
            _ => None,
        }
    }
}
