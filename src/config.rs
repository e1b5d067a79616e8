//! Strategy configuration

use std::path::Path;

use anyhow::{Context, Result};
use chrono::Duration;
use serde::{Deserialize, Serialize};

use crate::strategy::risk::RiskConfig;
use crate::strategy::state_machine::SetupConfig;

/// Flat configuration for the sweep-fade strategy. Defaults carry the
/// reference EURUSD parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyConfig {
    /// Instrument to trade (e.g., "EURUSD")
    pub symbol: String,

    /// Fraction of account equity risked per trade
    pub risk_fraction: f64,

    /// Reward multiple applied to the stop distance for the take-profit
    pub reward_ratio: f64,

    /// Minimum stop distance beyond the breach price (price units)
    pub min_stop_distance: f64,

    /// Maximum position size in units
    pub max_position_size: f64,

    /// Distance beyond the session boundary confirming a breach
    pub breach_threshold: f64,

    /// Minutes a breach may wait for a rejection before resetting
    pub breach_timeout_minutes: i64,

    /// Minimum candle range for an order block to qualify
    pub ob_threshold: f64,

    /// Reference session end hour (UTC); the range finalizes here
    pub session_end_hour: u32,

    /// Entry window start hour (UTC)
    pub entry_hour: u32,

    /// Minimal price increment used for risk math
    pub pip_size: f64,

    /// Fast EMA period for the hourly trend filter
    pub fast_ema_period: usize,

    /// Slow EMA period for the hourly trend filter
    pub slow_ema_period: usize,

    /// ATR period on hourly bars
    pub atr_period: usize,

    /// Capacity of the swing high/low buffers
    pub swing_capacity: usize,
}

impl Default for StrategyConfig {
    fn default() -> Self {
        Self {
            symbol: "EURUSD".to_string(),
            risk_fraction: 0.01,        // 1% risk per trade
            reward_ratio: 2.0,          // 1:2 risk/reward
            min_stop_distance: 0.0005,  // 5 pips minimum stop
            max_position_size: 100_000.0,
            breach_threshold: 0.0001,   // 1 pip beyond the range
            breach_timeout_minutes: 30,
            ob_threshold: 0.0010,       // 10 pips of candle range
            session_end_hour: 8,        // 00:00-08:00 UTC reference window
            entry_hour: 13,             // NY open
            pip_size: 0.0001,
            fast_ema_period: 50,
            slow_ema_period: 200,
            atr_period: 14,
            swing_capacity: 5,
        }
    }
}

impl StrategyConfig {
    /// Load from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let raw = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("reading config {}", path.as_ref().display()))?;
        serde_json::from_str(&raw).context("parsing strategy config")
    }

    /// State machine parameters
    pub fn setup_config(&self) -> SetupConfig {
        SetupConfig {
            breach_threshold: self.breach_threshold,
            breach_timeout: Duration::minutes(self.breach_timeout_minutes),
            session_end_hour: self.session_end_hour,
            entry_hour: self.entry_hour,
        }
    }

    /// Sizing parameters
    pub fn risk_config(&self) -> RiskConfig {
        RiskConfig {
            risk_fraction: self.risk_fraction,
            reward_ratio: self.reward_ratio,
            min_stop_distance: self.min_stop_distance,
            max_position_size: self.max_position_size,
            pip_size: self.pip_size,
        }
    }
}
