//! Streaming indicators on the hourly bar cadence
//!
//! Each indicator exposes an `is_ready()` flag; nothing downstream may be
//! evaluated until enough history has accumulated.

pub mod atr;
pub mod ema;
pub mod trend;

pub use atr::Atr;
pub use ema::Ema;
pub use trend::{Trend, TrendFilter};
