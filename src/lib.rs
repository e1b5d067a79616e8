// Library crate - exports the strategy core, indicators, and execution seams

pub mod config;
pub mod engine;
pub mod execution;
pub mod indicators;
pub mod strategy;
pub mod types;

// Re-export commonly used types
pub use config::StrategyConfig;
pub use engine::{Engine, Event, HourlyConsolidator};
pub use types::Bar;
