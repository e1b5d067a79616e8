//! Strategy core - session sweep and reversal components
//!
//! - Session range tracking and finalization
//! - Swing-point buffers (coarse secondary trend read)
//! - Order block detection on hourly bars
//! - Breach-rejection state machine
//! - Risk-based order sizing
//! - Trader orchestration

pub mod order_blocks;
pub mod risk;
pub mod session_range;
pub mod state_machine;
pub mod swings;
pub mod trader;

pub use order_blocks::OrderBlocks;
pub use risk::{plan_entry, RiskConfig, TradePlan};
pub use session_range::SessionRange;
pub use state_machine::{
    Breach, BreachDirection, BreachRejection, DailyState, Rejection, SetupConfig, SetupEvent,
    SetupState,
};
pub use swings::{SwingHint, SwingTracker};
pub use trader::Trader;
