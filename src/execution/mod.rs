//! Execution seam between the strategy and the hosting brokerage
//!
//! The strategy only sees the `OrderGateway` trait: a portfolio query plus
//! three fire-and-forget order operations.

mod gateway;
mod order;

pub use gateway::{OrderGateway, PaperGateway};
pub use order::{OrderRequest, OrderSide, OrderType};
