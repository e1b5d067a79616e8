//! Order gateway seam
//!
//! Submission is fire-and-forget: a failed leg is reported to the caller and
//! logged, but previously submitted legs of the same bracket are not rolled
//! back by this layer.

use anyhow::Result;
use tracing::info;

use super::order::OrderRequest;

/// Narrow brokerage contract the strategy depends on
pub trait OrderGateway {
    /// True when a position is open for the instrument
    fn is_invested(&self, symbol: &str) -> bool;

    /// Total account equity
    fn equity(&self) -> f64;

    fn market_order(&mut self, symbol: &str, quantity: f64) -> Result<()>;

    fn stop_order(&mut self, symbol: &str, quantity: f64, stop_price: f64) -> Result<()>;

    fn limit_order(&mut self, symbol: &str, quantity: f64, limit_price: f64) -> Result<()>;
}

/// In-memory gateway for paper runs and tests: records every request and
/// flags the instrument invested after a market submission.
#[derive(Debug)]
pub struct PaperGateway {
    equity: f64,
    invested: bool,
    orders: Vec<OrderRequest>,
}

impl PaperGateway {
    pub fn new(equity: f64) -> Self {
        Self {
            equity,
            invested: false,
            orders: Vec::new(),
        }
    }

    /// All requests submitted so far, in order
    pub fn orders(&self) -> &[OrderRequest] {
        &self.orders
    }

    pub fn set_invested(&mut self, invested: bool) {
        self.invested = invested;
    }
}

impl OrderGateway for PaperGateway {
    fn is_invested(&self, _symbol: &str) -> bool {
        self.invested
    }

    fn equity(&self) -> f64 {
        self.equity
    }

    fn market_order(&mut self, symbol: &str, quantity: f64) -> Result<()> {
        info!("PAPER MARKET: {} {:+.2}", symbol, quantity);
        self.invested = true;
        self.orders.push(OrderRequest::market(symbol, quantity));
        Ok(())
    }

    fn stop_order(&mut self, symbol: &str, quantity: f64, stop_price: f64) -> Result<()> {
        info!("PAPER STOP: {} {:+.2} @ {:.5}", symbol, quantity, stop_price);
        self.orders.push(OrderRequest::stop(symbol, quantity, stop_price));
        Ok(())
    }

    fn limit_order(&mut self, symbol: &str, quantity: f64, limit_price: f64) -> Result<()> {
        info!("PAPER LIMIT: {} {:+.2} @ {:.5}", symbol, quantity, limit_price);
        self.orders.push(OrderRequest::limit(symbol, quantity, limit_price));
        Ok(())
    }
}
