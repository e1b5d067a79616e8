//! Strategy orchestration
//!
//! Broker-agnostic glue: consumes minute ticks and completed hourly bars,
//! drives the breach-rejection machine, validates entries against trend and
//! order blocks, and submits the order triple through the gateway.

use tracing::{debug, error, info, warn};

use crate::config::StrategyConfig;
use crate::execution::OrderGateway;
use crate::indicators::{Atr, Trend, TrendFilter};
use crate::types::Bar;

use super::order_blocks::OrderBlocks;
use super::risk::{plan_entry, RiskConfig, TradePlan};
use super::session_range::SessionRange;
use super::state_machine::{Breach, BreachDirection, BreachRejection, SetupEvent, SetupState};
use super::swings::SwingTracker;

pub struct Trader<G: OrderGateway> {
    config: StrategyConfig,
    risk: RiskConfig,
    gateway: G,
    machine: BreachRejection,
    trend: TrendFilter,
    atr: Atr,
    swings: SwingTracker,
    order_blocks: OrderBlocks,
}

impl<G: OrderGateway> Trader<G> {
    pub fn new(config: StrategyConfig, gateway: G) -> Self {
        let machine = BreachRejection::new(config.setup_config());
        let trend = TrendFilter::new(config.fast_ema_period, config.slow_ema_period);
        let atr = Atr::new(config.atr_period);
        let swings = SwingTracker::new(config.swing_capacity);
        let risk = config.risk_config();

        Self {
            config,
            risk,
            gateway,
            machine,
            trend,
            atr,
            swings,
            order_blocks: OrderBlocks::new(),
        }
    }

    /// Process one minute tick
    pub fn on_tick(&mut self, bar: &Bar) {
        // Nothing is evaluated until the trend filter has enough history
        if !self.trend.is_ready() {
            return;
        }

        self.swings.observe(bar.close);

        match self.machine.on_tick(bar.hour(), bar.close, bar.timestamp) {
            Some(SetupEvent::RangeFinalized { high, low }) => {
                if self.machine.range().is_defined() {
                    info!("RANGE FINAL: high {:.5} low {:.5}", high, low);
                } else {
                    warn!("RANGE UNDEFINED: no ticks before session close");
                }
            }
            Some(SetupEvent::BreachDetected(breach)) => {
                info!("BREACH {}: @ {:.5}", breach.direction, breach.price);
            }
            Some(SetupEvent::BreachTimedOut) => {
                info!("BREACH TIMEOUT: back to idle");
            }
            Some(SetupEvent::RejectionDetected { breach, rejection }) => {
                info!("REJECTION {}: @ {:.5}", breach.direction, rejection.price);
            }
            Some(SetupEvent::EntryWindow { breach, .. }) => {
                self.try_enter(breach, bar.close);
            }
            None => {}
        }
    }

    /// Process one completed hourly bar: indicator feed and order blocks
    pub fn on_hour_close(&mut self, bar: &Bar) {
        self.trend.update(bar.close);
        self.atr.update(bar);
        self.order_blocks.on_bar_close(bar, self.config.ob_threshold);
    }

    /// Daily boundary: per-day state only; order blocks and swings persist
    pub fn reset_daily(&mut self) {
        self.machine.reset_daily();
        info!("daily state reset");
    }

    fn try_enter(&mut self, breach: Breach, price: f64) {
        if !self.validate_setup(breach.direction, price) {
            return;
        }

        let Some(atr) = self.atr.value() else {
            debug!("entry skipped: volatility indicator not ready");
            return;
        };

        let equity = self.gateway.equity();
        let Some(plan) = plan_entry(breach.direction, price, breach.price, atr, equity, &self.risk)
        else {
            // Degenerate sizing: no orders, setup stays live for a later tick
            return;
        };

        self.submit_triple(&plan);
        self.machine.mark_entered();
    }

    fn validate_setup(&self, direction: BreachDirection, price: f64) -> bool {
        if self.gateway.is_invested(&self.config.symbol) {
            debug!("entry skipped: position already open");
            return false;
        }

        let Some(trend) = self.trend.trend() else {
            return false;
        };
        // Fade the sweep only against the higher-timeframe trend
        if direction == BreachDirection::Upper && trend != Trend::Bearish {
            debug!("entry skipped: upper breach needs bearish trend, got {trend}");
            return false;
        }
        if direction == BreachDirection::Lower && trend != Trend::Bullish {
            debug!("entry skipped: lower breach needs bullish trend, got {trend}");
            return false;
        }

        match direction {
            BreachDirection::Upper => {
                if let Some(ob) = self.order_blocks.bearish {
                    if price > ob {
                        debug!("entry skipped: price {:.5} above bearish order block {:.5}", price, ob);
                        return false;
                    }
                }
            }
            BreachDirection::Lower => {
                if let Some(ob) = self.order_blocks.bullish {
                    if price < ob {
                        debug!("entry skipped: price {:.5} below bullish order block {:.5}", price, ob);
                        return false;
                    }
                }
            }
        }

        true
    }

    /// Submit market + protective stop + take-profit as one logical action.
    /// A failed leg is logged and the remaining legs are still attempted;
    /// there is no rollback at this layer.
    fn submit_triple(&mut self, plan: &TradePlan) {
        let symbol = self.config.symbol.clone();
        let signed = match plan.direction {
            BreachDirection::Upper => -plan.size,
            BreachDirection::Lower => plan.size,
        };

        info!(
            "ENTRY {}: {:+.2} @ {:.5} | stop {:.5} | target {:.5}",
            plan.direction, signed, plan.entry, plan.stop_loss, plan.take_profit
        );

        if let Err(e) = self.gateway.market_order(&symbol, signed) {
            error!("market order failed: {e:#}");
        }
        if let Err(e) = self.gateway.stop_order(&symbol, -signed, plan.stop_loss) {
            error!("stop order failed: {e:#}");
        }
        if let Err(e) = self.gateway.limit_order(&symbol, -signed, plan.take_profit) {
            error!("limit order failed: {e:#}");
        }
    }

    pub fn state(&self) -> SetupState {
        self.machine.state()
    }

    pub fn session_range(&self) -> &SessionRange {
        self.machine.range()
    }

    pub fn order_blocks(&self) -> &OrderBlocks {
        &self.order_blocks
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn gateway_mut(&mut self) -> &mut G {
        &mut self.gateway
    }
}
