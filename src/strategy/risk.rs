//! Position sizing and bracket levels from fixed fractional risk

use tracing::warn;

use super::state_machine::BreachDirection;

/// Sizing parameters
#[derive(Debug, Clone)]
pub struct RiskConfig {
    /// Fraction of account equity risked per trade
    pub risk_fraction: f64,
    /// Reward multiple applied to the stop distance
    pub reward_ratio: f64,
    /// Minimum stop distance beyond the breach price
    pub min_stop_distance: f64,
    /// Position size clamp in units
    pub max_position_size: f64,
    /// Minimal price increment for risk math
    pub pip_size: f64,
}

/// A fully sized entry: market leg plus protective stop and take-profit.
/// An Upper breach fades short, a Lower breach fades long.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TradePlan {
    pub direction: BreachDirection,
    pub entry: f64,
    pub stop_loss: f64,
    pub take_profit: f64,
    /// Unsigned size; the order legs carry the signs
    pub size: f64,
}

/// Compute stop, size, and target for a validated entry. Returns `None` on
/// degenerate sizing (zero stop distance): no orders may be placed and the
/// setup stays live for a later tick.
pub fn plan_entry(
    direction: BreachDirection,
    price: f64,
    breach_price: f64,
    atr: f64,
    equity: f64,
    config: &RiskConfig,
) -> Option<TradePlan> {
    // The stop sits beyond both the fixed minimum distance from the breach
    // price and the current volatility, whichever is farther.
    let stop_loss = match direction {
        BreachDirection::Upper => (breach_price + config.min_stop_distance).max(price + atr),
        BreachDirection::Lower => (breach_price - config.min_stop_distance).min(price - atr),
    };

    let risk_amount = equity * config.risk_fraction;
    let pips_risked = (price - stop_loss).abs() / config.pip_size;
    if pips_risked <= 0.0 {
        warn!(
            "degenerate sizing: entry {:.5} equals stop {:.5}, no order placed",
            price, stop_loss
        );
        return None;
    }

    // Truncate to hundredths of a unit, then clamp
    let raw = (risk_amount / pips_risked) / config.pip_size;
    let size = ((raw * 100.0).floor() / 100.0).min(config.max_position_size);

    let take_profit = match direction {
        BreachDirection::Upper => price - (stop_loss - price) * config.reward_ratio,
        BreachDirection::Lower => price + (price - stop_loss) * config.reward_ratio,
    };

    Some(TradePlan {
        direction,
        entry: price,
        stop_loss,
        take_profit,
        size,
    })
}
