//! Order request types submitted through the gateway

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Order side (buy or sell)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSide {
    Buy,
    Sell,
}

impl OrderSide {
    pub fn opposite(&self) -> Self {
        match self {
            Self::Buy => Self::Sell,
            Self::Sell => Self::Buy,
        }
    }
}

impl std::fmt::Display for OrderSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}

/// Order type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderType {
    Market,
    Stop,
    Limit,
}

/// Fire-and-forget order request. Quantity is signed: positive buys,
/// negative sells.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OrderRequest {
    /// Unique order ID (client-side)
    pub id: Uuid,

    /// Symbol
    pub symbol: String,

    /// Order type
    pub order_type: OrderType,

    /// Signed quantity in units
    pub quantity: f64,

    /// Stop price (for stop orders)
    pub stop_price: Option<f64>,

    /// Limit price (for limit orders)
    pub limit_price: Option<f64>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,
}

impl OrderRequest {
    /// Create a new market order
    pub fn market(symbol: &str, quantity: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.to_string(),
            order_type: OrderType::Market,
            quantity,
            stop_price: None,
            limit_price: None,
            created_at: Utc::now(),
        }
    }

    /// Create a new stop order
    pub fn stop(symbol: &str, quantity: f64, stop_price: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.to_string(),
            order_type: OrderType::Stop,
            quantity,
            stop_price: Some(stop_price),
            limit_price: None,
            created_at: Utc::now(),
        }
    }

    /// Create a new limit order
    pub fn limit(symbol: &str, quantity: f64, limit_price: f64) -> Self {
        Self {
            id: Uuid::new_v4(),
            symbol: symbol.to_string(),
            order_type: OrderType::Limit,
            quantity,
            stop_price: None,
            limit_price: Some(limit_price),
            created_at: Utc::now(),
        }
    }

    /// Side implied by the signed quantity
    pub fn side(&self) -> OrderSide {
        if self.quantity >= 0.0 {
            OrderSide::Buy
        } else {
            OrderSide::Sell
        }
    }
}
