//! What a suggestion asks the exchange to do.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of order action proposed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeAction {
    /// Open a new position.
    OpenNewOrder,
    /// Close an existing position.
    CloseOrder,
    /// Move take-profit / stop-loss on an existing position.
    #[serde(rename = "ADJUST_SLTP")]
    AdjustSlTp,
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::OpenNewOrder => write!(f, "OPEN_NEW_ORDER"),
            Self::CloseOrder => write!(f, "CLOSE_ORDER"),
            Self::AdjustSlTp => write!(f, "ADJUST_SLTP"),
        }
    }
}

/// Order side (buy or sell).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderSide {
    /// Buy order.
    Buy,
    /// Sell order.
    Sell,
}

impl fmt::Display for OrderSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Buy => write!(f, "BUY"),
            Self::Sell => write!(f, "SELL"),
        }
    }
}
