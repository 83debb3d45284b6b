//! Order book depth and trade tape records shown next to the chart.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// One price level of the order book.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DepthLevel {
    pub price: f64,
    pub amount: f64,
    /// Cumulative size displayed for the level.
    pub total: f64,
}

/// Asks ascend away from the mid price, bids descend.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct OrderBookDepth {
    pub asks: Vec<DepthLevel>,
    pub bids: Vec<DepthLevel>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TradeSide {
    Buy,
    Sell,
}

/// A single print on the trade tape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Trade {
    pub time: DateTime<Utc>,
    pub price: f64,
    pub amount: f64,
    pub side: TradeSide,
}
