//! Order book depth and trade tape around a current price.

use chrono::{DateTime, Duration, Utc};
use rand::Rng;

use crate::{
    generator::{round2, round3},
    models::book::{DepthLevel, OrderBookDepth, Trade, TradeSide},
};

/// Levels generated on each side of the book.
pub const DEPTH_LEVELS: usize = 10;
/// Price distance between adjacent levels.
pub const LEVEL_STEP: f64 = 50.0;
/// Time between generated prints, newest first.
pub const TRADE_SPACING_SECS: i64 = 30;

/// Ten asks above and ten bids below `current_price`, `LEVEL_STEP` apart.
pub fn generate_depth<R: Rng + ?Sized>(current_price: f64, rng: &mut R) -> OrderBookDepth {
    let mut depth = OrderBookDepth {
        asks: Vec::with_capacity(DEPTH_LEVELS),
        bids: Vec::with_capacity(DEPTH_LEVELS),
    };
    for level in 1..=DEPTH_LEVELS {
        let offset = level as f64 * LEVEL_STEP;
        depth.asks.push(depth_level(current_price + offset, level, rng));
        depth.bids.push(depth_level(current_price - offset, level, rng));
    }
    depth
}

fn depth_level<R: Rng + ?Sized>(price: f64, level: usize, rng: &mut R) -> DepthLevel {
    let amount = round3(rng.random::<f64>() * 5.0 + 0.5);
    let total = round3(level as f64 * (rng.random::<f64>() * 3.0 + 1.0) + amount);
    DepthLevel {
        price: round2(price),
        amount,
        total,
    }
}

/// `count` prints going back from `now`, one every [`TRADE_SPACING_SECS`].
///
/// Prices scatter ±100 around `current_price`; prints at or above it are buys.
pub fn generate_trades<R: Rng + ?Sized>(
    current_price: f64,
    count: usize,
    now: DateTime<Utc>,
    rng: &mut R,
) -> Vec<Trade> {
    (0..count)
        .map(|i| {
            let offset = (rng.random::<f64>() - 0.5) * 200.0;
            let amount = round3(rng.random::<f64>() * 10.0 + 0.1);
            Trade {
                time: now - Duration::seconds(i as i64 * TRADE_SPACING_SECS),
                price: round2(current_price + offset),
                amount,
                side: if offset >= 0.0 {
                    TradeSide::Buy
                } else {
                    TradeSide::Sell
                },
            }
        })
        .collect()
}
