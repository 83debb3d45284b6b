//! Statistics derived from a [`BarSeries`](crate::models::bar_series::BarSeries).
//!
//! Everything here is a pure function of its inputs: no caching, no mutation
//! of the series. Reference bars are located by binary search, so each call
//! costs O(log n + window) and is cheap enough to run on every cursor move.

pub mod market;
pub mod window;

pub use market::{MarketStats, PriceChange, market_stats, price_change};
pub use window::{TrailingWindow, WindowStats, window_stats, window_stats_bars};
