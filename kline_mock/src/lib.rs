//! Synthetic K-line (OHLCV) market data and the statistics derived from it.
//!
//! - [`generator`] produces randomized but well-formed bar series, order book
//!   depth and recent trades.
//! - [`stats`] computes trailing-window aggregates and price change figures.
//! - [`providers`] exposes generation behind the async [`providers::DataProvider`] seam.
//! - [`io`] writes series out (CSV export).

pub mod errors;
pub mod generator;
pub mod io;
pub mod models;
pub mod providers;
pub mod stats;

pub use errors::Error;
