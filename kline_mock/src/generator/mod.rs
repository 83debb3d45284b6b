//! Synthetic market data.
//!
//! The series generator is a single-pass random walk: every bar depends on the
//! previous bar's close and volume, so bars cannot be sampled independently.
//! All randomness comes from a caller-supplied [`rand::Rng`] (see
//! [`generate_with_rng`]) or from a [`StdRng`] seeded by
//! [`GeneratorConfig::seed`], which makes output reproducible in tests.

pub mod book;
pub mod series;

use chrono::Utc;
use rand::{SeedableRng, rngs::StdRng};
use serde::{Deserialize, Serialize};

use crate::errors::Error;

pub use book::{generate_depth, generate_trades};
pub use series::{generate, generate_period, generate_with_config, generate_with_rng};

/// Smallest price a bar can carry.
pub const MIN_PRICE: f64 = 0.01;

/// Tunables of the random walk. Defaults reproduce the chart's stock feed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    /// Symbol stamped on generated series.
    pub symbol: String,
    /// Seed for the internal RNG. `None` draws a fresh seed from the OS.
    pub seed: Option<u64>,
    /// Pins "now" (ms since epoch) so the series' time axis is reproducible.
    pub now_ms: Option<i64>,
    pub start_price: f64,
    pub start_volume: f64,
    /// Lower clamp of the running price.
    pub price_floor: f64,
    /// Upper clamp of the running price.
    pub price_ceiling: f64,
    /// Amplitude of the uniform noise term (0.02 = ±1% per step).
    pub volatility: f64,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            symbol: "BTC-USDT".to_string(),
            seed: None,
            now_ms: None,
            start_price: 50_000.0,
            start_volume: 1_000.0,
            price_floor: 10_000.0,
            price_ceiling: 100_000.0,
            volatility: 0.02,
        }
    }
}

impl GeneratorConfig {
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_now_ms(mut self, now_ms: i64) -> Self {
        self.now_ms = Some(now_ms);
        self
    }

    /// RNG for one generation run.
    pub fn rng(&self) -> StdRng {
        match self.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        }
    }

    pub(crate) fn now_ms(&self) -> i64 {
        self.now_ms.unwrap_or_else(|| Utc::now().timestamp_millis())
    }

    /// Prices are emitted in cents, so the band must start at one cent or
    /// rounding would flatten bars to zero.
    pub fn validate(&self) -> Result<(), Error> {
        if !(self.price_floor.is_finite() && self.price_floor >= MIN_PRICE) {
            return Err(Error::invalid(format!("price_floor must be at least {MIN_PRICE}")));
        }
        if !(self.price_ceiling.is_finite() && self.price_ceiling >= self.price_floor) {
            return Err(Error::invalid("price_ceiling must be >= price_floor"));
        }
        if !(self.start_price.is_finite() && self.start_price > 0.0) {
            return Err(Error::invalid("start_price must be a positive number"));
        }
        if !(self.start_volume.is_finite() && self.start_volume >= 0.0) {
            return Err(Error::invalid("start_volume must be >= 0"));
        }
        if !(self.volatility.is_finite() && (0.0..1.0).contains(&self.volatility)) {
            return Err(Error::invalid("volatility must be in [0, 1)"));
        }
        Ok(())
    }
}

/// Rounds to cents.
pub(crate) fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

pub(crate) fn round3(x: f64) -> f64 {
    (x * 1000.0).round() / 1000.0
}
