//! Canonical in-memory representation of a time-series bar (OHLCV).
//!
//! The serde shape (`timestamp`, `open`, `high`, `low`, `close`, `volume`) is
//! the K-line record consumed by the chart widget, so a [`Bar`] can be handed
//! to it without conversion.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single time-series bar (OHLCV) for a given timestamp.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Bar {
    /// Start of the bar, in milliseconds since the Unix epoch.
    pub timestamp: i64,

    /// Opening price.
    pub open: f64,

    /// Highest price during the bar interval.
    pub high: f64,

    /// Lowest price during the bar interval.
    pub low: f64,

    /// Closing price.
    pub close: f64,

    /// Volume traded during the bar interval.
    pub volume: u64,
}

impl Bar {
    /// The bar's start as a UTC instant, or `None` when the timestamp is out
    /// of chrono's representable range.
    pub fn datetime(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }

    /// `true` when `high` bounds `open`/`close` from above and `low` from below.
    pub fn is_well_formed(&self) -> bool {
        self.high >= self.open.max(self.close) && self.low <= self.open.min(self.close)
    }
}
