//! A collection of time-series bars for a specific symbol and interval.

use serde::{Deserialize, Serialize};

use crate::models::{bar::Bar, interval::Interval};

/// Represents a complete set of time-series data for a single symbol.
///
/// This struct groups a vector of [`Bar`]s with their corresponding symbol
/// and [`Interval`], making the data set self-describing. Bars are ordered
/// oldest to newest and spaced `step_ms` apart. A series is never edited bar
/// by bar; a new interval or a reset replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSeries {
    /// The symbol this data represents (e.g., "BTC-USDT").
    pub symbol: String,
    /// The interval the bars were sampled at.
    pub interval: Interval,
    /// Timestamp distance between adjacent bars. Equals `interval.millis()`
    /// except for respaced series (weekly view built from daily bars).
    pub step_ms: i64,
    /// The collection of OHLCV bars.
    pub bars: Vec<Bar>,
}

impl BarSeries {
    pub fn new(symbol: impl Into<String>, interval: Interval, bars: Vec<Bar>) -> Self {
        Self {
            symbol: symbol.into(),
            interval,
            step_ms: interval.millis(),
            bars,
        }
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    /// Most recent bar.
    pub fn latest(&self) -> Option<&Bar> {
        self.bars.last()
    }

    /// Bar before the most recent one.
    pub fn previous(&self) -> Option<&Bar> {
        self.bars.len().checked_sub(2).map(|i| &self.bars[i])
    }

    /// Re-stamps every bar `step_ms` apart, keeping the first bar's timestamp.
    ///
    /// Prices and volumes are left untouched.
    pub fn respaced(mut self, step_ms: i64) -> Self {
        if let Some(first) = self.bars.first().map(|b| b.timestamp) {
            for (i, bar) in self.bars.iter_mut().enumerate() {
                bar.timestamp = first + i as i64 * step_ms;
            }
        }
        self.step_ms = step_ms;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat(ts: i64) -> Bar {
        Bar {
            timestamp: ts,
            open: 1.0,
            high: 1.0,
            low: 1.0,
            close: 1.0,
            volume: 1,
        }
    }

    #[test]
    fn latest_and_previous() {
        let mut s = BarSeries::new("X", Interval::M1, vec![]);
        assert!(s.latest().is_none());
        assert!(s.previous().is_none());

        s.bars.push(flat(0));
        assert_eq!(s.latest().unwrap().timestamp, 0);
        assert!(s.previous().is_none());

        s.bars.push(flat(60_000));
        assert_eq!(s.previous().unwrap().timestamp, 0);
    }

    #[test]
    fn respacing_keeps_anchor() {
        let day = Interval::D1.millis();
        let s = BarSeries::new("X", Interval::D1, (0..3).map(|i| flat(100 + i * day)).collect());
        let week = 7 * day;
        let s = s.respaced(week);
        let ts: Vec<i64> = s.bars.iter().map(|b| b.timestamp).collect();
        assert_eq!(ts, vec![100, 100 + week, 100 + 2 * week]);
        assert_eq!(s.step_ms, week);
        assert_eq!(s.interval, Interval::D1);
    }
}
