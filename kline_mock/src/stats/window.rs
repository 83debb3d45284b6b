//! Trailing-window aggregates anchored at a reference bar.

use serde::{Deserialize, Serialize};

use crate::models::{bar::Bar, bar_series::BarSeries, interval::MS_PER_MINUTE};

/// Max high, min low and summed volume over a run of bars.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WindowStats {
    pub max: f64,
    pub min: f64,
    pub volume: u64,
}

impl WindowStats {
    /// Display placeholder for "no data". Equal to `WindowStats::default()`.
    pub const ZERO: WindowStats = WindowStats {
        max: 0.0,
        min: 0.0,
        volume: 0,
    };

    /// Aggregates `bars`; `None` for an empty slice.
    pub fn from_bars(bars: &[Bar]) -> Option<Self> {
        let (first, rest) = bars.split_first()?;
        let init = WindowStats {
            max: first.high,
            min: first.low,
            volume: first.volume,
        };
        Some(rest.iter().fold(init, |acc, b| WindowStats {
            max: acc.max.max(b.high),
            min: acc.min.min(b.low),
            volume: acc.volume.saturating_add(b.volume),
        }))
    }
}

/// The rolling windows shown in the info panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TrailingWindow {
    Hour,
    Day,
    Week,
}

impl TrailingWindow {
    pub const fn minutes(self) -> u32 {
        match self {
            TrailingWindow::Hour => 60,
            TrailingWindow::Day => 1440,
            TrailingWindow::Week => 10_080,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            TrailingWindow::Hour => "1h",
            TrailingWindow::Day => "24h",
            TrailingWindow::Week => "7d",
        }
    }
}

/// Index of the first bar with `timestamp >= reference_ts`.
///
/// `None` when the series is empty or the reference lies past the last bar.
pub fn reference_index(bars: &[Bar], reference_ts: i64) -> Option<usize> {
    let idx = bars.partition_point(|b| b.timestamp < reference_ts);
    (idx < bars.len()).then_some(idx)
}

/// Bars needed to cover `window_minutes` at `step_ms` spacing, at least one.
pub fn bars_in_window(window_minutes: u32, step_ms: i64) -> usize {
    if step_ms <= 0 {
        return 1;
    }
    let window_ms = window_minutes as i64 * MS_PER_MINUTE;
    let bars = (window_ms + step_ms - 1) / step_ms;
    bars.max(1) as usize
}

/// Stats over the trailing `window_minutes` of `series`, ending at and
/// including the first bar at or after `reference_ts`.
///
/// The window is converted to a bar count with the series spacing. History
/// shorter than the window yields a partial window. Returns `None` when there
/// is no reference bar (empty series, or reference after the last bar).
pub fn window_stats(series: &BarSeries, reference_ts: i64, window_minutes: u32) -> Option<WindowStats> {
    let n = bars_in_window(window_minutes, series.step_ms);
    window_stats_bars(&series.bars, reference_ts, n)
}

/// Same as [`window_stats`] with the window given directly as a bar count.
pub fn window_stats_bars(bars: &[Bar], reference_ts: i64, window_bars: usize) -> Option<WindowStats> {
    let end = reference_index(bars, reference_ts)?;
    let start = (end + 1).saturating_sub(window_bars.max(1));
    WindowStats::from_bars(&bars[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::interval::Interval;

    fn bar(i: i64, high: f64, low: f64, volume: u64) -> Bar {
        Bar {
            timestamp: i * 60_000,
            open: low,
            high,
            low,
            close: high,
            volume,
        }
    }

    fn series(highs: &[f64]) -> BarSeries {
        let bars = highs
            .iter()
            .enumerate()
            .map(|(i, h)| bar(i as i64, *h, h - 1.0, 10 * (i as u64 + 1)))
            .collect();
        BarSeries::new("T", Interval::M1, bars)
    }

    #[test]
    fn three_bar_window_at_fifth_bar() {
        let s = series(&[5.0, 7.0, 3.0, 9.0, 2.0, 4.0, 6.0, 8.0, 1.0, 10.0]);
        let ts = s.bars[4].timestamp;
        let st = window_stats(&s, ts, 3).unwrap();
        assert_eq!(st.max, 9.0);
        assert_eq!(st.min, 1.0);
        assert_eq!(st.volume, 30 + 40 + 50);
    }

    #[test]
    fn reference_between_bars_snaps_forward() {
        let s = series(&[5.0, 7.0, 3.0, 9.0, 2.0]);
        let st = window_stats(&s, s.bars[1].timestamp + 1, 1).unwrap();
        assert_eq!(st.max, 3.0);
    }

    #[test]
    fn reference_before_first_bar_uses_first_bar() {
        let s = series(&[5.0, 7.0]);
        let st = window_stats(&s, -1_000_000, 60).unwrap();
        assert_eq!(st, WindowStats { max: 5.0, min: 4.0, volume: 10 });
    }

    #[test]
    fn reference_after_last_bar_is_none() {
        let s = series(&[5.0, 7.0]);
        assert!(window_stats(&s, s.bars[1].timestamp + 1, 60).is_none());
    }

    #[test]
    fn empty_series_is_none_and_zero_by_default() {
        let s = BarSeries::new("T", Interval::M1, vec![]);
        let st = window_stats(&s, 0, 60);
        assert!(st.is_none());
        assert_eq!(st.unwrap_or_default(), WindowStats::ZERO);
    }

    #[test]
    fn oversized_window_covers_available_prefix() {
        let s = series(&[5.0, 7.0, 3.0]);
        let st = window_stats(&s, s.bars[2].timestamp, 10_080).unwrap();
        assert_eq!(st, WindowStats::from_bars(&s.bars).unwrap());
        assert_eq!(st.volume, 60);
    }

    #[test]
    fn window_minutes_scale_with_spacing() {
        assert_eq!(bars_in_window(60, Interval::M1.millis()), 60);
        assert_eq!(bars_in_window(60, Interval::M15.millis()), 4);
        assert_eq!(bars_in_window(60, Interval::H4.millis()), 1);
        assert_eq!(bars_in_window(1440, Interval::H4.millis()), 6);
        assert_eq!(bars_in_window(10_080, 7 * Interval::D1.millis()), 1);
        assert_eq!(bars_in_window(0, Interval::M1.millis()), 1);
    }

    #[test]
    fn repeated_calls_agree() {
        let s = series(&[5.0, 7.0, 3.0, 9.0, 2.0, 4.0]);
        let ts = s.bars[3].timestamp;
        assert_eq!(window_stats(&s, ts, 2), window_stats(&s, ts, 2));
    }

    #[test]
    fn labels() {
        assert_eq!(TrailingWindow::Day.minutes(), 1440);
        assert_eq!(TrailingWindow::Week.label(), "7d");
    }
}
