//! Headline figures for the market info panel.

use serde::{Deserialize, Serialize};

use crate::{
    models::{bar::Bar, bar_series::BarSeries},
    stats::window::{TrailingWindow, WindowStats, window_stats},
};

/// Close-to-close move of a displayed bar.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PriceChange {
    pub change: f64,
    /// Percent of the previous close; 0 when the previous close is 0.
    pub change_percent: f64,
}

/// Change of `current` against `previous`. No previous bar means no change.
pub fn price_change(current: &Bar, previous: Option<&Bar>) -> PriceChange {
    let Some(prev) = previous else {
        return PriceChange::default();
    };
    let change = current.close - prev.close;
    let change_percent = if prev.close != 0.0 {
        change / prev.close * 100.0
    } else {
        0.0
    };
    PriceChange {
        change,
        change_percent,
    }
}

/// Latest price, its change and the 24h / 7d ranges ending at the latest bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MarketStats {
    pub current_price: f64,
    pub change: f64,
    pub change_percent: f64,
    pub h24: WindowStats,
    pub d7: WindowStats,
}

/// `None` for an empty series.
pub fn market_stats(series: &BarSeries) -> Option<MarketStats> {
    let latest = series.latest()?;
    let PriceChange {
        change,
        change_percent,
    } = price_change(latest, series.previous());
    let window = |w: TrailingWindow| {
        window_stats(series, latest.timestamp, w.minutes()).unwrap_or_default()
    };
    Some(MarketStats {
        current_price: latest.close,
        change,
        change_percent,
        h24: window(TrailingWindow::Day),
        d7: window(TrailingWindow::Week),
    })
}
