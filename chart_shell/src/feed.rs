//! The widget-facing side of the session: bar loading, cursor events and
//! the style block derived from settings.

use kline_mock::models::{
    bar::Bar,
    period::{PeriodPlan, PeriodUnit},
};
use serde::{Deserialize, Serialize};

use crate::settings::{ChartSettings, Theme};

/// Which slice of history the widget is asking for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LoadKind {
    /// First paint: the whole series.
    Init,
    /// Bars newer than `timestamp`.
    Forward,
    /// Bars older than `timestamp` (scrolling left).
    Backward,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoadRequest {
    pub kind: LoadKind,
    #[serde(default)]
    pub timestamp: Option<i64>,
}

impl LoadRequest {
    pub fn init() -> Self {
        Self {
            kind: LoadKind::Init,
            timestamp: None,
        }
    }

    pub fn backward(timestamp: i64) -> Self {
        Self {
            kind: LoadKind::Backward,
            timestamp: Some(timestamp),
        }
    }

    pub fn forward(timestamp: i64) -> Self {
        Self {
            kind: LoadKind::Forward,
            timestamp: Some(timestamp),
        }
    }
}

/// Answers a load request from an ordered bar slice.
///
/// Forward/backward requests without a timestamp get nothing.
pub fn select_bars(bars: &[Bar], request: LoadRequest) -> &[Bar] {
    match (request.kind, request.timestamp) {
        (LoadKind::Init, _) => bars,
        (LoadKind::Backward, Some(ts)) => &bars[..bars.partition_point(|b| b.timestamp < ts)],
        (LoadKind::Forward, Some(ts)) => &bars[bars.partition_point(|b| b.timestamp <= ts)..],
        (_, None) => &[],
    }
}

/// Cursor movement reported by the widget. `bar` is `None` when the pointer
/// leaves the chart.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CrosshairEvent {
    pub bar: Option<Bar>,
}

impl CrosshairEvent {
    pub fn at(bar: Bar) -> Self {
        Self { bar: Some(bar) }
    }

    pub fn leave() -> Self {
        Self { bar: None }
    }
}

/// Style block handed to the widget whenever settings or the period change.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetStyles {
    pub show_grid: bool,
    pub grid_color: &'static str,
    pub text_color: &'static str,
    pub background: &'static str,
    pub show_volume: bool,
    pub bar_space: u32,
    pub period_span: u32,
    pub period_unit: PeriodUnit,
}

pub fn widget_styles(settings: &ChartSettings, plan: &PeriodPlan) -> WidgetStyles {
    let (grid_color, text_color, background) = match settings.theme {
        Theme::Dark => ("#3a3a3a", "#cccccc", "#1e1e1e"),
        Theme::Light => ("#e0e0e0", "#666666", "#ffffff"),
    };
    WidgetStyles {
        show_grid: settings.show_grid,
        grid_color,
        text_color,
        background,
        show_volume: settings.show_volume,
        bar_space: plan.bar_space,
        period_span: plan.span,
        period_unit: plan.unit,
    }
}
