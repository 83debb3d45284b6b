//! Toolbar timeframes and the series each of them is generated from.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{errors::Error, models::interval::Interval};

/// Unit the widget uses to label a period (`setPeriod({ span, type })`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PeriodUnit {
    Minute,
    Hour,
    Day,
}

/// What to generate for a toolbar selection and how the widget should draw it.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PeriodPlan {
    pub interval: Interval,
    pub duration_days: f64,
    /// Timestamp spacing to restamp the generated bars with, if any.
    pub respace_ms: Option<i64>,
    pub span: u32,
    pub unit: PeriodUnit,
    /// Horizontal pixels per bar.
    pub bar_space: u32,
}

/// Timeframe selected on the chart toolbar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ChartPeriod {
    M1,
    M5,
    M15,
    M30,
    #[default]
    H1,
    H4,
    D1,
    W1,
}

impl ChartPeriod {
    pub const ALL: [ChartPeriod; 8] = [
        ChartPeriod::M1,
        ChartPeriod::M5,
        ChartPeriod::M15,
        ChartPeriod::M30,
        ChartPeriod::H1,
        ChartPeriod::H4,
        ChartPeriod::D1,
        ChartPeriod::W1,
    ];

    pub const fn code(self) -> &'static str {
        match self {
            ChartPeriod::M1 => "1m",
            ChartPeriod::M5 => "5m",
            ChartPeriod::M15 => "15m",
            ChartPeriod::M30 => "30m",
            ChartPeriod::H1 => "1h",
            ChartPeriod::H4 => "4h",
            ChartPeriod::D1 => "1d",
            ChartPeriod::W1 => "1w",
        }
    }

    /// Sub-daily periods cover two weeks; the daily view covers 180 days and
    /// the weekly view is 182 daily bars stamped a week apart.
    pub fn plan(self) -> PeriodPlan {
        let (interval, duration_days, span, unit, bar_space) = match self {
            ChartPeriod::M1 => (Interval::M1, 14.0, 1, PeriodUnit::Minute, 1),
            ChartPeriod::M5 => (Interval::M5, 14.0, 5, PeriodUnit::Minute, 2),
            ChartPeriod::M15 => (Interval::M15, 14.0, 15, PeriodUnit::Minute, 3),
            ChartPeriod::M30 => (Interval::M30, 14.0, 30, PeriodUnit::Minute, 4),
            ChartPeriod::H1 => (Interval::H1, 14.0, 1, PeriodUnit::Hour, 6),
            ChartPeriod::H4 => (Interval::H4, 14.0, 4, PeriodUnit::Hour, 8),
            ChartPeriod::D1 => (Interval::D1, 180.0, 1, PeriodUnit::Day, 8),
            ChartPeriod::W1 => (Interval::D1, 182.0, 7, PeriodUnit::Day, 8),
        };
        let respace_ms = matches!(self, ChartPeriod::W1).then(|| 7 * Interval::D1.millis());
        PeriodPlan {
            interval,
            duration_days,
            respace_ms,
            span,
            unit,
            bar_space,
        }
    }
}

impl fmt::Display for ChartPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for ChartPeriod {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ChartPeriod::ALL
            .into_iter()
            .find(|p| p.code() == s.trim())
            .ok_or_else(|| Error::invalid(format!("unknown chart period: {s:?}")))
    }
}

impl TryFrom<String> for ChartPeriod {
    type Error = Error;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ChartPeriod> for String {
    fn from(value: ChartPeriod) -> Self {
        value.code().to_string()
    }
}
