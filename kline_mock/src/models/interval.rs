//! Sampling intervals supported by the series generator.
//!
//! An [`Interval`] is one of the seven fixed widths the chart toolbar offers.
//! It displays and parses as the short codes the toolbar uses (`"1m"`, `"4h"`,
//! `"1d"`, ...).
//!
//! ```
//! use kline_mock::models::interval::Interval;
//!
//! let iv: Interval = "15m".parse().unwrap();
//! assert_eq!(iv.minutes(), 15);
//! assert_eq!(iv.to_string(), "15m");
//! ```

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::errors::Error;

/// Milliseconds in one minute.
pub const MS_PER_MINUTE: i64 = 60_000;
/// Minutes in one day.
pub const MINUTES_PER_DAY: f64 = 1440.0;

/// Bar width.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Interval {
    M1,
    M5,
    M15,
    M30,
    H1,
    H4,
    D1,
}

impl Interval {
    /// Every interval, narrowest first.
    pub const ALL: [Interval; 7] = [
        Interval::M1,
        Interval::M5,
        Interval::M15,
        Interval::M30,
        Interval::H1,
        Interval::H4,
        Interval::D1,
    ];

    /// Width in minutes.
    pub const fn minutes(self) -> u32 {
        match self {
            Interval::M1 => 1,
            Interval::M5 => 5,
            Interval::M15 => 15,
            Interval::M30 => 30,
            Interval::H1 => 60,
            Interval::H4 => 240,
            Interval::D1 => 1440,
        }
    }

    /// Width in milliseconds, i.e. the timestamp step between adjacent bars.
    pub const fn millis(self) -> i64 {
        self.minutes() as i64 * MS_PER_MINUTE
    }

    pub const fn code(self) -> &'static str {
        match self {
            Interval::M1 => "1m",
            Interval::M5 => "5m",
            Interval::M15 => "15m",
            Interval::M30 => "30m",
            Interval::H1 => "1h",
            Interval::H4 => "4h",
            Interval::D1 => "1d",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Interval {
    type Err = Error;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Interval::ALL
            .into_iter()
            .find(|iv| iv.code() == s.trim())
            .ok_or_else(|| Error::invalid(format!("unknown interval: {s:?}")))
    }
}

impl TryFrom<String> for Interval {
    type Error = Error;
    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Interval> for String {
    fn from(value: Interval) -> Self {
        value.code().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn widths_match_codes() {
        let widths: Vec<u32> = Interval::ALL.iter().map(|iv| iv.minutes()).collect();
        assert_eq!(widths, vec![1, 5, 15, 30, 60, 240, 1440]);
        assert_eq!(Interval::H1.millis(), 3_600_000);
    }

    #[test]
    fn parse_display_roundtrip() {
        for iv in Interval::ALL {
            assert_eq!(iv.to_string().parse::<Interval>().unwrap(), iv);
        }
    }

    #[test]
    fn unknown_codes_are_invalid_arguments() {
        for bad in ["", "1w", "2h", "1H", "60"] {
            match bad.parse::<Interval>() {
                Err(Error::InvalidArgument(msg)) => assert!(msg.contains("unknown interval")),
                other => panic!("{bad:?} parsed as {other:?}"),
            }
        }
    }

    #[test]
    fn serde_uses_codes() {
        assert_eq!(serde_json::to_string(&Interval::H4).unwrap(), "\"4h\"");
        let iv: Interval = serde_json::from_str("\"30m\"").unwrap();
        assert_eq!(iv, Interval::M30);
        assert!(serde_json::from_str::<Interval>("\"3h\"").is_err());
    }
}
