//! Analysis timeframes and the configured interval choice.
//!
//! `Timeframe` is a fixed candle granularity. `IntervalChoice` is what the
//! configuration holds: either a manual timeframe or `Automatic`, which hands
//! the choice to the adaptive interval selector once per cycle.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown interval '{0}' (expected auto, 1m, 5m, 15m, 30m, 1h, 2h, 4h or 1d)")]
pub struct ParseIntervalError(pub String);

/// Candle granularity used to fetch and analyze price/volume series.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum Timeframe {
    OneMinute,
    FiveMinutes,
    FifteenMinutes,
    ThirtyMinutes,
    OneHour,
    TwoHours,
    FourHours,
    OneDay,
}

impl Timeframe {
    pub const ALL: [Timeframe; 8] = [
        Self::OneMinute,
        Self::FiveMinutes,
        Self::FifteenMinutes,
        Self::ThirtyMinutes,
        Self::OneHour,
        Self::TwoHours,
        Self::FourHours,
        Self::OneDay,
    ];

    /// Short code, identical to the exchange kline interval code.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::OneMinute => "1m",
            Self::FiveMinutes => "5m",
            Self::FifteenMinutes => "15m",
            Self::ThirtyMinutes => "30m",
            Self::OneHour => "1h",
            Self::TwoHours => "2h",
            Self::FourHours => "4h",
            Self::OneDay => "1d",
        }
    }

    pub fn minutes(&self) -> i64 {
        match self {
            Self::OneMinute => 1,
            Self::FiveMinutes => 5,
            Self::FifteenMinutes => 15,
            Self::ThirtyMinutes => 30,
            Self::OneHour => 60,
            Self::TwoHours => 120,
            Self::FourHours => 240,
            Self::OneDay => 1440,
        }
    }

    pub fn duration(&self) -> chrono::Duration {
        chrono::Duration::minutes(self.minutes())
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Timeframe {
    type Err = ParseIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|tf| tf.as_str() == needle)
            .ok_or_else(|| ParseIntervalError(s.to_string()))
    }
}

impl TryFrom<String> for Timeframe {
    type Error = ParseIntervalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Timeframe> for String {
    fn from(tf: Timeframe) -> Self {
        tf.as_str().to_string()
    }
}

/// Configured analysis interval: a fixed timeframe, or `Automatic`.
///
/// `Automatic` triggers the adaptive interval selector once per cycle.
/// `Manual` bypasses it entirely.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum IntervalChoice {
    #[default]
    Automatic,
    Manual(Timeframe),
}

impl IntervalChoice {
    pub fn is_automatic(&self) -> bool {
        matches!(self, Self::Automatic)
    }

    /// The manual timeframe, if one is configured.
    pub fn manual(&self) -> Option<Timeframe> {
        match self {
            Self::Automatic => None,
            Self::Manual(tf) => Some(*tf),
        }
    }
}

impl From<Timeframe> for IntervalChoice {
    fn from(tf: Timeframe) -> Self {
        Self::Manual(tf)
    }
}

impl fmt::Display for IntervalChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Automatic => f.write_str("auto"),
            Self::Manual(tf) => write!(f, "{tf}"),
        }
    }
}

impl FromStr for IntervalChoice {
    type Err = ParseIntervalError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" | "automatic" => Ok(Self::Automatic),
            _ => s.parse::<Timeframe>().map(Self::Manual),
        }
    }
}

impl TryFrom<String> for IntervalChoice {
    type Error = ParseIntervalError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<IntervalChoice> for String {
    fn from(choice: IntervalChoice) -> Self {
        choice.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_every_timeframe_code() {
        for tf in Timeframe::ALL {
            assert_eq!(tf.as_str().parse::<Timeframe>().unwrap(), tf);
        }
    }

    #[test]
    fn parse_is_case_insensitive() {
        assert_eq!("1H".parse::<Timeframe>().unwrap(), Timeframe::OneHour);
        assert_eq!(
            "Auto".parse::<IntervalChoice>().unwrap(),
            IntervalChoice::Automatic
        );
    }

    #[test]
    fn parse_rejects_unknown_code() {
        let err = "3h".parse::<IntervalChoice>().unwrap_err();
        assert_eq!(err, ParseIntervalError("3h".into()));
    }

    #[test]
    fn manual_choice_exposes_timeframe() {
        let choice = IntervalChoice::from(Timeframe::FourHours);
        assert!(!choice.is_automatic());
        assert_eq!(choice.manual(), Some(Timeframe::FourHours));
        assert_eq!(IntervalChoice::Automatic.manual(), None);
    }

    #[test]
    fn serde_uses_short_codes() {
        let json = serde_json::to_string(&IntervalChoice::Manual(Timeframe::ThirtyMinutes)).unwrap();
        assert_eq!(json, "\"30m\"");
        let back: IntervalChoice = serde_json::from_str("\"auto\"").unwrap();
        assert_eq!(back, IntervalChoice::Automatic);
    }

    #[test]
    fn durations() {
        assert_eq!(Timeframe::FifteenMinutes.duration(), chrono::Duration::minutes(15));
        assert_eq!(Timeframe::OneDay.minutes(), 24 * 60);
    }
}
