//! Adaptive interval selector.
//!
//! Maps a week of hourly candles (168 points) to a recommended analysis
//! timeframe using short/long volatility, trend and average volume.
//!
//! Rule table, first match wins:
//!
//! | trend | condition                       | timeframe |
//! |-------|---------------------------------|-----------|
//! | Up    | short_vol / long_vol > 1.5      | 30m       |
//! | Up    | otherwise                       | 2h        |
//! | any   | short_vol > 0.08, avg_vol > 10k | 4h        |
//! | any   | short_vol > 0.08                | 1h        |
//! | any   | long_vol < 0.03                 | 15m       |
//! | any   | default                         | 1h        |

use super::trend::trend;
use super::volatility::volatility;
use crate::domain::{Timeframe, TrendDirection};
use crate::indicators::{mean, tail};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

/// One week of hourly candles.
pub const BASELINE_POINTS: usize = 168;
/// Last day of the baseline.
pub const SHORT_TERM_POINTS: usize = 24;
/// Timeframe the baseline series must be fetched with.
pub const BASELINE_TIMEFRAME: Timeframe = Timeframe::OneHour;

pub const VOLATILITY_SPIKE_RATIO: Decimal = dec!(1.5);
pub const EXTREME_SHORT_VOLATILITY: Decimal = dec!(0.08);
pub const HIGH_AVERAGE_VOLUME: Decimal = dec!(10000);
pub const STABLE_LONG_VOLATILITY: Decimal = dec!(0.03);

/// Timeframe returned when either input series is empty.
pub const EMPTY_INPUT_TIMEFRAME: Timeframe = Timeframe::FifteenMinutes;
/// Timeframe returned when the baseline is shorter than a week.
pub const SHORT_BASELINE_TIMEFRAME: Timeframe = Timeframe::OneHour;

/// Inputs and outcome of one selector run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntervalAnalysis {
    pub short_volatility: Decimal,
    pub long_volatility: Decimal,
    pub trend: TrendDirection,
    pub average_volume: Decimal,
    pub timeframe: Timeframe,
}

/// Why the selector did not run its full analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SelectionFallback {
    EmptyInput,
    ShortBaseline { points: usize },
}

/// Outcome of [`analyze_interval`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IntervalSelection {
    Analyzed(IntervalAnalysis),
    Fallback {
        reason: SelectionFallback,
        timeframe: Timeframe,
    },
}

impl IntervalSelection {
    pub fn timeframe(&self) -> Timeframe {
        match self {
            Self::Analyzed(analysis) => analysis.timeframe,
            Self::Fallback { timeframe, .. } => *timeframe,
        }
    }
}

/// Recommended timeframe for the given weekly baseline.
pub fn select_interval(prices: &[Decimal], volumes: &[Decimal]) -> Timeframe {
    analyze_interval(prices, volumes).timeframe()
}

/// Run the selector and keep the intermediate values.
pub fn analyze_interval(prices: &[Decimal], volumes: &[Decimal]) -> IntervalSelection {
    if prices.is_empty() || volumes.is_empty() {
        return IntervalSelection::Fallback {
            reason: SelectionFallback::EmptyInput,
            timeframe: EMPTY_INPUT_TIMEFRAME,
        };
    }
    if prices.len() < BASELINE_POINTS {
        return IntervalSelection::Fallback {
            reason: SelectionFallback::ShortBaseline {
                points: prices.len(),
            },
            timeframe: SHORT_BASELINE_TIMEFRAME,
        };
    }

    let short_volatility = volatility(tail(prices, SHORT_TERM_POINTS));
    let long_volatility = volatility(prices);
    let trend = trend(prices);
    let average_volume = mean(volumes);

    let timeframe = choose_timeframe(short_volatility, long_volatility, trend, average_volume);
    tracing::debug!(
        %short_volatility,
        %long_volatility,
        %trend,
        %average_volume,
        %timeframe,
        "interval selected"
    );

    IntervalSelection::Analyzed(IntervalAnalysis {
        short_volatility,
        long_volatility,
        trend,
        average_volume,
        timeframe,
    })
}

/// The rule table itself.
pub fn choose_timeframe(
    short_volatility: Decimal,
    long_volatility: Decimal,
    trend: TrendDirection,
    average_volume: Decimal,
) -> Timeframe {
    // A zero long-term volatility means no spike relative to baseline.
    let ratio = if long_volatility.is_zero() {
        Decimal::ZERO
    } else {
        short_volatility / long_volatility
    };

    if trend == TrendDirection::Up {
        return if ratio > VOLATILITY_SPIKE_RATIO {
            Timeframe::ThirtyMinutes
        } else {
            Timeframe::TwoHours
        };
    }

    if short_volatility > EXTREME_SHORT_VOLATILITY {
        return if average_volume > HIGH_AVERAGE_VOLUME {
            Timeframe::FourHours
        } else {
            Timeframe::OneHour
        };
    }

    if long_volatility < STABLE_LONG_VOLATILITY {
        return Timeframe::FifteenMinutes;
    }

    Timeframe::OneHour
}

#[cfg(test)]
mod tests {
    use super::*;

    fn flat_week() -> Vec<Decimal> {
        vec![dec!(100); BASELINE_POINTS]
    }

    #[test]
    fn empty_inputs_default_to_15m() {
        assert_eq!(select_interval(&[], &[dec!(1)]), Timeframe::FifteenMinutes);
        assert_eq!(select_interval(&flat_week(), &[]), Timeframe::FifteenMinutes);
    }

    #[test]
    fn short_baseline_falls_back_to_1h() {
        let prices = vec![dec!(100); BASELINE_POINTS - 1];
        let selection = analyze_interval(&prices, &[dec!(1)]);
        assert_eq!(
            selection,
            IntervalSelection::Fallback {
                reason: SelectionFallback::ShortBaseline { points: 167 },
                timeframe: Timeframe::OneHour,
            }
        );
    }

    #[test]
    fn flat_market_is_stable() {
        // Zero volatility on both horizons, neutral trend → 15m.
        let selection = analyze_interval(&flat_week(), &[dec!(500); BASELINE_POINTS]);
        let IntervalSelection::Analyzed(analysis) = selection else {
            panic!("expected full analysis, got {selection:?}");
        };
        assert_eq!(analysis.trend, TrendDirection::Neutral);
        assert_eq!(analysis.long_volatility, Decimal::ZERO);
        assert_eq!(analysis.average_volume, dec!(500));
        assert_eq!(analysis.timeframe, Timeframe::FifteenMinutes);
    }

    #[test]
    fn rule_table_uptrend() {
        let up = TrendDirection::Up;
        assert_eq!(
            choose_timeframe(dec!(0.04), dec!(0.02), up, dec!(0)),
            Timeframe::ThirtyMinutes
        );
        assert_eq!(
            choose_timeframe(dec!(0.03), dec!(0.02), up, dec!(0)),
            Timeframe::TwoHours
        );
        // Uptrend wins over extreme volatility.
        assert_eq!(
            choose_timeframe(dec!(0.09), dec!(0.09), up, dec!(50000)),
            Timeframe::TwoHours
        );
    }

    #[test]
    fn rule_table_extreme_volatility() {
        let n = TrendDirection::Neutral;
        assert_eq!(
            choose_timeframe(dec!(0.09), dec!(0.01), n, dec!(10001)),
            Timeframe::FourHours
        );
        assert_eq!(
            choose_timeframe(dec!(0.09), dec!(0.01), n, dec!(10000)),
            Timeframe::OneHour
        );
    }

    #[test]
    fn rule_table_stable_and_default() {
        let d = TrendDirection::Down;
        assert_eq!(
            choose_timeframe(dec!(0.01), dec!(0.029), d, dec!(0)),
            Timeframe::FifteenMinutes
        );
        assert_eq!(
            choose_timeframe(dec!(0.01), dec!(0.03), d, dec!(0)),
            Timeframe::OneHour
        );
    }

    #[test]
    fn zero_long_volatility_in_uptrend_is_not_a_spike() {
        assert_eq!(
            choose_timeframe(dec!(0.05), Decimal::ZERO, TrendDirection::Up, dec!(0)),
            Timeframe::TwoHours
        );
    }

    #[test]
    fn only_the_last_day_drives_short_volatility() {
        // Calm six days, then a day that alternates ±10%.
        let mut prices = vec![dec!(100); BASELINE_POINTS - SHORT_TERM_POINTS];
        for i in 0..SHORT_TERM_POINTS {
            prices.push(if i % 2 == 0 { dec!(110) } else { dec!(99) });
        }
        let IntervalSelection::Analyzed(analysis) =
            analyze_interval(&prices, &[dec!(20000); BASELINE_POINTS])
        else {
            panic!("expected full analysis");
        };
        assert!(analysis.short_volatility > EXTREME_SHORT_VOLATILITY);
        assert!(analysis.long_volatility < analysis.short_volatility);
    }
}
