//! Linear-regression trend classification.
//!
//! Ordinary least-squares slope of price against a 0-based time index,
//! classified with a fixed deadband so noise does not read as trend.

use crate::domain::TrendDirection;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// Slopes within `±TREND_DEADBAND` classify as `Neutral`.
pub const TREND_DEADBAND: Decimal = dec!(0.005);

/// OLS slope of `prices` against `0..n`. Fewer than two points → 0.
pub fn trend_slope(prices: &[Decimal]) -> Decimal {
    let n = Decimal::from(prices.len() as u64);
    let mut sum_x = Decimal::ZERO;
    let mut sum_y = Decimal::ZERO;
    let mut sum_xy = Decimal::ZERO;
    let mut sum_x2 = Decimal::ZERO;

    for (i, &price) in prices.iter().enumerate() {
        let x = Decimal::from(i as u64);
        sum_x += x;
        sum_y += price;
        sum_xy += x * price;
        sum_x2 += x * x;
    }

    let denominator = n * sum_x2 - sum_x * sum_x;
    if denominator.is_zero() {
        return Decimal::ZERO;
    }
    (n * sum_xy - sum_x * sum_y) / denominator
}

pub fn classify_slope(slope: Decimal) -> TrendDirection {
    if slope > TREND_DEADBAND {
        TrendDirection::Up
    } else if slope < -TREND_DEADBAND {
        TrendDirection::Down
    } else {
        TrendDirection::Neutral
    }
}

/// Trend direction over the whole window.
pub fn trend(prices: &[Decimal]) -> TrendDirection {
    classify_slope(trend_slope(prices))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, series, DEFAULT_EPSILON};

    #[test]
    fn slope_of_a_line() {
        let s = series(&[10.0, 12.0, 14.0, 16.0, 18.0]);
        assert_approx(trend_slope(&s), dec!(2), DEFAULT_EPSILON);
        assert_eq!(trend(&s), TrendDirection::Up);
    }

    #[test]
    fn falling_prices_trend_down() {
        let s = series(&[18.0, 16.0, 14.0, 12.0]);
        assert_eq!(trend(&s), TrendDirection::Down);
    }

    #[test]
    fn deadband_absorbs_small_slopes() {
        assert_eq!(classify_slope(dec!(0.005)), TrendDirection::Neutral);
        assert_eq!(classify_slope(dec!(-0.005)), TrendDirection::Neutral);
        assert_eq!(classify_slope(dec!(0.0051)), TrendDirection::Up);
        assert_eq!(classify_slope(dec!(-0.0051)), TrendDirection::Down);
    }

    #[test]
    fn flat_prices_are_neutral() {
        assert_eq!(trend(&[dec!(100); 30]), TrendDirection::Neutral);
    }

    #[test]
    fn degenerate_windows_are_neutral() {
        assert_eq!(trend_slope(&[]), Decimal::ZERO);
        assert_eq!(trend_slope(&[dec!(42)]), Decimal::ZERO);
        assert_eq!(trend(&[]), TrendDirection::Neutral);
    }
}
