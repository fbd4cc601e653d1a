//! Relative Strength Index (RSI).
//!
//! Gains and losses are summed over the deltas at indices `[1, period)` and
//! each total is averaged by `period` (not by the number of deltas).
//! RSI = 100 - 100 / (1 + avg_gain / avg_loss)
//!
//! Edge cases:
//! - empty series → 0
//! - non-empty series shorter than `period` → `IndicatorError::InsufficientData`
//! - avg_loss == 0 → 100

use super::IndicatorError;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

pub fn rsi(series: &[Decimal], period: usize) -> Result<Decimal, IndicatorError> {
    if series.is_empty() {
        return Ok(Decimal::ZERO);
    }
    if period == 0 {
        return Err(IndicatorError::InvalidPeriod { indicator: "rsi" });
    }
    if series.len() < period {
        return Err(IndicatorError::InsufficientData {
            indicator: "rsi",
            required: period,
            actual: series.len(),
        });
    }

    let mut gains = Decimal::ZERO;
    let mut losses = Decimal::ZERO;
    for pair in series[..period].windows(2) {
        let delta = pair[1] - pair[0];
        if delta > Decimal::ZERO {
            gains += delta;
        } else {
            losses -= delta;
        }
    }

    let period_d = Decimal::from(period as u64);
    let avg_gain = gains / period_d;
    let avg_loss = losses / period_d;

    if avg_loss.is_zero() {
        return Ok(dec!(100));
    }

    let rs = avg_gain / avg_loss;
    Ok(dec!(100) - dec!(100) / (Decimal::ONE + rs))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, series, DEFAULT_EPSILON};

    #[test]
    fn rsi_all_gains_is_100() {
        let s = series(&[100.0, 101.0, 102.0, 103.0, 104.0, 105.0]);
        assert_eq!(rsi(&s, 5).unwrap(), dec!(100));
    }

    #[test]
    fn rsi_flat_is_100() {
        // No losses at all: the zero-loss edge case, not a division failure.
        let s = series(&[50.0; 14]);
        assert_eq!(rsi(&s, 14).unwrap(), dec!(100));
    }

    #[test]
    fn rsi_all_losses_is_0() {
        let s = series(&[105.0, 104.0, 103.0, 102.0, 101.0]);
        assert_approx(rsi(&s, 5).unwrap(), Decimal::ZERO, DEFAULT_EPSILON);
    }

    #[test]
    fn rsi_mixed_known_value() {
        // Deltas: +0.34, -0.25, -0.48, +0.72 → gains 1.06, losses 0.73
        // RS = 106/73, RSI = 100 - 7300/179 = 59.2178770949...
        let s = series(&[44.0, 44.34, 44.09, 43.61, 44.33]);
        assert_approx(
            rsi(&s, 5).unwrap(),
            dec!(59.217877094972067),
            DEFAULT_EPSILON,
        );
    }

    #[test]
    fn rsi_only_reads_first_period_points() {
        let mut s = series(&[10.0, 11.0, 12.0, 13.0]);
        let before = rsi(&s, 4).unwrap();
        s.push(dec!(1));
        assert_eq!(rsi(&s, 4).unwrap(), before);
    }

    #[test]
    fn rsi_empty_is_zero() {
        assert_eq!(rsi(&[], 14).unwrap(), Decimal::ZERO);
    }

    #[test]
    fn rsi_short_series_is_an_error() {
        let s = series(&[1.0, 2.0, 3.0]);
        assert_eq!(
            rsi(&s, 14).unwrap_err(),
            IndicatorError::InsufficientData {
                indicator: "rsi",
                required: 14,
                actual: 3,
            }
        );
    }

    #[test]
    fn rsi_zero_period_is_an_error() {
        let s = series(&[1.0, 2.0]);
        assert!(matches!(
            rsi(&s, 0),
            Err(IndicatorError::InvalidPeriod { .. })
        ));
    }

    #[test]
    fn rsi_bounds() {
        let s = series(&[100.0, 105.0, 98.0, 110.0, 95.0, 115.0, 90.0, 120.0]);
        for period in 1..=s.len() {
            let v = rsi(&s, period).unwrap();
            assert!(
                (Decimal::ZERO..=dec!(100)).contains(&v),
                "RSI out of bounds for period {period}: {v}"
            );
        }
    }
}
