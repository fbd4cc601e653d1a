//! Moving Average Convergence Divergence (MACD) with signal line.
//!
//! MACD = EMA(12) - EMA(26) over the full series.
//! Signal = EMA(9) over the MACD values recomputed on the series truncated by
//! `i` points from the end, for `i = 0..=min(8, len - 1)`.
//!
//! Every historical MACD value is re-derived from a truncated slice instead of
//! carrying incremental EMA state, so the cost is O(window²) in the number of
//! signal points. Truncated slices shorter than 26 points hit the EMA
//! neutral-zero guard and contribute EMA(12) alone; that is the defined output.
//! Fewer than 26 points → (0, 0).

use super::ema::ema;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

pub const FAST_PERIOD: usize = 12;
pub const SLOW_PERIOD: usize = 26;
pub const SIGNAL_PERIOD: usize = 9;

/// MACD line and its signal line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Macd {
    pub macd: Decimal,
    pub signal: Decimal,
}

impl Macd {
    pub fn histogram(&self) -> Decimal {
        self.macd - self.signal
    }
}

pub fn macd(series: &[Decimal]) -> Macd {
    if series.len() < SLOW_PERIOD {
        return Macd::default();
    }

    let n = series.len();
    let points = SIGNAL_PERIOD.min(n);

    // Oldest first: the most truncated slice comes first, the full series last.
    let history: Vec<Decimal> = (0..points)
        .rev()
        .map(|i| macd_line(&series[..n - i]))
        .collect();

    Macd {
        macd: macd_line(series),
        signal: ema(&history, SIGNAL_PERIOD),
    }
}

fn macd_line(series: &[Decimal]) -> Decimal {
    ema(series, FAST_PERIOD) - ema(series, SLOW_PERIOD)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, mean, DEFAULT_EPSILON};
    use rust_decimal_macros::dec;

    fn ramp(n: usize) -> Vec<Decimal> {
        (0..n).map(|i| dec!(100) + Decimal::from(i as u64)).collect()
    }

    #[test]
    fn macd_too_short_is_zero() {
        assert_eq!(macd(&ramp(25)), Macd::default());
        assert_eq!(macd(&[]), Macd::default());
    }

    #[test]
    fn macd_flat_series_is_zero() {
        let flat = vec![dec!(50); 40];
        let m = macd(&flat);
        assert_approx(m.macd, Decimal::ZERO, DEFAULT_EPSILON);
        assert_approx(m.signal, Decimal::ZERO, DEFAULT_EPSILON);
    }

    #[test]
    fn macd_rising_series_is_positive() {
        let m = macd(&ramp(60));
        assert!(m.macd > Decimal::ZERO);
        assert!(m.signal > Decimal::ZERO);
    }

    #[test]
    fn macd_line_uses_full_series() {
        let s = ramp(40);
        let m = macd(&s);
        assert_eq!(m.macd, ema(&s, 12) - ema(&s, 26));
    }

    #[test]
    fn signal_is_mean_of_nine_truncated_values() {
        // Exactly nine history points, so EMA(9) reduces to their mean.
        let s = ramp(50);
        let expected: Vec<Decimal> = (0..9)
            .map(|i| {
                let t = &s[..s.len() - i];
                ema(t, 12) - ema(t, 26)
            })
            .collect();
        assert_approx(macd(&s).signal, mean(&expected), DEFAULT_EPSILON);
    }

    #[test]
    fn short_truncations_fall_back_to_fast_ema() {
        // With 26 points every truncated slice is below the slow period,
        // so each historical value is EMA(12) of that slice.
        let s = ramp(26);
        let mut expected = vec![ema(&s, 12) - ema(&s, 26)];
        for i in 1..9 {
            expected.push(ema(&s[..26 - i], 12));
        }
        assert_approx(macd(&s).signal, mean(&expected), DEFAULT_EPSILON);
    }

    #[test]
    fn histogram_is_difference() {
        let m = Macd {
            macd: dec!(1.5),
            signal: dec!(0.5),
        };
        assert_eq!(m.histogram(), dec!(1.0));
    }
}
