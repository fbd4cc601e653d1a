//! Return volatility: population standard deviation of simple returns.

use crate::indicators::population_std_dev;
use rust_decimal::Decimal;

/// Period-over-period simple returns `(p[i] - p[i-1]) / p[i-1]`.
///
/// Steps whose prior price is zero are skipped.
pub fn simple_returns(prices: &[Decimal]) -> Vec<Decimal> {
    prices
        .windows(2)
        .filter(|pair| !pair[0].is_zero())
        .map(|pair| (pair[1] - pair[0]) / pair[0])
        .collect()
}

/// Volatility of a price window. No valid returns → 0.
pub fn volatility(prices: &[Decimal]) -> Decimal {
    let returns = simple_returns(prices);
    if returns.is_empty() {
        return Decimal::ZERO;
    }
    population_std_dev(&returns)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::indicators::{assert_approx, series, DEFAULT_EPSILON};
    use rust_decimal_macros::dec;

    #[test]
    fn constant_growth_has_zero_volatility() {
        // Every return is exactly +10%.
        let s = series(&[100.0, 110.0, 121.0, 133.1]);
        assert_approx(volatility(&s), Decimal::ZERO, DEFAULT_EPSILON);
    }

    #[test]
    fn alternating_returns() {
        // Returns: +10%, -10% → mean 0, σ = 0.1
        let s = series(&[100.0, 110.0, 99.0]);
        assert_approx(volatility(&s), dec!(0.1), DEFAULT_EPSILON);
    }

    #[test]
    fn zero_prior_price_is_skipped() {
        let s = series(&[0.0, 50.0, 55.0]);
        assert_eq!(simple_returns(&s), vec![dec!(0.1)]);
        assert_eq!(volatility(&s), Decimal::ZERO);
    }

    #[test]
    fn no_returns_is_zero() {
        assert_eq!(volatility(&[]), Decimal::ZERO);
        assert_eq!(volatility(&[dec!(5)]), Decimal::ZERO);
        assert_eq!(volatility(&[dec!(0), dec!(0), dec!(0)]), Decimal::ZERO);
    }
}
