//! Exponential Moving Average (EMA).
//!
//! alpha = 2 / (period + 1)
//! Seed: simple mean of the first `period` values.
//! Recursive from index `period`: EMA = price * alpha + EMA * (1 - alpha).
//! Fewer than `period` points → 0.

use super::stats::mean;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

/// EMA of the whole series, returned as the final smoothed value.
pub fn ema(series: &[Decimal], period: usize) -> Decimal {
    if period == 0 || series.len() < period {
        return Decimal::ZERO;
    }

    let alpha = dec!(2) / Decimal::from(period as u64 + 1);
    let one_minus_alpha = Decimal::ONE - alpha;

    let mut value = mean(&series[..period]);
    for &price in &series[period..] {
        value = price * alpha + value * one_minus_alpha;
    }
    value
}
