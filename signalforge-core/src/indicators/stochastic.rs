//! Stochastic oscillator (%K / %D) over a close series.
//!
//! %K = (last close - window min) / (window max - window min) * 100 over the
//! most recent `k_period` points.
//! %D = mean of up to `d_period` trailing %K values, each recomputed by sliding
//! the window back one point at a time; stops early once fewer than `k_period`
//! points remain. O(k_period * d_period).
//!
//! Edge cases:
//! - fewer than `k_period` points → (0, 0)
//! - flat window (max == min) → %K = 0

use super::stats::mean;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Stochastic {
    pub k: Decimal,
    pub d: Decimal,
}

pub fn stochastic(series: &[Decimal], k_period: usize, d_period: usize) -> Stochastic {
    let n = series.len();
    if k_period == 0 || n < k_period {
        return Stochastic::default();
    }

    let mut ks = Vec::with_capacity(d_period.max(1));
    ks.push(percent_k(&series[n - k_period..]));

    for offset in 1..d_period {
        let end = n - offset;
        if end < k_period {
            break;
        }
        ks.push(percent_k(&series[end - k_period..end]));
    }

    let used = ks.len().min(d_period);
    Stochastic {
        k: ks[0],
        d: mean(&ks[..used]),
    }
}

/// %K of a window whose last element is the close being measured.
fn percent_k(window: &[Decimal]) -> Decimal {
    let Some(&close) = window.last() else {
        return Decimal::ZERO;
    };
    let (Some(&max), Some(&min)) = (window.iter().max(), window.iter().min()) else {
        return Decimal::ZERO;
    };

    let range = max - min;
    if range.is_zero() {
        return Decimal::ZERO;
    }
    (close - min) / range * dec!(100)
}
