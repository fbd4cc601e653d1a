//! Indicator library.
//!
//! Pure, stateless functions over a chronological price (or volume) series,
//! oldest first. Each function owns its sufficiency guard: callers never
//! pre-validate. A series too short for the requested period yields a neutral
//! value (zero, or a zeroed band/pair), because "not enough data yet" is a normal
//! runtime condition for a bot that just started.
//!
//! The one exception is [`rsi`], which signals [`IndicatorError::InsufficientData`]
//! when handed a non-empty series shorter than its period.
//!
//! Flat windows are normal market conditions too: every zero denominator maps
//! to a documented sentinel instead of a panic.

pub mod bollinger;
pub mod ema;
pub mod macd;
pub mod rsi;
pub mod snapshot;
pub mod stats;
pub mod stochastic;

pub use bollinger::{bollinger, BollingerBands};
pub use ema::ema;
pub use macd::{macd, Macd};
pub use rsi::rsi;
pub use snapshot::IndicatorSnapshot;
pub use stats::{mean, population_std_dev, tail};
pub use stochastic::{stochastic, Stochastic};

use thiserror::Error;

/// Caller-contract violations raised by the indicator library.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IndicatorError {
    #[error("{indicator} needs at least {required} points, got {actual}")]
    InsufficientData {
        indicator: &'static str,
        required: usize,
        actual: usize,
    },

    #[error("{indicator} period must be >= 1")]
    InvalidPeriod { indicator: &'static str },
}

/// Build a Decimal series from float literals for tests.
#[cfg(test)]
pub fn series(values: &[f64]) -> Vec<rust_decimal::Decimal> {
    use rust_decimal::prelude::FromPrimitive;
    values
        .iter()
        .map(|&v| rust_decimal::Decimal::from_f64(v).unwrap())
        .collect()
}

/// Assert two Decimal values are approximately equal (within epsilon).
#[cfg(test)]
pub fn assert_approx(
    actual: rust_decimal::Decimal,
    expected: rust_decimal::Decimal,
    epsilon: rust_decimal::Decimal,
) {
    assert!(
        (actual - expected).abs() < epsilon,
        "assert_approx failed: actual={actual}, expected={expected}, diff={}, epsilon={epsilon}",
        (actual - expected).abs()
    );
}

/// Default epsilon for indicator tests.
#[cfg(test)]
pub const DEFAULT_EPSILON: rust_decimal::Decimal = rust_decimal_macros::dec!(0.000000001);
