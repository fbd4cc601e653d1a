//! Bollinger Bands: mean +/- standard deviation multiplier.
//!
//! Computed over the FIRST `period` points of the series:
//! - Middle: simple mean of the window
//! - Upper: middle + multiplier * stddev
//! - Lower: middle - multiplier * stddev
//!
//! Uses population stddev (divide by N). Callers that want the latest window
//! pass a slice of exactly `period` points.
//! Fewer than `period` points → (0, 0, 0).

use super::stats::{mean, population_std_dev};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BollingerBands {
    pub upper: Decimal,
    pub lower: Decimal,
    pub middle: Decimal,
}

impl BollingerBands {
    pub fn width(&self) -> Decimal {
        self.upper - self.lower
    }
}

pub fn bollinger(series: &[Decimal], period: usize, multiplier: Decimal) -> BollingerBands {
    if period == 0 || series.len() < period {
        return BollingerBands::default();
    }

    let window = &series[..period];
    let middle = mean(window);
    let offset = population_std_dev(window) * multiplier;

    BollingerBands {
        upper: middle + offset,
        lower: middle - offset,
        middle,
    }
}
