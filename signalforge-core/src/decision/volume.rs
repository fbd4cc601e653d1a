//! One-sigma volume spike test.

use crate::indicators::{mean, population_std_dev};
use rust_decimal::Decimal;

/// True when the latest volume exceeds `mean + σ` of the window (the latest
/// volume included). An empty window never spikes.
pub fn volume_spike(volumes: &[Decimal]) -> bool {
    let Some(&latest) = volumes.last() else {
        return false;
    };
    latest > mean(volumes).saturating_add(population_std_dev(volumes))
}
