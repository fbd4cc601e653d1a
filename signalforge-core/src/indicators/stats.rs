//! Shared statistics: simple mean, population standard deviation, series tails.

use rust_decimal::Decimal;
use rust_decimal::MathematicalOps;

/// Arithmetic mean. Empty series → 0.
///
/// When the running sum would leave `Decimal` range, each point is divided by
/// the length first.
pub fn mean(series: &[Decimal]) -> Decimal {
    if series.is_empty() {
        return Decimal::ZERO;
    }
    let n = Decimal::from(series.len() as u64);
    match series
        .iter()
        .try_fold(Decimal::ZERO, |acc, &v| acc.checked_add(v))
    {
        Some(sum) => sum / n,
        None => series.iter().map(|&v| v / n).sum(),
    }
}

/// Population standard deviation (divide by N). Empty series → 0.
///
/// Squared deviations of large values (volumes above ~1e14) overflow
/// `Decimal`; those windows are computed on deviations scaled by the largest
/// one, which keeps every square within `[0, 1]`.
pub fn population_std_dev(series: &[Decimal]) -> Decimal {
    if series.is_empty() {
        return Decimal::ZERO;
    }
    let m = mean(series);
    let n = Decimal::from(series.len() as u64);
    let exact = series.iter().try_fold(Decimal::ZERO, |acc, &v| {
        let diff = v.checked_sub(m)?;
        acc.checked_add(diff.checked_mul(diff)?)
    });
    match exact {
        Some(sum) => (sum / n).sqrt().unwrap_or(Decimal::ZERO),
        None => scaled_std_dev(series, m, n),
    }
}

fn scaled_std_dev(series: &[Decimal], m: Decimal, n: Decimal) -> Decimal {
    let scale = series
        .iter()
        .map(|&v| v.saturating_sub(m).abs())
        .max()
        .unwrap_or(Decimal::ZERO);
    if scale.is_zero() {
        return Decimal::ZERO;
    }
    let variance = series
        .iter()
        .map(|&v| {
            let ratio = v.saturating_sub(m) / scale;
            ratio * ratio
        })
        .sum::<Decimal>()
        / n;
    variance
        .sqrt()
        .map_or(Decimal::ZERO, |sigma| sigma.saturating_mul(scale))
}

/// The most recent `n` points of a series (the whole series if shorter).
pub fn tail(series: &[Decimal], n: usize) -> &[Decimal] {
    &series[series.len().saturating_sub(n)..]
}
