//! Per-cycle indicator bundle.
//!
//! Each indicator sees only the most recent slice of closes its parameters ask
//! for: RSI over the last `rsi_window` points, Bollinger over the last
//! `bollinger_period`, MACD over the last `macd_window`, Stochastic over the
//! last `stochastic_window`. Fetching once and slicing keeps the windows
//! consistent with each other within a cycle.

use super::{bollinger, macd, rsi, stochastic, tail, BollingerBands, IndicatorError, Macd, Stochastic};
use crate::config::IndicatorParams;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub rsi: Decimal,
    pub bands: BollingerBands,
    pub macd: Macd,
    pub stochastic: Stochastic,
}

impl IndicatorSnapshot {
    /// Compute every indicator from one chronological close series.
    ///
    /// Fails only when RSI does (a non-empty window shorter than its period).
    pub fn compute(closes: &[Decimal], params: &IndicatorParams) -> Result<Self, IndicatorError> {
        let rsi = rsi(tail(closes, params.rsi_window), params.rsi_period)?;
        let bands = bollinger(
            tail(closes, params.bollinger_period),
            params.bollinger_period,
            params.bollinger_multiplier,
        );
        let macd = macd(tail(closes, params.macd_window));
        let stochastic = stochastic(
            tail(closes, params.stochastic_window),
            params.stochastic_k,
            params.stochastic_d,
        );
        Ok(Self {
            rsi,
            bands,
            macd,
            stochastic,
        })
    }
}
