//! Synthetic market data for offline runs and tests.
//!
//! A seeded random walk from a starting price of 100. The seed is the BLAKE3
//! hash of `symbol/timeframe`, so every symbol and timeframe has its own
//! reproducible history. Clearly fake; never use it to judge a strategy.

use std::sync::atomic::{AtomicUsize, Ordering};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use signalforge_core::collaborators::{DataError, MarketDataProvider};
use signalforge_core::domain::Timeframe;

/// Timeframe whose walk supplies `current_price`.
const TICKER_TIMEFRAME: Timeframe = Timeframe::OneMinute;

#[derive(Debug, Default)]
pub struct SyntheticProvider {
    /// Candles appended to every walk since construction.
    elapsed: AtomicUsize,
    advancing: bool,
}

impl SyntheticProvider {
    /// A frozen market: every query sees the same history.
    pub fn new() -> Self {
        Self::default()
    }

    /// A moving market: each `current_price` call appends one candle to every
    /// walk, so consecutive cycles see fresh data.
    pub fn advancing() -> Self {
        Self {
            elapsed: AtomicUsize::new(0),
            advancing: true,
        }
    }

    fn walk(&self, symbol: &str, timeframe: Timeframe, limit: usize) -> Vec<Candle> {
        let total = limit + self.elapsed.load(Ordering::Relaxed);
        let mut candles = generate_walk(symbol, timeframe, total);
        candles.drain(..total - limit);
        candles
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct Candle {
    close: Decimal,
    volume: Decimal,
}

/// Deterministic random walk of `len` candles for one symbol and timeframe.
fn generate_walk(symbol: &str, timeframe: Timeframe, len: usize) -> Vec<Candle> {
    let seed_bytes = blake3::hash(format!("{symbol}/{timeframe}").as_bytes());
    let seed: [u8; 32] = *seed_bytes.as_bytes();
    let mut rng = StdRng::from_seed(seed);

    let mut price = dec!(100);
    let mut candles = Vec::with_capacity(len);
    for _ in 0..len {
        // Return in basis points, ±3%.
        let step_bp: i64 = rng.gen_range(-300..=300);
        price += price * Decimal::new(step_bp, 4);
        price = price.round_dp(8).max(dec!(0.01));
        let volume = Decimal::from(rng.gen_range(500..20_000u64));
        candles.push(Candle {
            close: price,
            volume,
        });
    }
    candles
}

impl MarketDataProvider for SyntheticProvider {
    fn name(&self) -> &str {
        "synthetic"
    }

    fn current_price(&self, symbol: &str) -> Result<Decimal, DataError> {
        if self.advancing {
            self.elapsed.fetch_add(1, Ordering::Relaxed);
        }
        self.walk(symbol, TICKER_TIMEFRAME, 1)
            .last()
            .map(|c| c.close)
            .ok_or_else(|| DataError::Other("empty synthetic walk".into()))
    }

    fn historical_closes(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Decimal>, DataError> {
        Ok(self
            .walk(symbol, timeframe, limit)
            .into_iter()
            .map(|c| c.close)
            .collect())
    }

    fn volumes(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Decimal>, DataError> {
        Ok(self
            .walk(symbol, timeframe, limit)
            .into_iter()
            .map(|c| c.volume)
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_symbol_same_history() {
        let provider = SyntheticProvider::new();
        let a = provider
            .historical_closes("BTCUSDT", Timeframe::OneHour, 100)
            .unwrap();
        let b = provider
            .historical_closes("BTCUSDT", Timeframe::OneHour, 100)
            .unwrap();
        assert_eq!(a, b);
        assert_eq!(a.len(), 100);
    }

    #[test]
    fn symbols_and_timeframes_diverge() {
        let provider = SyntheticProvider::new();
        let btc = provider
            .historical_closes("BTCUSDT", Timeframe::OneHour, 50)
            .unwrap();
        let eth = provider
            .historical_closes("ETHUSDT", Timeframe::OneHour, 50)
            .unwrap();
        let btc_15m = provider
            .historical_closes("BTCUSDT", Timeframe::FifteenMinutes, 50)
            .unwrap();
        assert_ne!(btc, eth);
        assert_ne!(btc, btc_15m);
    }

    #[test]
    fn prices_stay_positive() {
        let provider = SyntheticProvider::new();
        let closes = provider
            .historical_closes("DOGEUSDT", Timeframe::OneMinute, 1000)
            .unwrap();
        assert!(closes.iter().all(|c| *c > Decimal::ZERO));
    }

    #[test]
    fn frozen_market_repeats_price() {
        let provider = SyntheticProvider::new();
        assert_eq!(
            provider.current_price("BTCUSDT").unwrap(),
            provider.current_price("BTCUSDT").unwrap()
        );
    }

    #[test]
    fn advancing_market_shifts_window_by_one() {
        let provider = SyntheticProvider::advancing();
        let before = provider
            .historical_closes("BTCUSDT", Timeframe::OneHour, 10)
            .unwrap();
        provider.current_price("BTCUSDT").unwrap();
        let after = provider
            .historical_closes("BTCUSDT", Timeframe::OneHour, 10)
            .unwrap();
        assert_eq!(before[1..], after[..9]);
    }
}
