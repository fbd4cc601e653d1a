//! Market data provider trait and structured error types.
//!
//! The trait abstracts over data sources (exchange REST API, CSV import,
//! synthetic random walk) so the orchestrator can swap them and tests can mock
//! them. The core never calls a provider; the runner does.

use crate::domain::Timeframe;
use rust_decimal::Decimal;
use thiserror::Error;

/// Structured error types for market data operations.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("network unreachable: {0}")]
    NetworkUnreachable(String),

    #[error("rate limited by provider (retry after {retry_after_secs}s)")]
    RateLimited { retry_after_secs: u64 },

    #[error("response format changed: {0}")]
    ResponseFormatChanged(String),

    #[error("symbol not found: {symbol}")]
    SymbolNotFound { symbol: String },

    #[error("requested {requested} points, provider returned {returned}")]
    ShortSeries { requested: usize, returned: usize },

    #[error("data error: {0}")]
    Other(String),
}

impl DataError {
    /// Whether retrying the same call later can succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            Self::NetworkUnreachable(_) | Self::RateLimited { .. } | Self::Other(_)
        )
    }
}

/// Source of prices and volumes for one symbol.
///
/// Series are chronological, oldest first, and contain exactly `limit` points;
/// a provider that cannot deliver that many fails with
/// [`DataError::ShortSeries`] instead of returning a shorter series.
pub trait MarketDataProvider: Send + Sync {
    /// Human-readable name of this provider.
    fn name(&self) -> &str;

    /// Latest traded price.
    fn current_price(&self, symbol: &str) -> Result<Decimal, DataError>;

    /// The last `limit` candle closes at `timeframe`.
    fn historical_closes(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Decimal>, DataError>;

    /// The last `limit` candle volumes at `timeframe`.
    fn volumes(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Decimal>, DataError>;

    /// Connectivity check. Cycles are skipped while this is false.
    fn is_available(&self) -> bool {
        true
    }
}

/// Enforce the exact-length contract on a provider response.
pub fn expect_len(series: Vec<Decimal>, requested: usize) -> Result<Vec<Decimal>, DataError> {
    if series.len() == requested {
        Ok(series)
    } else {
        Err(DataError::ShortSeries {
            requested,
            returned: series.len(),
        })
    }
}
