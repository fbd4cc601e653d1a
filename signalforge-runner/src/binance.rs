//! Binance spot market data provider.
//!
//! Uses the public REST endpoints, no API key:
//! - `GET /api/v3/ping` for the connectivity check
//! - `GET /api/v3/ticker/price?symbol=` for the latest price
//! - `GET /api/v3/klines?symbol=&interval=&limit=` for candles
//!
//! Each call is a single request; retries are the cycle's concern.

use std::str::FromStr;
use std::time::Duration;

use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::Value;
use signalforge_core::collaborators::{expect_len, DataError, MarketDataProvider};
use signalforge_core::domain::Timeframe;

pub const DEFAULT_BASE_URL: &str = "https://api.binance.com";

/// Exchange-side cap on candles per klines request.
pub const MAX_KLINES: usize = 1000;

/// Column offsets inside one kline array.
const CLOSE_COLUMN: usize = 4;
const VOLUME_COLUMN: usize = 5;

/// Binance error code for an unknown symbol.
const INVALID_SYMBOL_CODE: i64 = -1121;

#[derive(Debug, Deserialize)]
struct TickerPrice {
    price: String,
}

#[derive(Debug, Deserialize)]
struct ApiError {
    code: i64,
    msg: String,
}

pub struct BinanceProvider {
    client: reqwest::blocking::Client,
    base_url: String,
}

impl BinanceProvider {
    pub fn new() -> Result<Self, DataError> {
        Self::with_base_url(DEFAULT_BASE_URL)
    }

    /// Point the provider at another host (testnet, mirror).
    pub fn with_base_url(base_url: impl Into<String>) -> Result<Self, DataError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(15))
            .user_agent(concat!("signalforge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| DataError::Other(format!("failed to build HTTP client: {e}")))?;
        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    fn klines_url(&self, symbol: &str, timeframe: Timeframe, limit: usize) -> String {
        self.url(&format!(
            "/api/v3/klines?symbol={symbol}&interval={}&limit={limit}",
            timeframe.as_str()
        ))
    }

    /// Issue one GET and map HTTP failures onto `DataError`.
    fn get(&self, symbol: &str, url: &str) -> Result<reqwest::blocking::Response, DataError> {
        let resp = self.client.get(url).send().map_err(|e| {
            if e.is_connect() || e.is_timeout() {
                DataError::NetworkUnreachable(e.to_string())
            } else {
                DataError::Other(e.to_string())
            }
        })?;

        let status = resp.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS
            || status == reqwest::StatusCode::IM_A_TEAPOT
        {
            let retry_after = resp
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse::<u64>().ok())
                .unwrap_or(60);
            return Err(DataError::RateLimited {
                retry_after_secs: retry_after,
            });
        }
        if status == reqwest::StatusCode::BAD_REQUEST {
            let body = resp.text().unwrap_or_default();
            return Err(match serde_json::from_str::<ApiError>(&body) {
                Ok(err) if err.code == INVALID_SYMBOL_CODE => DataError::SymbolNotFound {
                    symbol: symbol.to_string(),
                },
                Ok(err) => DataError::Other(format!("binance error {}: {}", err.code, err.msg)),
                Err(_) => DataError::Other(format!("HTTP {status} for {symbol}")),
            });
        }
        if !status.is_success() {
            return Err(DataError::Other(format!("HTTP {status} for {symbol}")));
        }
        Ok(resp)
    }

    fn fetch_column(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
        column: usize,
    ) -> Result<Vec<Decimal>, DataError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        if limit > MAX_KLINES {
            return Err(DataError::Other(format!(
                "klines limit {limit} exceeds exchange maximum {MAX_KLINES}"
            )));
        }
        let rows: Vec<Vec<Value>> = self
            .get(symbol, &self.klines_url(symbol, timeframe, limit))?
            .json()
            .map_err(|e| {
                DataError::ResponseFormatChanged(format!("klines for {symbol}: {e}"))
            })?;
        let values = parse_kline_column(&rows, column)?;
        expect_len(values, limit)
    }
}

impl MarketDataProvider for BinanceProvider {
    fn name(&self) -> &str {
        "binance"
    }

    fn current_price(&self, symbol: &str) -> Result<Decimal, DataError> {
        let url = self.url(&format!("/api/v3/ticker/price?symbol={symbol}"));
        let ticker: TickerPrice = self.get(symbol, &url)?.json().map_err(|e| {
            DataError::ResponseFormatChanged(format!("ticker price for {symbol}: {e}"))
        })?;
        parse_decimal(&ticker.price)
    }

    fn historical_closes(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Decimal>, DataError> {
        self.fetch_column(symbol, timeframe, limit, CLOSE_COLUMN)
    }

    fn volumes(
        &self,
        symbol: &str,
        timeframe: Timeframe,
        limit: usize,
    ) -> Result<Vec<Decimal>, DataError> {
        self.fetch_column(symbol, timeframe, limit, VOLUME_COLUMN)
    }

    fn is_available(&self) -> bool {
        self.client
            .get(self.url("/api/v3/ping"))
            .send()
            .map(|resp| resp.status().is_success())
            .unwrap_or(false)
    }
}

/// Extract one numeric column from kline rows. Binance sends prices and
/// volumes as decimal strings.
fn parse_kline_column(rows: &[Vec<Value>], column: usize) -> Result<Vec<Decimal>, DataError> {
    rows.iter()
        .map(|row| match row.get(column) {
            Some(Value::String(s)) => parse_decimal(s),
            Some(Value::Number(n)) => parse_decimal(&n.to_string()),
            other => Err(DataError::ResponseFormatChanged(format!(
                "kline column {column} missing or not numeric: {other:?}"
            ))),
        })
        .collect()
}

fn parse_decimal(text: &str) -> Result<Decimal, DataError> {
    Decimal::from_str(text)
        .map_err(|e| DataError::ResponseFormatChanged(format!("bad decimal '{text}': {e}")))
}
