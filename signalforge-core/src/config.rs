//! Trading configuration.
//!
//! Loaded from a TOML file and handed to the core as plain values. Every
//! section has defaults, so a file only needs the keys it overrides:
//!
//! ```toml
//! symbol = "BTCUSDT"
//! interval = "auto"        # or 15m, 1h, ...
//! stop_loss_pct = 5
//! take_profit_pct = 10
//! buy_rsi = 30
//! sell_rsi = 70
//! use_bollinger = true
//!
//! [indicators]
//! rsi_period = 14
//! ```
//!
//! The camelCase spellings (`stopLossPct`, `takeProfitPct`, `buyRsi`,
//! `sellRsi`) are accepted as aliases.

use crate::domain::IntervalChoice;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("parse config TOML: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("serialize config TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    #[error("invalid config: {0}")]
    Invalid(String),
}

/// Complete bot configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TradingConfig {
    /// Exchange symbol, e.g. `BTCUSDT`.
    pub symbol: String,
    /// Analysis interval, or `auto` for the adaptive selector.
    pub interval: IntervalChoice,
    /// Stop-loss distance in percent. The sign is ignored.
    #[serde(alias = "stopLossPct")]
    pub stop_loss_pct: i32,
    /// Take-profit distance in percent.
    #[serde(alias = "takeProfitPct")]
    pub take_profit_pct: i32,
    /// Buy when RSI falls below this value.
    #[serde(alias = "buyRsi")]
    pub buy_rsi: i32,
    /// Relative take-profit requires RSI above this value.
    #[serde(alias = "sellRsi")]
    pub sell_rsi: i32,
    /// Gate Buy on the lower Bollinger band and a volume spike, and enable the
    /// relative take-profit row. When false, Buy depends on RSI alone.
    pub use_bollinger: bool,
    /// Seconds between decision cycles.
    pub run_interval_secs: u64,
    pub indicators: IndicatorParams,
    pub history: HistoryConfig,
    pub retry: RetryConfig,
}

impl Default for TradingConfig {
    fn default() -> Self {
        Self {
            symbol: "BTCUSDT".to_string(),
            interval: IntervalChoice::Automatic,
            stop_loss_pct: 5,
            take_profit_pct: 10,
            buy_rsi: 30,
            sell_rsi: 70,
            use_bollinger: true,
            run_interval_secs: 60,
            indicators: IndicatorParams::default(),
            history: HistoryConfig::default(),
            retry: RetryConfig::default(),
        }
    }
}

/// Periods and fetch windows for the per-cycle indicator snapshot.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct IndicatorParams {
    pub rsi_period: usize,
    /// Number of closes handed to RSI.
    pub rsi_window: usize,
    /// Bollinger period; the bands are computed over the latest `bollinger_period` closes.
    pub bollinger_period: usize,
    pub bollinger_multiplier: Decimal,
    pub stochastic_k: usize,
    pub stochastic_d: usize,
    /// Number of closes handed to the stochastic oscillator.
    pub stochastic_window: usize,
    /// Number of closes handed to MACD.
    pub macd_window: usize,
    /// Number of volume points used for the spike test.
    pub volume_window: usize,
}

impl Default for IndicatorParams {
    fn default() -> Self {
        Self {
            rsi_period: 14,
            rsi_window: 14,
            bollinger_period: 20,
            bollinger_multiplier: dec!(2),
            stochastic_k: 14,
            stochastic_d: 3,
            stochastic_window: 20,
            macd_window: 50,
            volume_window: 50,
        }
    }
}

impl IndicatorParams {
    /// How many closes a cycle must fetch to feed every indicator.
    pub fn closes_needed(&self) -> usize {
        self.rsi_window
            .max(self.bollinger_period)
            .max(self.stochastic_window)
            .max(self.macd_window)
    }
}

/// Occurrence log location and in-memory retention.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct HistoryConfig {
    /// JSONL file of executed trades.
    pub path: PathBuf,
    /// Number of occurrences kept in memory (keep-last-N).
    pub capacity: usize,
    /// Number of cycle reports kept in memory (keep-last-N).
    pub report_capacity: usize,
}

impl Default for HistoryConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("data/occurrences.jsonl"),
            capacity: 100,
            report_capacity: 100,
        }
    }
}

/// Retry policy around market-data calls.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    /// Delay before retry `n` is `base_delay_ms * n`.
    pub base_delay_ms: u64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay_ms: 1000,
        }
    }
}

impl TradingConfig {
    /// Load and validate a config from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&content)
    }

    /// Parse and validate a config from a TOML string.
    pub fn from_toml(content: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check ranges that would otherwise surface as failures mid-cycle.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.symbol.trim().is_empty() {
            return Err(ConfigError::Invalid("symbol must not be empty".into()));
        }
        for (name, value) in [("buy_rsi", self.buy_rsi), ("sell_rsi", self.sell_rsi)] {
            if !(0..=100).contains(&value) {
                return Err(ConfigError::Invalid(format!(
                    "{name} must be within 0..=100, got {value}"
                )));
            }
        }
        if self.take_profit_pct < 0 {
            return Err(ConfigError::Invalid(format!(
                "take_profit_pct must be >= 0, got {}",
                self.take_profit_pct
            )));
        }
        if self.run_interval_secs == 0 {
            return Err(ConfigError::Invalid("run_interval_secs must be >= 1".into()));
        }

        let ind = &self.indicators;
        for (name, value) in [
            ("rsi_period", ind.rsi_period),
            ("bollinger_period", ind.bollinger_period),
            ("stochastic_k", ind.stochastic_k),
            ("stochastic_d", ind.stochastic_d),
            ("volume_window", ind.volume_window),
        ] {
            if value == 0 {
                return Err(ConfigError::Invalid(format!("indicators.{name} must be >= 1")));
            }
        }
        if ind.rsi_window < ind.rsi_period {
            return Err(ConfigError::Invalid(format!(
                "indicators.rsi_window ({}) must be >= rsi_period ({})",
                ind.rsi_window, ind.rsi_period
            )));
        }
        if ind.bollinger_multiplier.is_sign_negative() {
            return Err(ConfigError::Invalid(
                "indicators.bollinger_multiplier must be >= 0".into(),
            ));
        }

        if self.history.capacity == 0 || self.history.report_capacity == 0 {
            return Err(ConfigError::Invalid("history capacities must be >= 1".into()));
        }
        if self.retry.max_attempts == 0 {
            return Err(ConfigError::Invalid("retry.max_attempts must be >= 1".into()));
        }
        Ok(())
    }

    /// Deterministic BLAKE3 hash of the full configuration.
    ///
    /// Logged at startup so every occurrence log can be tied to the exact
    /// parameters that produced it.
    pub fn fingerprint(&self) -> String {
        let json = serde_json::to_string(self).expect("TradingConfig must serialize");
        blake3::hash(json.as_bytes()).to_hex().to_string()
    }
}
