//! SignalForge Runner: decision cycles, the polling loop, and collaborators.
//!
//! This crate builds on `signalforge-core` to provide:
//! - One-shot decision cycles with retry around market-data calls
//! - A cancellable polling loop with a bounded report history
//! - Market data providers: Binance REST, CSV files, synthetic random walk
//! - JSONL and in-memory occurrence logs with keep-last-N retention
//! - Paper trading execution
//! - CSV/JSON export of occurrences and cycle reports

pub mod binance;
pub mod bot;
pub mod csv_provider;
pub mod cycle;
pub mod export;
pub mod history;
pub mod paper;
pub mod retry;
pub mod ring;
pub mod synthetic;

pub use binance::BinanceProvider;
pub use bot::{Bot, CycleOutcome, RunSummary};
pub use csv_provider::CsvProvider;
pub use cycle::{CycleError, CycleReport, DecisionCycle, MarketView};
pub use export::{export_occurrences_csv, export_reports_csv, export_reports_json};
pub use history::{read_occurrences, JsonlOccurrenceLog, MemoryOccurrenceLog};
pub use paper::PaperExecution;
pub use retry::{RetryPolicy, Retryable};
pub use ring::BoundedRing;
pub use synthetic::SyntheticProvider;
