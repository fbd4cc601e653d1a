//! Narrow interfaces to the subsystems around the core: market data, the
//! occurrence log, and the execution backend.

pub mod execution;
pub mod market_data;
pub mod occurrence_log;

pub use execution::{ExecutionBackend, ExecutionError, ExecutionReport};
pub use market_data::{expect_len, DataError, MarketDataProvider};
pub use occurrence_log::{OccurrenceLog, OccurrenceLogError};
