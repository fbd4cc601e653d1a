//! Domain types for signalforge

pub mod action;
pub mod interval;
pub mod occurrence;
pub mod trend;

pub use action::TradingAction;
pub use interval::{IntervalChoice, ParseIntervalError, Timeframe};
pub use occurrence::TradeOccurrence;
pub use trend::TrendDirection;
