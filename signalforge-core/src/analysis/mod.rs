//! Market regime analysis: volatility, trend, and the adaptive interval selector.

pub mod interval_selector;
pub mod trend;
pub mod volatility;

pub use interval_selector::{
    analyze_interval, choose_timeframe, select_interval, IntervalAnalysis, IntervalSelection,
    SelectionFallback, BASELINE_POINTS, BASELINE_TIMEFRAME,
};
pub use trend::{classify_slope, trend, trend_slope, TREND_DEADBAND};
pub use volatility::{simple_returns, volatility};
