//! SignalForge Core: indicators, interval selection, and the trading decision.
//!
//! This crate is the pure decision-making half of the bot:
//! - Domain types (timeframes, trading actions, trade occurrences)
//! - Indicator library over `Decimal` price series
//! - Volatility/trend analysis and the adaptive interval selector
//! - Priority-ordered Buy/Sell/Keep decision engine
//! - Collaborator traits for market data, the occurrence log, and execution
//!
//! Nothing here performs I/O; the runner crate drives collaborators.

pub mod analysis;
pub mod collaborators;
pub mod config;
pub mod decision;
pub mod domain;
pub mod indicators;

#[cfg(test)]
mod tests {
    use super::*;

    /// Compile-time check: all core types are Send + Sync.
    ///
    /// The runner moves these across its worker and cancellation boundaries.
    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        // Domain types
        require_send::<domain::TradingAction>();
        require_sync::<domain::TradingAction>();
        require_send::<domain::Timeframe>();
        require_sync::<domain::Timeframe>();
        require_send::<domain::IntervalChoice>();
        require_sync::<domain::IntervalChoice>();
        require_send::<domain::TradeOccurrence>();
        require_sync::<domain::TradeOccurrence>();
        require_send::<domain::TrendDirection>();
        require_sync::<domain::TrendDirection>();

        // Indicator results
        require_send::<indicators::BollingerBands>();
        require_sync::<indicators::BollingerBands>();
        require_send::<indicators::Macd>();
        require_sync::<indicators::Macd>();
        require_send::<indicators::Stochastic>();
        require_sync::<indicators::Stochastic>();
        require_send::<indicators::IndicatorSnapshot>();
        require_sync::<indicators::IndicatorSnapshot>();
        require_send::<indicators::IndicatorError>();
        require_sync::<indicators::IndicatorError>();

        // Analysis
        require_send::<analysis::IntervalAnalysis>();
        require_sync::<analysis::IntervalAnalysis>();
        require_send::<analysis::IntervalSelection>();
        require_sync::<analysis::IntervalSelection>();

        // Decision
        require_send::<decision::DecisionEngine>();
        require_sync::<decision::DecisionEngine>();
        require_send::<decision::Decision>();
        require_sync::<decision::Decision>();
        require_send::<decision::DecisionInputs<'static>>();
        require_sync::<decision::DecisionInputs<'static>>();

        // Config
        require_send::<config::TradingConfig>();
        require_sync::<config::TradingConfig>();

        // Errors
        require_send::<collaborators::DataError>();
        require_sync::<collaborators::DataError>();
        require_send::<collaborators::OccurrenceLogError>();
        require_sync::<collaborators::OccurrenceLogError>();
        require_send::<collaborators::ExecutionError>();
        require_sync::<collaborators::ExecutionError>();
    }

    /// Architecture contract: the decision engine never sees a provider or an
    /// execution backend. Its only collaborator is the occurrence log, read
    /// through `last_occurrence()`.
    #[test]
    fn decision_engine_only_reads_occurrence_log() {
        fn _check_signature(
            engine: &decision::DecisionEngine,
            inputs: &decision::DecisionInputs<'_>,
            log: &dyn collaborators::OccurrenceLog,
        ) -> Result<decision::Decision, collaborators::OccurrenceLogError> {
            engine.decide_with_log(inputs, log)
        }
    }
}
