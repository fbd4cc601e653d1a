//! One decision cycle: resolve the interval, fetch, compute, decide, execute,
//! record.
//!
//! Data flows one way through a cycle:
//! 1. Resolve the timeframe (`Manual` is used as-is; `Automatic` fetches the
//!    weekly hourly baseline and runs the adaptive selector)
//! 2. Fetch the current price, closes and volumes at that timeframe
//! 3. Compute the indicator snapshot
//! 4. Evaluate the decision rule table against the occurrence log
//! 5. Hand Buy/Sell to the execution backend
//! 6. Append an occurrence only when the backend reports the trade executed
//!
//! Any failure aborts the cycle before step 6, so a partial decision is never
//! persisted.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, info};

use signalforge_core::analysis::{analyze_interval, IntervalSelection, BASELINE_POINTS, BASELINE_TIMEFRAME};
use signalforge_core::collaborators::{
    expect_len, DataError, ExecutionBackend, ExecutionError, MarketDataProvider, OccurrenceLog,
    OccurrenceLogError,
};
use signalforge_core::config::TradingConfig;
use signalforge_core::decision::{Decision, DecisionEngine, DecisionInputs, DecisionParams};
use signalforge_core::domain::{IntervalChoice, Timeframe, TradeOccurrence};
use signalforge_core::indicators::{IndicatorError, IndicatorSnapshot};

use crate::retry::RetryPolicy;

#[derive(Debug, Error)]
pub enum CycleError {
    #[error("market data: {0}")]
    Data(#[from] DataError),

    #[error("indicators: {0}")]
    Indicator(#[from] IndicatorError),

    #[error("occurrence log: {0}")]
    Log(#[from] OccurrenceLogError),

    #[error("execution: {0}")]
    Execution(#[from] ExecutionError),
}

/// Everything one cycle observed and did.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CycleReport {
    pub timestamp: DateTime<Utc>,
    pub symbol: String,
    pub timeframe: Timeframe,
    /// Present only when the interval was chosen automatically.
    pub selection: Option<IntervalSelection>,
    pub price: Decimal,
    pub indicators: IndicatorSnapshot,
    pub decision: Decision,
    pub executed: bool,
    pub balance: Decimal,
}

/// Market data gathered for one timeframe.
#[derive(Debug, Clone, PartialEq)]
pub struct MarketView {
    pub timeframe: Timeframe,
    pub price: Decimal,
    pub closes: Vec<Decimal>,
    pub volumes: Vec<Decimal>,
}

/// Stateless cycle runner; all state lives in the collaborators.
#[derive(Debug, Clone)]
pub struct DecisionCycle {
    config: TradingConfig,
    engine: DecisionEngine,
    retry: RetryPolicy,
}

impl DecisionCycle {
    pub fn new(config: TradingConfig) -> Self {
        let engine = DecisionEngine::new(DecisionParams::from(&config));
        let retry = RetryPolicy::from(&config.retry);
        Self {
            config,
            engine,
            retry,
        }
    }

    pub fn with_retry(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn config(&self) -> &TradingConfig {
        &self.config
    }

    /// Fetch the weekly hourly baseline and run the adaptive selector.
    pub fn select_interval<P>(&self, provider: &P) -> Result<IntervalSelection, CycleError>
    where
        P: MarketDataProvider + ?Sized,
    {
        let symbol = self.config.symbol.as_str();
        let prices = self.retry.run("baseline closes", || {
            provider.historical_closes(symbol, BASELINE_TIMEFRAME, BASELINE_POINTS)
        })?;
        let volumes = self.retry.run("baseline volumes", || {
            provider.volumes(symbol, BASELINE_TIMEFRAME, BASELINE_POINTS)
        })?;
        Ok(analyze_interval(&prices, &volumes))
    }

    /// The timeframe this cycle analyzes. A manual choice bypasses the
    /// selector and fetches nothing.
    pub fn resolve_interval<P>(
        &self,
        provider: &P,
    ) -> Result<(Timeframe, Option<IntervalSelection>), CycleError>
    where
        P: MarketDataProvider + ?Sized,
    {
        match self.config.interval {
            IntervalChoice::Manual(timeframe) => Ok((timeframe, None)),
            IntervalChoice::Automatic => {
                let selection = self.select_interval(provider)?;
                Ok((selection.timeframe(), Some(selection)))
            }
        }
    }

    /// Fetch price, closes and volumes at `timeframe`.
    pub fn fetch_market<P>(&self, provider: &P, timeframe: Timeframe) -> Result<MarketView, CycleError>
    where
        P: MarketDataProvider + ?Sized,
    {
        let symbol = self.config.symbol.as_str();
        let closes_needed = self.config.indicators.closes_needed();
        let volume_window = self.config.indicators.volume_window;

        let price = self.retry.run("current price", || provider.current_price(symbol))?;
        let closes = self.retry.run("closes", || {
            provider
                .historical_closes(symbol, timeframe, closes_needed)
                .and_then(|series| expect_len(series, closes_needed))
        })?;
        let volumes = self.retry.run("volumes", || {
            provider
                .volumes(symbol, timeframe, volume_window)
                .and_then(|series| expect_len(series, volume_window))
        })?;
        Ok(MarketView {
            timeframe,
            price,
            closes,
            volumes,
        })
    }

    /// Indicators and decision for already-fetched market data. Reads the log
    /// but never writes it.
    pub fn evaluate<L>(
        &self,
        market: &MarketView,
        log: &L,
    ) -> Result<(IndicatorSnapshot, Decision), CycleError>
    where
        L: OccurrenceLog + ?Sized,
    {
        let snapshot = IndicatorSnapshot::compute(&market.closes, &self.config.indicators)?;
        let inputs = DecisionInputs {
            price: market.price,
            rsi: snapshot.rsi,
            bands: self.config.use_bollinger.then_some(snapshot.bands),
            volumes: &market.volumes,
        };
        let decision = self.engine.decide_with_log(&inputs, log)?;
        Ok((snapshot, decision))
    }

    /// Run one full cycle.
    pub fn run<P, L, E>(
        &self,
        provider: &P,
        log: &mut L,
        execution: &mut E,
    ) -> Result<CycleReport, CycleError>
    where
        P: MarketDataProvider + ?Sized,
        L: OccurrenceLog + ?Sized,
        E: ExecutionBackend + ?Sized,
    {
        let (timeframe, selection) = self.resolve_interval(provider)?;
        let market = self.fetch_market(provider, timeframe)?;
        let (indicators, decision) = self.evaluate(&market, &*log)?;

        let (executed, balance) = if decision.action.is_trade() {
            let report = execution.execute(decision.action, market.price)?;
            (report.executed, report.balance)
        } else {
            (false, execution.balance())
        };

        let timestamp = Utc::now();
        if executed {
            log.append(TradeOccurrence::new(
                timestamp,
                market.price,
                decision.action,
                balance,
            ))?;
            debug!(action = %decision.action, price = %market.price, "occurrence recorded");
        }

        info!(
            symbol = %self.config.symbol,
            %timeframe,
            price = %market.price,
            rsi = %indicators.rsi,
            decision = decision.action.describe(),
            rule = %decision.rule,
            executed,
            %balance,
            "cycle complete"
        );

        Ok(CycleReport {
            timestamp,
            symbol: self.config.symbol.clone(),
            timeframe,
            selection,
            price: market.price,
            indicators,
            decision,
            executed,
            balance,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryOccurrenceLog;
    use crate::paper::PaperExecution;
    use crate::synthetic::SyntheticProvider;
    use signalforge_core::domain::TradingAction;

    fn manual_config() -> TradingConfig {
        TradingConfig {
            interval: IntervalChoice::Manual(Timeframe::FifteenMinutes),
            ..TradingConfig::default()
        }
    }

    #[test]
    fn manual_interval_skips_selection() {
        let cycle = DecisionCycle::new(manual_config()).with_retry(RetryPolicy::none());
        let (timeframe, selection) = cycle.resolve_interval(&SyntheticProvider::new()).unwrap();
        assert_eq!(timeframe, Timeframe::FifteenMinutes);
        assert!(selection.is_none());
    }

    #[test]
    fn automatic_interval_runs_selector() {
        let cycle = DecisionCycle::new(TradingConfig::default()).with_retry(RetryPolicy::none());
        let (timeframe, selection) = cycle.resolve_interval(&SyntheticProvider::new()).unwrap();
        let selection = selection.unwrap();
        assert!(matches!(selection, IntervalSelection::Analyzed(_)));
        assert_eq!(selection.timeframe(), timeframe);
    }

    #[test]
    fn synthetic_cycle_produces_report() {
        let cycle = DecisionCycle::new(manual_config()).with_retry(RetryPolicy::none());
        let mut log = MemoryOccurrenceLog::new(10);
        let mut paper = PaperExecution::default();
        let report = cycle
            .run(&SyntheticProvider::new(), &mut log, &mut paper)
            .unwrap();

        assert_eq!(report.symbol, "BTCUSDT");
        assert_eq!(report.timeframe, Timeframe::FifteenMinutes);
        assert!(report.indicators.rsi >= Decimal::ZERO);
        // An occurrence exists exactly when something executed.
        assert_eq!(log.recent().len(), usize::from(report.executed));
        if report.decision.action == TradingAction::Keep {
            assert!(!report.executed);
        }
    }
}
