//! Polling loop around [`DecisionCycle`].
//!
//! One cycle per run interval, strictly serialized. Before each cycle the
//! provider's connectivity check runs; an unreachable provider skips the cycle
//! instead of failing it. A failed cycle is logged and the loop carries on.
//!
//! Cancellation is a shared `Arc<AtomicBool>` checked between cycles and
//! between the short slices the inter-cycle sleep is cut into, so a stop
//! request takes effect within one slice.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use signalforge_core::collaborators::{ExecutionBackend, MarketDataProvider, OccurrenceLog};
use tracing::{error, info, warn};

use crate::cycle::{CycleError, CycleReport, DecisionCycle};
use crate::ring::BoundedRing;

/// Longest uninterrupted sleep between cancellation checks.
const SLEEP_SLICE: Duration = Duration::from_millis(100);

/// Counters for one `run` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSummary {
    pub completed: usize,
    pub failed: usize,
    pub skipped_offline: usize,
    pub trades_executed: usize,
    pub cancelled: bool,
}

impl RunSummary {
    pub fn attempted(&self) -> usize {
        self.completed + self.failed + self.skipped_offline
    }
}

/// Outcome of a single loop iteration.
#[derive(Debug)]
pub enum CycleOutcome {
    Completed(Box<CycleReport>),
    Offline,
    Failed(CycleError),
}

pub struct Bot {
    cycle: DecisionCycle,
    provider: Box<dyn MarketDataProvider>,
    log: Box<dyn OccurrenceLog + Send>,
    execution: Box<dyn ExecutionBackend + Send>,
    reports: BoundedRing<CycleReport>,
    run_interval: Duration,
    cancel: Arc<AtomicBool>,
}

impl Bot {
    pub fn new(
        cycle: DecisionCycle,
        provider: Box<dyn MarketDataProvider>,
        log: Box<dyn OccurrenceLog + Send>,
        execution: Box<dyn ExecutionBackend + Send>,
    ) -> Self {
        let config = cycle.config();
        let reports = BoundedRing::new(config.history.report_capacity);
        let run_interval = Duration::from_secs(config.run_interval_secs);
        Self {
            cycle,
            provider,
            log,
            execution,
            reports,
            run_interval,
            cancel: Arc::new(AtomicBool::new(false)),
        }
    }

    /// Override the configured pause between cycles.
    pub fn with_run_interval(mut self, run_interval: Duration) -> Self {
        self.run_interval = run_interval;
        self
    }

    /// Handle that stops the loop when set to `true`.
    pub fn cancel_handle(&self) -> Arc<AtomicBool> {
        Arc::clone(&self.cancel)
    }

    /// The most recent cycle reports, oldest first.
    pub fn reports(&self) -> Vec<CycleReport> {
        self.reports.to_vec()
    }

    pub fn execution(&self) -> &dyn ExecutionBackend {
        self.execution.as_ref()
    }

    fn cancelled(&self) -> bool {
        self.cancel.load(Ordering::Relaxed)
    }

    /// Run one iteration: connectivity check, then a full cycle.
    pub fn tick(&mut self) -> CycleOutcome {
        if !self.provider.is_available() {
            warn!(provider = self.provider.name(), "provider unreachable, skipping cycle");
            return CycleOutcome::Offline;
        }
        match self.cycle.run(
            self.provider.as_ref(),
            self.log.as_mut(),
            self.execution.as_mut(),
        ) {
            Ok(report) => {
                self.reports.push(report.clone());
                CycleOutcome::Completed(Box::new(report))
            }
            Err(e) => {
                error!(error = %e, "cycle failed");
                CycleOutcome::Failed(e)
            }
        }
    }

    /// Loop until cancelled, or until `max_cycles` iterations when given.
    pub fn run(&mut self, max_cycles: Option<usize>) -> RunSummary {
        let mut summary = RunSummary::default();
        info!(
            symbol = %self.cycle.config().symbol,
            provider = self.provider.name(),
            execution = self.execution.name(),
            interval = %self.cycle.config().interval,
            run_interval_secs = self.run_interval.as_secs(),
            "bot started"
        );

        loop {
            if self.cancelled() {
                summary.cancelled = true;
                break;
            }
            if max_cycles.is_some_and(|max| summary.attempted() >= max) {
                break;
            }

            match self.tick() {
                CycleOutcome::Completed(report) => {
                    summary.completed += 1;
                    if report.executed {
                        summary.trades_executed += 1;
                    }
                }
                CycleOutcome::Offline => summary.skipped_offline += 1,
                CycleOutcome::Failed(_) => summary.failed += 1,
            }

            let finished = max_cycles.is_some_and(|max| summary.attempted() >= max);
            if !finished && !self.sleep_interruptibly(self.run_interval) {
                summary.cancelled = true;
                break;
            }
        }

        info!(
            completed = summary.completed,
            failed = summary.failed,
            skipped_offline = summary.skipped_offline,
            trades = summary.trades_executed,
            cancelled = summary.cancelled,
            "bot stopped"
        );
        summary
    }

    /// Sleep for `total`, waking early on cancellation. Returns false when
    /// cancelled.
    fn sleep_interruptibly(&self, total: Duration) -> bool {
        let mut remaining = total;
        while !remaining.is_zero() {
            if self.cancelled() {
                return false;
            }
            let slice = remaining.min(SLEEP_SLICE);
            std::thread::sleep(slice);
            remaining -= slice;
        }
        !self.cancelled()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::history::MemoryOccurrenceLog;
    use crate::paper::PaperExecution;
    use crate::retry::RetryPolicy;
    use crate::synthetic::SyntheticProvider;
    use rust_decimal::Decimal;
    use signalforge_core::collaborators::DataError;
    use signalforge_core::config::TradingConfig;
    use signalforge_core::domain::Timeframe;

    fn bot_with(provider: Box<dyn MarketDataProvider>) -> Bot {
        let cycle = DecisionCycle::new(TradingConfig::default()).with_retry(RetryPolicy::none());
        Bot::new(
            cycle,
            provider,
            Box::new(MemoryOccurrenceLog::new(10)),
            Box::new(PaperExecution::default()),
        )
        .with_run_interval(Duration::ZERO)
    }

    struct Offline;

    impl MarketDataProvider for Offline {
        fn name(&self) -> &str {
            "offline"
        }
        fn current_price(&self, _: &str) -> Result<Decimal, DataError> {
            Err(DataError::NetworkUnreachable("offline".into()))
        }
        fn historical_closes(&self, _: &str, _: Timeframe, _: usize) -> Result<Vec<Decimal>, DataError> {
            Err(DataError::NetworkUnreachable("offline".into()))
        }
        fn volumes(&self, _: &str, _: Timeframe, _: usize) -> Result<Vec<Decimal>, DataError> {
            Err(DataError::NetworkUnreachable("offline".into()))
        }
        fn is_available(&self) -> bool {
            false
        }
    }

    #[test]
    fn runs_requested_number_of_cycles() {
        let mut bot = bot_with(Box::new(SyntheticProvider::advancing()));
        let summary = bot.run(Some(3));
        assert_eq!(summary.completed, 3);
        assert_eq!(summary.failed, 0);
        assert!(!summary.cancelled);
        assert_eq!(bot.reports().len(), 3);
    }

    #[test]
    fn offline_provider_skips_cycles() {
        let mut bot = bot_with(Box::new(Offline));
        let summary = bot.run(Some(2));
        assert_eq!(summary.skipped_offline, 2);
        assert_eq!(summary.completed, 0);
        assert!(bot.reports().is_empty());
    }

    #[test]
    fn pre_cancelled_bot_does_nothing() {
        let mut bot = bot_with(Box::new(SyntheticProvider::new()));
        bot.cancel_handle().store(true, Ordering::Relaxed);
        let summary = bot.run(None);
        assert!(summary.cancelled);
        assert_eq!(summary.attempted(), 0);
    }

    #[test]
    fn cancel_interrupts_sleep() {
        let mut bot = bot_with(Box::new(SyntheticProvider::new()))
            .with_run_interval(Duration::from_secs(3600));
        let cancel = bot.cancel_handle();
        let stopper = std::thread::spawn(move || {
            std::thread::sleep(Duration::from_millis(200));
            cancel.store(true, Ordering::Relaxed);
        });
        let summary = bot.run(None);
        stopper.join().unwrap();
        assert!(summary.cancelled);
        assert_eq!(summary.completed, 1);
    }

    #[test]
    fn report_ring_is_bounded() {
        let config = TradingConfig {
            history: signalforge_core::config::HistoryConfig {
                report_capacity: 2,
                ..Default::default()
            },
            ..TradingConfig::default()
        };
        let cycle = DecisionCycle::new(config).with_retry(RetryPolicy::none());
        let mut bot = Bot::new(
            cycle,
            Box::new(SyntheticProvider::advancing()),
            Box::new(MemoryOccurrenceLog::new(10)),
            Box::new(PaperExecution::default()),
        )
        .with_run_interval(Duration::ZERO);
        bot.run(Some(4));
        assert_eq!(bot.reports().len(), 2);
    }
}
