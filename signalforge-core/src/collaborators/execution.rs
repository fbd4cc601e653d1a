//! Execution backend trait.
//!
//! Consumed by the orchestrator, never by the decision engine.

use crate::domain::TradingAction;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ExecutionError {
    #[error("execution rejected: {0}")]
    Rejected(String),
}

/// Outcome of handing one action to the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionReport {
    /// Whether an order actually went through.
    pub executed: bool,
    /// Quote-currency balance after the call.
    pub balance: Decimal,
}

pub trait ExecutionBackend {
    fn name(&self) -> &str;

    /// Act on `action` at `price`. `Keep` must never trade.
    fn execute(
        &mut self,
        action: TradingAction,
        price: Decimal,
    ) -> Result<ExecutionReport, ExecutionError>;

    /// Current quote-currency balance.
    fn balance(&self) -> Decimal;
}
