//! Buy/Sell/Keep decision engine.
//!
//! The decision is a priority-ordered rule table evaluated once per cycle.
//! The first satisfied row wins and nothing later can override it, so a Buy
//! is never turned into a Sell within the same cycle.
//!
//! | # | Row                  | Condition                                                        | Action |
//! |---|----------------------|------------------------------------------------------------------|--------|
//! | 1 | `BuySignal`          | rsi < buy ∧ price < lower band ∧ volume spike (bands variant)     | Buy    |
//! |   |                      | rsi < buy (no-bands variant)                                     |        |
//! | 2 | `NoHistory`          | no prior occurrence, or its price is zero                        | Keep   |
//! | 3 | `StopLoss`           | change% ≤ −\|stop_loss\|                                         | Sell   |
//! | 4 | `TakeProfit`         | change% ≥ take_profit                                            | Sell   |
//! | 5 | `RelativeTakeProfit` | rsi > sell ∧ price > upper ∧ price > last·(1 + tp/100), bands only | Sell   |
//! | 6 | `NoSignal`           | otherwise                                                        | Keep   |
//!
//! `change% = (price − last_price) / last_price × 100`.

pub mod engine;
pub mod volume;

pub use engine::{DecisionEngine, DecisionInputs, DecisionParams};
pub use volume::volume_spike;

use crate::domain::TradingAction;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The rule-table row that produced a decision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecisionRule {
    BuySignal,
    NoHistory,
    StopLoss,
    TakeProfit,
    RelativeTakeProfit,
    NoSignal,
}

impl DecisionRule {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::BuySignal => "buy_signal",
            Self::NoHistory => "no_history",
            Self::StopLoss => "stop_loss",
            Self::TakeProfit => "take_profit",
            Self::RelativeTakeProfit => "relative_take_profit",
            Self::NoSignal => "no_signal",
        }
    }
}

impl fmt::Display for DecisionRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An action plus the row that chose it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Decision {
    pub action: TradingAction,
    pub rule: DecisionRule,
}

impl Decision {
    pub fn new(action: TradingAction, rule: DecisionRule) -> Self {
        Self { action, rule }
    }

    pub fn keep(rule: DecisionRule) -> Self {
        Self::new(TradingAction::Keep, rule)
    }

    pub fn sell(rule: DecisionRule) -> Self {
        Self::new(TradingAction::Sell, rule)
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.action, self.rule)
    }
}
