//! TradingAction: the single output of a decision cycle.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What the bot should do this cycle.
///
/// Re-derived fresh every cycle; the only state carried between cycles is the
/// last recorded [`TradeOccurrence`](super::TradeOccurrence).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TradingAction {
    Buy,
    Sell,
    Keep,
}

impl TradingAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Buy => "Buy",
            Self::Sell => "Sell",
            Self::Keep => "Keep",
        }
    }

    /// Human-readable position instruction used in cycle logs.
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Buy => "Buy Position",
            Self::Sell => "Sell Position",
            Self::Keep => "Keep Position",
        }
    }

    /// True for actions that ask the execution backend to trade.
    pub fn is_trade(&self) -> bool {
        !matches!(self, Self::Keep)
    }
}

impl fmt::Display for TradingAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_and_describe() {
        assert_eq!(TradingAction::Buy.to_string(), "Buy");
        assert_eq!(TradingAction::Keep.describe(), "Keep Position");
        assert!(TradingAction::Sell.is_trade());
        assert!(!TradingAction::Keep.is_trade());
    }

    #[test]
    fn serializes_as_variant_name() {
        let json = serde_json::to_string(&TradingAction::Sell).unwrap();
        assert_eq!(json, "\"Sell\"");
    }
}
