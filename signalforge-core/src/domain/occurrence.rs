//! TradeOccurrence: a recorded execution.

use super::action::TradingAction;
use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One executed trade as recorded by the occurrence log.
///
/// Owned and persisted by the log collaborator. The decision engine only ever
/// reads the most recent record, and only its `price`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TradeOccurrence {
    pub timestamp: DateTime<Utc>,
    /// Asset price at the moment the trade executed (the reference entry price).
    pub price: Decimal,
    pub action: TradingAction,
    /// Account balance reported by the execution backend after the trade.
    pub balance: Decimal,
}

impl TradeOccurrence {
    pub fn new(
        timestamp: DateTime<Utc>,
        price: Decimal,
        action: TradingAction,
        balance: Decimal,
    ) -> Self {
        Self {
            timestamp,
            price,
            action,
            balance,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use rust_decimal_macros::dec;

    #[test]
    fn occurrence_serialization_roundtrip() {
        let occ = TradeOccurrence::new(
            Utc.with_ymd_and_hms(2024, 5, 1, 12, 0, 0).unwrap(),
            dec!(64250.10),
            TradingAction::Buy,
            dec!(1000.00),
        );
        let json = serde_json::to_string(&occ).unwrap();
        let back: TradeOccurrence = serde_json::from_str(&json).unwrap();
        assert_eq!(occ, back);
    }
}
