//! Paper trading execution backend.
//!
//! All-in, all-out: Buy converts the whole quote balance into the base asset,
//! Sell converts the whole base position back. Keep never trades. A Buy with
//! nothing to spend, or a Sell with nothing to sell, is reported as not
//! executed rather than rejected.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use signalforge_core::collaborators::{ExecutionBackend, ExecutionError, ExecutionReport};
use signalforge_core::domain::TradingAction;
use tracing::info;

/// Starting quote balance when none is configured.
pub const DEFAULT_QUOTE_BALANCE: Decimal = dec!(1000);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperExecution {
    quote: Decimal,
    base: Decimal,
}

impl PaperExecution {
    pub fn new(quote_balance: Decimal) -> Self {
        Self {
            quote: quote_balance,
            base: Decimal::ZERO,
        }
    }

    pub fn base_position(&self) -> Decimal {
        self.base
    }

    fn report(&self, executed: bool) -> ExecutionReport {
        ExecutionReport {
            executed,
            balance: self.quote,
        }
    }
}

impl Default for PaperExecution {
    fn default() -> Self {
        Self::new(DEFAULT_QUOTE_BALANCE)
    }
}

impl ExecutionBackend for PaperExecution {
    fn name(&self) -> &str {
        "paper"
    }

    fn execute(
        &mut self,
        action: TradingAction,
        price: Decimal,
    ) -> Result<ExecutionReport, ExecutionError> {
        if action.is_trade() && price <= Decimal::ZERO {
            return Err(ExecutionError::Rejected(format!(
                "{action} at non-positive price {price}"
            )));
        }
        match action {
            TradingAction::Buy if self.quote > Decimal::ZERO => {
                self.base += self.quote / price;
                self.quote = Decimal::ZERO;
                info!(%price, base = %self.base, "paper buy filled");
                Ok(self.report(true))
            }
            TradingAction::Sell if self.base > Decimal::ZERO => {
                self.quote += self.base * price;
                self.base = Decimal::ZERO;
                info!(%price, quote = %self.quote, "paper sell filled");
                Ok(self.report(true))
            }
            _ => Ok(self.report(false)),
        }
    }

    fn balance(&self) -> Decimal {
        self.quote
    }
}
