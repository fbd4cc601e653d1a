//! DecisionEngine: evaluates the rule table for one cycle.

use super::{volume_spike, Decision, DecisionRule};
use crate::collaborators::{OccurrenceLog, OccurrenceLogError};
use crate::config::TradingConfig;
use crate::domain::{TradeOccurrence, TradingAction};
use crate::indicators::BollingerBands;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Thresholds the engine compares against. All values are whole numbers, as
/// configured.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecisionParams {
    pub buy_rsi: i32,
    pub sell_rsi: i32,
    /// Sign is ignored; the stop always sits below the entry.
    pub stop_loss_pct: i32,
    pub take_profit_pct: i32,
}

impl Default for DecisionParams {
    fn default() -> Self {
        Self::from(&TradingConfig::default())
    }
}

impl From<&TradingConfig> for DecisionParams {
    fn from(config: &TradingConfig) -> Self {
        Self {
            buy_rsi: config.buy_rsi,
            sell_rsi: config.sell_rsi,
            stop_loss_pct: config.stop_loss_pct,
            take_profit_pct: config.take_profit_pct,
        }
    }
}

/// Market observations for one cycle.
#[derive(Debug, Clone, Copy)]
pub struct DecisionInputs<'a> {
    pub price: Decimal,
    pub rsi: Decimal,
    /// `None` selects the RSI-only variant: Buy on RSI alone and no relative
    /// take-profit row.
    pub bands: Option<BollingerBands>,
    pub volumes: &'a [Decimal],
}

#[derive(Debug, Clone, Copy, Default)]
pub struct DecisionEngine {
    params: DecisionParams,
}

impl DecisionEngine {
    pub fn new(params: DecisionParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &DecisionParams {
        &self.params
    }

    /// Evaluate the rule table against an already-fetched last occurrence.
    pub fn decide(&self, inputs: &DecisionInputs<'_>, last: Option<&TradeOccurrence>) -> Decision {
        let decision = if self.buy_signal(inputs) {
            Decision::new(TradingAction::Buy, DecisionRule::BuySignal)
        } else {
            self.exit_rules(inputs, last)
        };
        debug!(
            price = %inputs.price,
            rsi = %inputs.rsi,
            bands = inputs.bands.is_some(),
            decision = %decision,
            "decision evaluated"
        );
        decision
    }

    /// Evaluate the rule table, reading the log only when the Buy row did not
    /// fire. Log failures propagate to the caller.
    pub fn decide_with_log<L>(
        &self,
        inputs: &DecisionInputs<'_>,
        log: &L,
    ) -> Result<Decision, OccurrenceLogError>
    where
        L: OccurrenceLog + ?Sized,
    {
        if self.buy_signal(inputs) {
            return Ok(self.decide(inputs, None));
        }
        let last = log.last_occurrence()?;
        Ok(self.decide(inputs, last.as_ref()))
    }

    fn buy_signal(&self, inputs: &DecisionInputs<'_>) -> bool {
        if inputs.rsi >= Decimal::from(self.params.buy_rsi) {
            return false;
        }
        match inputs.bands {
            Some(bands) => inputs.price < bands.lower && volume_spike(inputs.volumes),
            None => true,
        }
    }

    fn exit_rules(&self, inputs: &DecisionInputs<'_>, last: Option<&TradeOccurrence>) -> Decision {
        let Some(last) = last else {
            return Decision::keep(DecisionRule::NoHistory);
        };
        if last.price.is_zero() {
            return Decision::keep(DecisionRule::NoHistory);
        }

        let change_pct = (inputs.price - last.price) / last.price * dec!(100);
        let stop_loss = Decimal::from(self.params.stop_loss_pct).abs();
        let take_profit = Decimal::from(self.params.take_profit_pct);

        if change_pct <= -stop_loss {
            return Decision::sell(DecisionRule::StopLoss);
        }
        if change_pct >= take_profit {
            return Decision::sell(DecisionRule::TakeProfit);
        }
        if let Some(bands) = inputs.bands {
            let target = last.price * (Decimal::ONE + take_profit / dec!(100));
            if inputs.rsi > Decimal::from(self.params.sell_rsi)
                && inputs.price > bands.upper
                && inputs.price > target
            {
                return Decision::sell(DecisionRule::RelativeTakeProfit);
            }
        }
        Decision::keep(DecisionRule::NoSignal)
    }
}
