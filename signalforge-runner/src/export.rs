//! CSV and JSON export of trade occurrences and cycle reports.

use std::path::Path;

use anyhow::{Context, Result};
use signalforge_core::domain::TradeOccurrence;

use crate::cycle::CycleReport;

// ─── CSV export ─────────────────────────────────────────────────────

/// Export occurrences as CSV.
///
/// Columns: timestamp, action, price, balance
pub fn export_occurrences_csv(occurrences: &[TradeOccurrence]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["timestamp", "action", "price", "balance"])?;
    for o in occurrences {
        wtr.write_record([
            o.timestamp.to_rfc3339(),
            o.action.to_string(),
            o.price.to_string(),
            o.balance.to_string(),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

/// Export cycle reports as CSV, one row per cycle.
///
/// Columns: timestamp, symbol, timeframe, price, rsi, bb_lower, bb_upper,
/// macd, macd_signal, stoch_k, stoch_d, action, rule, executed, balance
pub fn export_reports_csv(reports: &[CycleReport]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record([
        "timestamp",
        "symbol",
        "timeframe",
        "price",
        "rsi",
        "bb_lower",
        "bb_upper",
        "macd",
        "macd_signal",
        "stoch_k",
        "stoch_d",
        "action",
        "rule",
        "executed",
        "balance",
    ])?;
    for r in reports {
        let ind = &r.indicators;
        wtr.write_record([
            r.timestamp.to_rfc3339(),
            r.symbol.clone(),
            r.timeframe.to_string(),
            r.price.to_string(),
            ind.rsi.round_dp(4).to_string(),
            ind.bands.lower.round_dp(8).to_string(),
            ind.bands.upper.round_dp(8).to_string(),
            ind.macd.macd.round_dp(8).to_string(),
            ind.macd.signal.round_dp(8).to_string(),
            ind.stochastic.k.round_dp(4).to_string(),
            ind.stochastic.d.round_dp(4).to_string(),
            r.decision.action.to_string(),
            r.decision.rule.to_string(),
            r.executed.to_string(),
            r.balance.to_string(),
        ])?;
    }
    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

// ─── JSON export ────────────────────────────────────────────────────

pub fn export_reports_json(reports: &[CycleReport]) -> Result<String> {
    serde_json::to_string_pretty(reports).context("failed to serialize cycle reports to JSON")
}

/// Write `contents` to `path`, creating parent directories.
pub fn write_file(path: &Path, contents: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create {}", parent.display()))?;
        }
    }
    std::fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))
}
