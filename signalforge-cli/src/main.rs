//! SignalForge CLI: run the trading loop and inspect its inputs and history.
//!
//! Commands:
//! - `run`: poll the market and trade on every cycle until stopped
//! - `cycle`: run exactly one decision cycle and print its report
//! - `interval`: print the adaptive interval analysis for the symbol
//! - `indicators`: print the indicator snapshot at a timeframe
//! - `history`: print or CSV-export the occurrence log
//! - `config`: print the effective configuration and its fingerprint

use anyhow::{bail, Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;
use std::path::PathBuf;
use std::time::Duration;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use signalforge_core::analysis::IntervalSelection;
use signalforge_core::collaborators::{MarketDataProvider, OccurrenceLog};
use signalforge_core::config::TradingConfig;
use signalforge_core::domain::{IntervalChoice, Timeframe};
use signalforge_core::indicators::IndicatorSnapshot;
use signalforge_runner::export::write_file;
use signalforge_runner::{
    export_occurrences_csv, export_reports_csv, export_reports_json, BinanceProvider, Bot,
    CsvProvider, CycleReport, DecisionCycle, JsonlOccurrenceLog, MemoryOccurrenceLog,
    PaperExecution, SyntheticProvider,
};

#[derive(Parser)]
#[command(
    name = "signalforge",
    version,
    about = "SignalForge: adaptive-interval Buy/Sell/Keep trading signals"
)]
struct Cli {
    /// Log filter when RUST_LOG is unset (e.g. info, debug, signalforge_core=trace).
    #[arg(long, global = true, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Poll the market and trade on every cycle.
    Run {
        #[command(flatten)]
        market: MarketArgs,

        /// Stop after this many cycles. Runs until killed when omitted.
        #[arg(long)]
        cycles: Option<usize>,

        /// Override the configured seconds between cycles.
        #[arg(long)]
        every: Option<u64>,

        /// Starting quote balance for paper trading.
        #[arg(long, default_value = "1000")]
        quote_balance: Decimal,

        /// Keep occurrences in memory only; never touch the history file.
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Write the retained cycle reports here on exit (.csv or .json).
        #[arg(long)]
        reports_out: Option<PathBuf>,
    },
    /// Run a single decision cycle.
    Cycle {
        #[command(flatten)]
        market: MarketArgs,

        /// Starting quote balance for paper trading.
        #[arg(long, default_value = "1000")]
        quote_balance: Decimal,

        /// Keep occurrences in memory only; never touch the history file.
        #[arg(long, default_value_t = false)]
        dry_run: bool,

        /// Print the full report as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
    /// Print the adaptive interval analysis.
    Interval {
        #[command(flatten)]
        market: MarketArgs,
    },
    /// Print the indicator snapshot.
    Indicators {
        #[command(flatten)]
        market: MarketArgs,

        /// Timeframe to analyze. Defaults to the configured interval.
        #[arg(long)]
        timeframe: Option<Timeframe>,
    },
    /// Print or export the occurrence log.
    History {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Show only the most recent N occurrences.
        #[arg(long)]
        last: Option<usize>,

        /// Write the occurrences as CSV instead of printing them.
        #[arg(long)]
        csv_out: Option<PathBuf>,
    },
    /// Print the effective configuration as TOML with its fingerprint.
    Config {
        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,
    },
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
enum ProviderKind {
    Binance,
    Csv,
    Synthetic,
}

#[derive(Args)]
struct MarketArgs {
    /// Path to a TOML config file. Defaults apply when omitted.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Override the configured symbol.
    #[arg(long)]
    symbol: Option<String>,

    /// Override the configured interval (auto, 1m, 5m, 15m, 30m, 1h, 2h, 4h, 1d).
    #[arg(long)]
    interval: Option<IntervalChoice>,

    /// Market data source.
    #[arg(long, value_enum, default_value_t = ProviderKind::Binance)]
    provider: ProviderKind,

    /// Candle file for `--provider csv` (columns: close, volume).
    #[arg(long)]
    csv_file: Option<PathBuf>,
}

impl MarketArgs {
    fn load_config(&self) -> Result<TradingConfig> {
        let mut config = load_config(self.config.as_ref())?;
        if let Some(symbol) = &self.symbol {
            config.symbol = symbol.clone();
        }
        if let Some(interval) = self.interval {
            config.interval = interval;
        }
        config.validate()?;
        Ok(config)
    }

    fn provider(&self) -> Result<Box<dyn MarketDataProvider>> {
        Ok(match self.provider {
            ProviderKind::Binance => Box::new(BinanceProvider::new()?),
            ProviderKind::Csv => {
                let Some(path) = &self.csv_file else {
                    bail!("--provider csv requires --csv-file");
                };
                Box::new(CsvProvider::from_path(path)?)
            }
            ProviderKind::Synthetic => Box::new(SyntheticProvider::advancing()),
        })
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Run {
            market,
            cycles,
            every,
            quote_balance,
            dry_run,
            reports_out,
        } => run_loop(&market, cycles, every, quote_balance, dry_run, reports_out),
        Commands::Cycle {
            market,
            quote_balance,
            dry_run,
            json,
        } => run_cycle(&market, quote_balance, dry_run, json),
        Commands::Interval { market } => run_interval(&market),
        Commands::Indicators { market, timeframe } => run_indicators(&market, timeframe),
        Commands::History {
            config,
            last,
            csv_out,
        } => run_history(config, last, csv_out),
        Commands::Config { config } => run_config(config),
    }
}

fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false))
        .with(filter)
        .try_init()
        .ok();
}

fn load_config(path: Option<&PathBuf>) -> Result<TradingConfig> {
    match path {
        Some(path) => TradingConfig::from_file(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(TradingConfig::default()),
    }
}

fn open_log(config: &TradingConfig, dry_run: bool) -> Result<Box<dyn OccurrenceLog + Send>> {
    if dry_run {
        return Ok(Box::new(MemoryOccurrenceLog::new(config.history.capacity)));
    }
    Ok(Box::new(JsonlOccurrenceLog::open(
        &config.history.path,
        config.history.capacity,
    )?))
}

fn run_loop(
    market: &MarketArgs,
    cycles: Option<usize>,
    every: Option<u64>,
    quote_balance: Decimal,
    dry_run: bool,
    reports_out: Option<PathBuf>,
) -> Result<()> {
    let config = market.load_config()?;
    tracing::info!(fingerprint = %config.fingerprint(), "configuration loaded");

    let log = open_log(&config, dry_run)?;
    let mut bot = Bot::new(
        DecisionCycle::new(config),
        market.provider()?,
        log,
        Box::new(PaperExecution::new(quote_balance)),
    );
    if let Some(secs) = every {
        bot = bot.with_run_interval(Duration::from_secs(secs));
    }

    let summary = bot.run(cycles);
    println!(
        "Cycles: {} completed, {} failed, {} skipped offline; {} trades executed",
        summary.completed, summary.failed, summary.skipped_offline, summary.trades_executed
    );
    println!("Quote balance: {}", bot.execution().balance());

    if let Some(path) = reports_out {
        let reports = bot.reports();
        let contents = match path.extension().and_then(|e| e.to_str()) {
            Some("json") => export_reports_json(&reports)?,
            _ => export_reports_csv(&reports)?,
        };
        write_file(&path, &contents)?;
        println!("Reports saved to: {}", path.display());
    }
    Ok(())
}

fn run_cycle(market: &MarketArgs, quote_balance: Decimal, dry_run: bool, json: bool) -> Result<()> {
    let config = market.load_config()?;
    let provider = market.provider()?;
    let mut log = open_log(&config, dry_run)?;
    let mut execution = PaperExecution::new(quote_balance);

    let report = DecisionCycle::new(config).run(provider.as_ref(), log.as_mut(), &mut execution)?;
    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }
    Ok(())
}

fn run_interval(market: &MarketArgs) -> Result<()> {
    let config = market.load_config()?;
    let provider = market.provider()?;
    let selection = DecisionCycle::new(config).select_interval(provider.as_ref())?;
    print_selection(&selection);
    Ok(())
}

fn run_indicators(market: &MarketArgs, timeframe: Option<Timeframe>) -> Result<()> {
    let config = market.load_config()?;
    let provider = market.provider()?;
    let cycle = DecisionCycle::new(config);

    let timeframe = match timeframe {
        Some(tf) => tf,
        None => cycle.resolve_interval(provider.as_ref())?.0,
    };
    let view = cycle.fetch_market(provider.as_ref(), timeframe)?;
    let snapshot = IndicatorSnapshot::compute(
        &view.closes,
        &cycle.config().indicators,
    )?;

    println!("Symbol:      {} @ {}", cycle.config().symbol, timeframe);
    println!("Price:       {}", view.price);
    println!("RSI:         {}", snapshot.rsi.round_dp(2));
    println!(
        "Bollinger:   lower {} / middle {} / upper {}",
        snapshot.bands.lower.round_dp(4),
        snapshot.bands.middle.round_dp(4),
        snapshot.bands.upper.round_dp(4)
    );
    println!(
        "MACD:        {} (signal {}, histogram {})",
        snapshot.macd.macd.round_dp(4),
        snapshot.macd.signal.round_dp(4),
        snapshot.macd.histogram().round_dp(4)
    );
    println!(
        "Stochastic:  %K {} / %D {}",
        snapshot.stochastic.k.round_dp(2),
        snapshot.stochastic.d.round_dp(2)
    );
    Ok(())
}

fn run_history(
    config_path: Option<PathBuf>,
    last: Option<usize>,
    csv_out: Option<PathBuf>,
) -> Result<()> {
    let config = load_config(config_path.as_ref())?;
    let log = JsonlOccurrenceLog::open(&config.history.path, config.history.capacity)?;
    let mut occurrences = log.read_all()?;
    if let Some(n) = last {
        let skip = occurrences.len().saturating_sub(n);
        occurrences.drain(..skip);
    }

    if let Some(path) = csv_out {
        write_file(&path, &export_occurrences_csv(&occurrences)?)?;
        println!(
            "{} occurrences exported to: {}",
            occurrences.len(),
            path.display()
        );
        return Ok(());
    }

    if occurrences.is_empty() {
        println!("No occurrences in {}", log.path().display());
        return Ok(());
    }
    println!("{:<26} {:<5} {:>16} {:>16}", "TIMESTAMP", "SIDE", "PRICE", "BALANCE");
    for o in &occurrences {
        println!(
            "{:<26} {:<5} {:>16} {:>16}",
            o.timestamp.format("%Y-%m-%d %H:%M:%S UTC"),
            o.action.as_str(),
            o.price,
            o.balance
        );
    }
    Ok(())
}

fn run_config(config_path: Option<PathBuf>) -> Result<()> {
    let config = load_config(config_path.as_ref())?;
    print!("{}", config.to_toml()?);
    println!("# fingerprint: {}", config.fingerprint());
    Ok(())
}

fn print_selection(selection: &IntervalSelection) {
    match selection {
        IntervalSelection::Analyzed(a) => {
            println!("Short-term volatility: {}", a.short_volatility.round_dp(6));
            println!("Long-term volatility:  {}", a.long_volatility.round_dp(6));
            println!("Trend:                 {}", a.trend);
            println!("Average volume:        {}", a.average_volume.round_dp(2));
            println!("Selected interval:     {}", a.timeframe);
        }
        IntervalSelection::Fallback { reason, timeframe } => {
            println!("Fallback ({reason:?}): {timeframe}");
        }
    }
}

fn print_report(report: &CycleReport) {
    println!("=== Cycle {} ===", report.timestamp.format("%Y-%m-%d %H:%M:%S UTC"));
    println!("Symbol:    {} @ {}", report.symbol, report.timeframe);
    if let Some(selection) = &report.selection {
        print_selection(selection);
    }
    println!("Price:     {}", report.price);
    println!("RSI:       {}", report.indicators.rsi.round_dp(2));
    println!(
        "Decision:  {} ({})",
        report.decision.action.describe(),
        report.decision.rule
    );
    println!("Executed:  {}", report.executed);
    println!("Balance:   {}", report.balance);
}
