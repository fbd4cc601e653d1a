//! Criterion benchmarks for SignalForge hot paths.
//!
//! Benchmarks:
//! 1. MACD recomputation-by-truncation (quadratic in the window)
//! 2. Stochastic %D sliding windows
//! 3. Full per-cycle indicator snapshot
//! 4. Adaptive interval selection over the weekly baseline
//! 5. Decision engine rule table

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use signalforge_core::analysis::{select_interval, BASELINE_POINTS};
use signalforge_core::config::IndicatorParams;
use signalforge_core::decision::{DecisionEngine, DecisionInputs, DecisionParams};
use signalforge_core::domain::{TradeOccurrence, TradingAction};
use signalforge_core::indicators::{macd, stochastic, BollingerBands, IndicatorSnapshot};

// ── Helpers ──────────────────────────────────────────────────────────

/// Deterministic oscillating close series around 100.
fn make_closes(n: usize) -> Vec<Decimal> {
    (0..n)
        .map(|i| {
            let wobble = Decimal::from((i * 7) % 23) - dec!(11);
            dec!(100) + wobble / dec!(4) + Decimal::from(i as u64) / dec!(100)
        })
        .collect()
}

fn make_volumes(n: usize) -> Vec<Decimal> {
    (0..n)
        .map(|i| Decimal::from(10_000 + (i as u64 * 37) % 5_000))
        .collect()
}

// ── 1/2. Individual indicators ───────────────────────────────────────

fn bench_indicators(c: &mut Criterion) {
    let mut group = c.benchmark_group("indicators");

    for &window in &[50, 200, 1000] {
        let closes = make_closes(window);
        group.bench_with_input(BenchmarkId::new("macd", window), &window, |b, _| {
            b.iter(|| macd(black_box(&closes)));
        });
        group.bench_with_input(BenchmarkId::new("stochastic_14_3", window), &window, |b, _| {
            b.iter(|| stochastic(black_box(&closes), 14, 3));
        });
    }

    group.finish();
}

// ── 3. Snapshot ──────────────────────────────────────────────────────

fn bench_snapshot(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot");
    let params = IndicatorParams::default();
    let closes = make_closes(params.closes_needed());

    group.bench_function("default_params", |b| {
        b.iter(|| IndicatorSnapshot::compute(black_box(&closes), black_box(&params)));
    });

    group.finish();
}

// ── 4. Interval selection ────────────────────────────────────────────

fn bench_interval_selection(c: &mut Criterion) {
    let mut group = c.benchmark_group("interval_selection");
    let prices = make_closes(BASELINE_POINTS);
    let volumes = make_volumes(BASELINE_POINTS);

    group.bench_function("weekly_baseline", |b| {
        b.iter(|| select_interval(black_box(&prices), black_box(&volumes)));
    });

    group.finish();
}

// ── 5. Decision ──────────────────────────────────────────────────────

fn bench_decision(c: &mut Criterion) {
    let mut group = c.benchmark_group("decision");
    let engine = DecisionEngine::new(DecisionParams::default());
    let volumes = make_volumes(50);
    let last = TradeOccurrence::new(chrono::Utc::now(), dec!(100), TradingAction::Buy, dec!(0));
    let inputs = DecisionInputs {
        price: dec!(103),
        rsi: dec!(55),
        bands: Some(BollingerBands {
            upper: dec!(110),
            lower: dec!(90),
            middle: dec!(100),
        }),
        volumes: &volumes,
    };

    group.bench_function("with_bands", |b| {
        b.iter(|| engine.decide(black_box(&inputs), Some(&last)));
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_indicators,
    bench_snapshot,
    bench_interval_selection,
    bench_decision,
);
criterion_main!(benches);
