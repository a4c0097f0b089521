//! Criterion benchmarks for the analysis hot paths.
//!
//! Benchmarks:
//! 1. Moving average over a long series (several windows)
//! 2. Full annotate + summarize over a trading session and a multi-day series

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chrono::{Duration, TimeZone, Utc};
use tapewatch_core::indicators::Sma;
use tapewatch_core::{analyze, AnalysisParams, Sample};

// ── Helpers ──────────────────────────────────────────────────────────

fn make_samples(n: usize) -> Vec<Sample> {
    let start = Utc.with_ymd_and_hms(2024, 1, 2, 14, 30, 0).unwrap();
    (0..n)
        .map(|i| {
            let price = 100.0 + (i as f64 * 0.1).sin() * 10.0;
            let volume = 50_000.0 + ((i * 7919) % 20_000) as f64;
            Sample::new(start + Duration::minutes(i as i64), price, volume)
        })
        .collect()
}

fn bench_sma(c: &mut Criterion) {
    let values: Vec<f64> = make_samples(10_000).iter().map(|s| s.price).collect();
    let mut group = c.benchmark_group("sma");
    for window in [3usize, 20, 100] {
        let sma = Sma::new(window);
        group.bench_with_input(BenchmarkId::from_parameter(window), &values, |b, v| {
            b.iter(|| sma.compute(black_box(v)))
        });
    }
    group.finish();
}

fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");
    // One 1-minute session, then roughly a month of 1-minute samples.
    for n in [390usize, 8_190] {
        let samples = make_samples(n);
        let params = AnalysisParams::default();
        group.bench_with_input(BenchmarkId::from_parameter(n), &samples, |b, s| {
            b.iter(|| analyze(black_box(s), &params))
        });
    }
    group.finish();
}

criterion_group!(benches, bench_sma, bench_analyze);
criterion_main!(benches);
