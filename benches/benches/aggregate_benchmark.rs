//! Aggregation throughput for every strategy.
//!
//! Run with: `cargo bench --package rebar-bench`

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rebar_bench::synthetic_bars;
use rebar_lib::prelude::*;
use std::hint::black_box;

/// Input sizes in bars.
const SIZES: [u32; 3] = [1_000, 10_000, 100_000];

fn strategies() -> Vec<BarAggregator<f64>> {
    vec![
        DurationBarAggregator::from_timeframe(Timeframe::Minute15, false).into(),
        VolumeBarAggregator::new(5_000.0).map(Into::into).unwrap(),
        RangeBarAggregator::new(0.5).map(Into::into).unwrap(),
        RenkoBarAggregator::new(0.1, 2).map(Into::into).unwrap(),
        HeikinAshiBarAggregator::new().into(),
    ]
}

fn aggregate_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate");

    for size in SIZES {
        let bars: Vec<Bar<f64>> = synthetic_bars(size);
        group.throughput(Throughput::Elements(u64::from(size)));

        for strategy in strategies() {
            group.bench_with_input(
                BenchmarkId::new(strategy.name(), size),
                &bars,
                |b, bars| b.iter(|| strategy.aggregate(black_box(bars.as_slice())).unwrap()),
            );
        }
    }

    group.finish();
}

fn numeric_backend_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("renko_backend");
    let renko_f64 = RenkoBarAggregator::new(0.1_f64, 2).unwrap();
    let renko_f32 = RenkoBarAggregator::new(0.1_f32, 2).unwrap();
    let bars_f64: Vec<Bar<f64>> = synthetic_bars(10_000);
    let bars_f32: Vec<Bar<f32>> = synthetic_bars(10_000);

    group.bench_function("f64", |b| {
        b.iter(|| renko_f64.aggregate(black_box(bars_f64.as_slice())).unwrap());
    });
    group.bench_function("f32", |b| {
        b.iter(|| renko_f32.aggregate(black_box(bars_f32.as_slice())).unwrap());
    });

    group.finish();
}

criterion_group!(benches, aggregate_benchmark, numeric_backend_benchmark);
criterion_main!(benches);
