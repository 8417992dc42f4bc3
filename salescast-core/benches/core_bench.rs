//! Criterion benchmarks for the dashboard hot paths.
//!
//! Benchmarks:
//! 1. Seasonal decomposition over growing series
//! 2. Forecast merge for one line out of a multi-line table
//! 3. Chart spec construction for both charts

use chrono::{Months, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use salescast_core::analysis::{decompose, decompose_rows, DEFAULT_PERIOD};
use salescast_core::chart::{build_chart, layout};
use salescast_core::domain::{ForecastMethod, ForecastRecord, HistoryRow, ModelLine, TimeSeriesPoint};
use salescast_core::merge::merge;

// ── Helpers ──────────────────────────────────────────────────────────

const LINES: [&str; 6] = [
    "All_Models",
    "Porsche_Panamera",
    "Porsche_Cayenne",
    "Porsche_Boxster",
    "Porsche_Macan",
    "Porsche_Taycan",
];

fn month(i: usize) -> NaiveDate {
    NaiveDate::from_ymd_opt(2015, 1, 1).unwrap() + Months::new(i as u32)
}

fn make_values(n: usize) -> Vec<f64> {
    (0..n)
        .map(|i| 1000.0 + i as f64 * 2.5 + ((i % 12) as f64 * 0.52).sin() * 120.0)
        .collect()
}

fn make_history(months: usize) -> Vec<HistoryRow> {
    let values = make_values(months);
    LINES
        .iter()
        .flat_map(|line| {
            values.iter().enumerate().map(move |(i, &v)| HistoryRow {
                model_line: ModelLine::from(*line),
                period: month(i),
                value: v,
            })
        })
        .collect()
}

fn make_forecasts(start: usize, horizon: usize) -> Vec<ForecastRecord> {
    let mut out = Vec::new();
    for line in LINES {
        for method in ForecastMethod::ALL {
            for i in start..start + horizon {
                out.push(ForecastRecord {
                    model_line: line.into(),
                    method,
                    period: month(i),
                    value: 1000.0 + i as f64,
                });
            }
        }
    }
    out
}

// ── Benchmarks ───────────────────────────────────────────────────────

fn bench_decompose(c: &mut Criterion) {
    let mut group = c.benchmark_group("decompose");
    for n in [48usize, 240, 1200] {
        let values = make_values(n);
        let points: Vec<TimeSeriesPoint> = values
            .iter()
            .enumerate()
            .map(|(i, &v)| TimeSeriesPoint::new(month(i), v))
            .collect();

        group.bench_with_input(BenchmarkId::new("dated", n), &points, |b, points| {
            b.iter(|| decompose(black_box(points), DEFAULT_PERIOD).unwrap())
        });
        group.bench_with_input(BenchmarkId::new("rows", n), &values, |b, values| {
            b.iter(|| decompose_rows(black_box(values), DEFAULT_PERIOD).unwrap())
        });
    }
    group.finish();
}

fn bench_merge(c: &mut Criterion) {
    let mut group = c.benchmark_group("merge");
    let history = make_history(120);
    let forecasts = make_forecasts(120, 3);
    let line = ModelLine::from("Porsche_Macan");

    group.bench_function("one_line_all_methods", |b| {
        b.iter(|| {
            merge(
                black_box(&history),
                black_box(&forecasts),
                &line,
                ForecastMethod::ALL,
            )
            .unwrap()
        })
    });
    group.finish();
}

fn bench_charts(c: &mut Criterion) {
    let mut group = c.benchmark_group("charts");
    let history = make_history(120);
    let forecasts = make_forecasts(120, 3);
    let out = merge(&history, &forecasts, &"All_Models".into(), ForecastMethod::ALL).unwrap();
    let all: Vec<f64> = history.iter().map(|r| r.value).collect();
    let result = decompose_rows(&all, DEFAULT_PERIOD).unwrap();

    group.bench_function("comparison", |b| b.iter(|| build_chart(black_box(&out.merged))));
    group.bench_function("decomposition_720_rows", |b| b.iter(|| layout(black_box(&result))));
    group.finish();
}

criterion_group!(benches, bench_decompose, bench_merge, bench_charts);
criterion_main!(benches);
