//! Performance benchmarks for the analytics module
//!
//! Targets:
//! - aggregate_categories(1000 events) -> <5ms
//! - aggregate_by_umbrella(1000 events) -> <5ms
//! - aggregate_trends(1000 events, 365 days) -> <5ms

use chrono::{Duration, Utc};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use habitboard_core::analytics::{
    aggregate_by_umbrella_with, aggregate_categories, aggregate_trends, AnalyticsData, Period,
    RollupMode,
};
use habitboard_core::validation::TagValidator;
use habitboard_core::{HabitEvent, Taxonomy};

const TAG_SETS: &[&[&str]] = &[
    &["food", "cooking"],
    &["food", "grocery", "restock"],
    &["health", "exercise"],
    &["home", "laundry", "cleaning"],
    &["transportation", "public-transit", "cost-saving"],
    &["learning"],
];

/// Generate test events for benchmarking
fn generate_test_events(count: usize, days: usize) -> Vec<HabitEvent> {
    let now = Utc::now().fixed_offset();
    (0..count)
        .map(|i| {
            let day_offset = (i % days) as i64;
            HabitEvent::new(
                format!("event-{}", i),
                format!("Activity {}", i),
                now - Duration::days(day_offset),
                15 + (i as u32 % 8) * 15,
                TAG_SETS[i % TAG_SETS.len()]
                    .iter()
                    .map(|t| t.to_string())
                    .collect(),
            )
        })
        .collect()
}

/// Benchmark 1: aggregate_categories with varying event counts
fn categories_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("aggregate_categories");

    for count in [10, 100, 1000] {
        let events = generate_test_events(count, 30);
        group.bench_with_input(BenchmarkId::new("events", count), &events, |b, events| {
            b.iter(|| {
                black_box(aggregate_categories(events));
            });
        });
    }

    group.finish();
}

/// Benchmark 2: umbrella rollup in both modes
fn rollup_benchmark(c: &mut Criterion) {
    let taxonomy = Taxonomy::baseline();
    let stats = aggregate_categories(&generate_test_events(1000, 30));
    let mut group = c.benchmark_group("aggregate_by_umbrella");

    for mode in [RollupMode::DistinctEvents, RollupMode::TagSum] {
        group.bench_with_input(BenchmarkId::new("mode", mode.label()), &mode, |b, mode| {
            b.iter(|| {
                black_box(aggregate_by_umbrella_with(&stats, taxonomy, *mode));
            });
        });
    }

    group.finish();
}

/// Benchmark 3: aggregate_trends with varying windows
fn trends_benchmark(c: &mut Criterion) {
    let events = generate_test_events(1000, 365);
    let mut group = c.benchmark_group("aggregate_trends");

    for days in [7u32, 30, 365] {
        group.bench_with_input(BenchmarkId::new("days", days), &days, |b, days| {
            b.iter(|| {
                black_box(aggregate_trends(&events, *days));
            });
        });
    }

    group.finish();
}

/// Benchmark 4: tag validation and suggestion
fn validation_benchmark(c: &mut Criterion) {
    let validator = TagValidator::baseline();
    let tags = ["food", "cooking", "Meal-Prep", "unknown-tag", "restock"];

    c.bench_function("validate", |b| {
        b.iter(|| {
            black_box(validator.validate(&tags));
        });
    });
    c.bench_function("suggest_tags", |b| {
        b.iter(|| {
            black_box(validator.suggest_tags("re", &["food"]));
        });
    });
}

/// Benchmark 5: Full analytics pipeline (AnalyticsData::compute)
fn full_pipeline_benchmark(c: &mut Criterion) {
    let taxonomy = Taxonomy::baseline();
    let mut group = c.benchmark_group("full_pipeline");

    for count in [100, 1000] {
        let events = generate_test_events(count, 30);
        group.bench_with_input(BenchmarkId::new("events", count), &events, |b, events| {
            b.iter(|| {
                black_box(AnalyticsData::compute(
                    events,
                    taxonomy,
                    Period::last_30d(),
                    RollupMode::default(),
                ));
            });
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    categories_benchmark,
    rollup_benchmark,
    trends_benchmark,
    validation_benchmark,
    full_pipeline_benchmark
);
criterion_main!(benches);
