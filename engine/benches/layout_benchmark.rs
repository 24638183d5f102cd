use std::hint::black_box;

use chrono::{Duration, NaiveDate};
use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};

use siteline_engine::algorithms::axis::axis_buckets;
use siteline_engine::algorithms::layout::clip_to_window;
use siteline_engine::core::domain::{DateRange, Granularity, TimelineWindow};
use siteline_engine::services::timeline::compute_timeline_data;
use siteline_engine::store::sample;

fn bench_clip_to_window(c: &mut Criterion) {
    let mut group = c.benchmark_group("layout");

    let window = TimelineWindow::year(2025);
    let base = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let ranges: Vec<DateRange> = (0..1000)
        .map(|i| {
            let start = base + Duration::days(i % 700);
            DateRange::new(start, start + Duration::days(30 + (i % 200)))
        })
        .collect();

    group.bench_function("clip_1000_ranges", |b| {
        b.iter(|| {
            for range in &ranges {
                black_box(clip_to_window(black_box(range), black_box(&window)));
            }
        });
    });

    group.finish();
}

fn bench_axis_buckets(c: &mut Criterion) {
    let mut group = c.benchmark_group("axis");

    let window = TimelineWindow::year(2025);
    for granularity in [Granularity::Month, Granularity::Quarter, Granularity::Week] {
        group.bench_with_input(
            BenchmarkId::new("buckets", format!("{:?}", granularity)),
            &granularity,
            |b, g| {
                b.iter(|| black_box(axis_buckets(black_box(&window), *g)));
            },
        );
    }

    group.finish();
}

fn bench_full_timeline(c: &mut Criterion) {
    let mut group = c.benchmark_group("timeline");

    let projects = sample::sample_projects();
    let shutdowns = sample::sample_shutdowns();
    let window = TimelineWindow::year(2025);
    let today = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();

    group.bench_function("sample_portfolio", |b| {
        b.iter(|| {
            black_box(compute_timeline_data(
                black_box(&projects),
                black_box(&shutdowns),
                black_box(&window),
                Granularity::Month,
                today,
            ))
        });
    });

    group.finish();
}

criterion_group!(
    benches,
    bench_clip_to_window,
    bench_axis_buckets,
    bench_full_timeline
);
criterion_main!(benches);
