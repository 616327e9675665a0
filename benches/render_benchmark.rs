//! Benchmark for map document rendering.

#![allow(clippy::unwrap_used)]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;
use trueno_map::prelude::*;

fn render_benchmark(c: &mut Criterion) {
    let mut group = c.benchmark_group("render_document");

    for size in [10, 100, 1_000] {
        let lats: Vec<f64> = (0..size).map(|i| 37.0 + f64::from(i) * 0.001).collect();
        let lngs: Vec<f64> = (0..size).map(|i| -122.0 - f64::from(i) * 0.001).collect();

        let mut map = MapPlotter::new(37.0, -122.0, 12);
        map.scatter(&lats, &lngs, &StyleOptions::new().c("#3B0B39"), false, Some(0.0001));
        map.plot(&lats, &lngs, &StyleOptions::new().ew(3.0));
        map.heatmap(&lats, &lngs, HeatmapStyle::default());

        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
            b.iter(|| black_box(&map).render().unwrap());
        });
    }

    group.finish();
}

fn circle_benchmark(c: &mut Criterion) {
    c.bench_function("approximate_circle", |b| {
        b.iter(|| {
            trueno_map::geometry::approximate_circle(black_box(LatLng::new(37.0, -122.0)), black_box(0.001))
        });
    });
}

criterion_group!(benches, render_benchmark, circle_benchmark);
criterion_main!(benches);
