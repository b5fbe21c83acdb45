//! Benchmarks for the grid engine and wave pipeline.
//!
//! Run with: `cargo bench --bench wave_field_bench`
//!
//! Covers the distance transform, fractal noise synthesis and the
//! per-frame Gerstner displacement at typical display resolutions.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use shorewave::{
    distance_transform, fbm_perlin, FbmConfig, GerstnerWaveField, Shape2D, WaterDepthField,
};

const SIZES: [usize; 2] = [128, 256];

fn bench_distance_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("distance_transform");

    for n in SIZES {
        let depth = WaterDepthField::new(Shape2D::square(n));
        group.bench_with_input(BenchmarkId::from_parameter(n), &depth, |b, depth| {
            b.iter(|| distance_transform(black_box(depth.h())));
        });
    }
    group.finish();
}

fn bench_fbm(c: &mut Criterion) {
    let mut group = c.benchmark_group("fbm_perlin");
    let config = FbmConfig::default();

    for n in SIZES {
        let shape = Shape2D::square(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &shape, |b, &shape| {
            b.iter(|| fbm_perlin(black_box(shape), black_box(&config)));
        });
    }
    group.finish();
}

fn bench_wave_update(c: &mut Criterion) {
    let mut group = c.benchmark_group("wave_update");

    for n in SIZES {
        let depth = WaterDepthField::new(Shape2D::square(n));
        let mut waves = GerstnerWaveField::new(depth.h());
        group.bench_with_input(BenchmarkId::from_parameter(n), &depth, |b, depth| {
            b.iter(|| waves.update(black_box(depth.h())));
        });
    }
    group.finish();
}

fn bench_wave_generate(c: &mut Criterion) {
    let mut group = c.benchmark_group("wave_generate");

    for n in SIZES {
        let depth = WaterDepthField::new(Shape2D::square(n));
        let mut waves = GerstnerWaveField::new(depth.h());
        let mut t = 0.0f32;
        group.bench_with_input(BenchmarkId::from_parameter(n), &depth, |b, depth| {
            b.iter(|| {
                t += 0.016;
                waves.generate(black_box(depth.h()), black_box(t)).unwrap();
            });
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_distance_transform,
    bench_fbm,
    bench_wave_update,
    bench_wave_generate
);
criterion_main!(benches);
