//! # Structural Check Benchmarks
//!
//! Measures Schmidt rank (reshape and realignment) and MUB checks on
//! Fourier bases.
//!
//! Run: `cargo bench --bench props_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qex_core::prelude::*;
use qex_props::{is_mub, schmidt_rank};

fn fourier(dim: usize) -> Vec<CVector> {
    let omega = std::f64::consts::TAU / dim as f64;
    let norm = 1.0 / (dim as f64).sqrt();
    (0..dim)
        .map(|k| {
            CVector::from_iterator(dim, (0..dim).map(|j| c(0.0, omega * (j * k) as f64).exp() * norm))
        })
        .collect()
}

/// Benchmark Schmidt rank for vector and matrix inputs
fn bench_schmidt(c: &mut Criterion) {
    let mut group = c.benchmark_group("schmidt_rank");
    let tol = Tolerances::default();

    let vector = StateInput::FromVector(BellState::PhiPlus.vector());
    group.bench_function("bell_vector", |b| {
        b.iter(|| black_box(schmidt_rank(black_box(&vector), None, &tol)))
    });

    let matrix = StateInput::FromMatrix(BellState::PhiPlus.density());
    group.bench_function("bell_density", |b| {
        b.iter(|| black_box(schmidt_rank(black_box(&matrix), None, &tol)))
    });

    group.finish();
}

/// Benchmark MUB check: computational vs Fourier basis
fn bench_mub(c: &mut Criterion) {
    let mut group = c.benchmark_group("is_mub");
    let tol = Tolerances::default();

    for dim in [2usize, 4, 8, 16] {
        let bases = vec![(0..dim).map(|i| basis(dim, i)).collect(), fourier(dim)];
        group.bench_with_input(BenchmarkId::from_parameter(dim), &bases, |b, bases| {
            b.iter(|| black_box(is_mub(bases, &tol)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_schmidt, bench_mub);
criterion_main!(benches);
