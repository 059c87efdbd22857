//! # Ensemble Benchmarks
//!
//! Measures state ingestion: vector and matrix validation, ensemble
//! construction with and without explicit probabilities.
//!
//! Run: `cargo bench --bench ensemble_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qex_core::prelude::*;

/// Benchmark per-state validation
fn bench_state_validation(c: &mut Criterion) {
    let mut group = c.benchmark_group("state_validation");
    let tol = Tolerances::default();

    let vector = BellState::PsiMinus.vector();
    group.bench_function("from_vector", |b| {
        b.iter(|| black_box(QuantumState::from_vector(black_box(&vector), &tol)))
    });

    let density = BellState::PsiMinus.density();
    group.bench_function("from_matrix", |b| {
        b.iter(|| black_box(QuantumState::from_matrix(black_box(density.clone()), &tol)))
    });

    group.finish();
}

/// Benchmark ensemble construction by size
fn bench_ensemble(c: &mut Criterion) {
    let mut group = c.benchmark_group("ensemble_new");
    let tol = Tolerances::default();

    for dim in [2usize, 4, 8] {
        let states: Vec<CVector> = (0..dim).map(|i| basis(dim, i)).collect();
        group.bench_with_input(BenchmarkId::new("uniform", dim), &states, |b, states| {
            b.iter(|| black_box(Ensemble::new(states.clone(), None, &tol)))
        });

        let p = vec![1.0 / dim as f64; dim];
        group.bench_with_input(BenchmarkId::new("explicit", dim), &states, |b, states| {
            b.iter(|| black_box(Ensemble::new(states.clone(), Some(&p[..]), &tol)))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_state_validation, bench_ensemble);
criterion_main!(benches);
