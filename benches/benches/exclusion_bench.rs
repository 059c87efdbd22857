//! # Exclusion Benchmarks
//!
//! Measures the barrier backend end to end: Bell ensembles, random-phase
//! qutrit states and the single-state fast path.
//!
//! Run: `cargo bench --bench exclusion_bench`

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use qex_core::prelude::*;
use qex_exclusion::ExclusionSolver;

/// |ψ_k⟩ = Σ_j e^{i·k·j²} |j⟩ / √d
fn phase_states(dim: usize, count: usize) -> Vec<CVector> {
    let norm = 1.0 / (dim as f64).sqrt();
    (0..count)
        .map(|k| {
            CVector::from_iterator(
                dim,
                (0..dim).map(|j| c(0.0, (k * j * j) as f64).exp() * norm),
            )
        })
        .collect()
}

/// Benchmark Bell ensembles of increasing size
fn bench_bell(c: &mut Criterion) {
    let mut group = c.benchmark_group("exclusion_bell");
    group.sample_size(20);
    let solver = ExclusionSolver::new();

    for n in [2usize, 3, 4] {
        let states: Vec<CVector> = (0..n).filter_map(bell).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &states, |b, states| {
            b.iter(|| black_box(solver.probability(states.clone(), None)))
        });
    }

    group.finish();
}

/// Benchmark by state dimension
fn bench_dimension(c: &mut Criterion) {
    let mut group = c.benchmark_group("exclusion_dimension");
    group.sample_size(10);
    let solver = ExclusionSolver::new();

    for dim in [2usize, 3, 4] {
        let states = phase_states(dim, 3);
        group.bench_with_input(BenchmarkId::from_parameter(dim), &states, |b, states| {
            b.iter(|| black_box(solver.probability(states.clone(), None)))
        });
    }

    group.finish();
}

/// Benchmark the single-state shortcut
fn bench_fast_path(c: &mut Criterion) {
    let solver = ExclusionSolver::new();
    let states = vec![BellState::PhiPlus.vector()];

    c.bench_function("exclusion_fast_path", |b| {
        b.iter(|| black_box(solver.probability(states.clone(), None)))
    });
}

criterion_group!(benches, bench_bell, bench_dimension, bench_fast_path);
criterion_main!(benches);
