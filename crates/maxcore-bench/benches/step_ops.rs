//! Criterion micro-benchmarks for the state transition.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use maxcore_bench::{guarded_steady_profile, steady_forcing, steady_profile, PROFILE_DT};
use maxcore_engine::MaxCore;

/// Benchmark: committed step at several forcing dimensions.
fn bench_step_by_dimension(c: &mut Criterion) {
    let mut group = c.benchmark_group("step");
    for dim in [2usize, 64, 1024] {
        let delta = steady_forcing(dim);
        let mut core = MaxCore::new(steady_profile(dim)).unwrap();
        group.bench_with_input(BenchmarkId::from_parameter(dim), &delta, |b, delta| {
            b.iter(|| black_box(core.step(Some(black_box(delta.as_slice())), PROFILE_DT)));
        });
    }
    group.finish();
}

/// Benchmark: committed step with a binding magnitude guard.
fn bench_step_guarded(c: &mut Criterion) {
    let delta = steady_forcing(64);
    let mut core = MaxCore::new(guarded_steady_profile(64)).unwrap();
    c.bench_function("step_guarded_64", |b| {
        b.iter(|| black_box(core.step(Some(black_box(delta.as_slice())), PROFILE_DT)));
    });
}

/// Benchmark: rejected step (unstable dt), the cheapest error path after
/// shape checks.
fn bench_step_rejected(c: &mut Criterion) {
    let delta = steady_forcing(64);
    let mut core = MaxCore::new(steady_profile(64)).unwrap();
    c.bench_function("step_rejected_unstable_dt", |b| {
        b.iter(|| black_box(core.try_step(Some(black_box(delta.as_slice())), black_box(10.0))));
    });
}

criterion_group!(
    benches,
    bench_step_by_dimension,
    bench_step_guarded,
    bench_step_rejected
);
criterion_main!(benches);
