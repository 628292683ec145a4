//! Benchmarks for the snapshot diff engine and suppression pipeline.
//!
//! Benchmarks cover:
//! - Snapshot construction from raw listings
//! - Diffing identical and churned snapshots of increasing size
//! - Filtering a tick's changes through job watch options

#![allow(missing_docs)]

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use slurm_watch::api::{Job, WatchJobsOptions};
use slurm_watch::core::{admit, diff, Snapshot, WatchedResource};
use slurm_watch::watch::Jobs;

// ============================================================================
// Listing generation
// ============================================================================

const STATES: [&str; 4] = ["PENDING", "RUNNING", "SUSPENDED", "COMPLETED"];

fn listing(size: usize, shift: usize) -> Vec<Job> {
    (0..size)
        .map(|i| {
            let state = STATES[(i / 7 + shift) % STATES.len()];
            Job::new(format!("{i:08}"), state).with_user(format!("{}", 1000 + i % 16), "user")
        })
        .collect()
}

fn snapshot(jobs: Vec<Job>) -> Snapshot<String, Job> {
    Snapshot::from_items(jobs, Jobs::key, Jobs::state)
}

// ============================================================================
// Benchmarks
// ============================================================================

fn bench_snapshot_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("snapshot_build");
    for size in [100, 1_000, 10_000] {
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, &size| {
            b.iter_batched(
                || listing(size, 0),
                |jobs| black_box(snapshot(jobs)),
                criterion::BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

fn bench_diff(c: &mut Criterion) {
    let mut group = c.benchmark_group("diff");
    for size in [100, 1_000, 10_000] {
        let base = snapshot(listing(size, 0));
        let churned = snapshot(listing(size, 1));
        group.throughput(Throughput::Elements(size as u64));

        group.bench_with_input(BenchmarkId::new("identical", size), &size, |b, _| {
            b.iter(|| black_box(diff(black_box(&base), black_box(&base))));
        });
        group.bench_with_input(BenchmarkId::new("churned", size), &size, |b, _| {
            b.iter(|| black_box(diff(black_box(&base), black_box(&churned))));
        });
    }
    group.finish();
}

fn bench_admit(c: &mut Criterion) {
    let base = snapshot(listing(10_000, 0));
    let churned = snapshot(listing(10_000, 1));
    let changes = diff(&base, &churned);
    let options = WatchJobsOptions {
        user_id: Some("1003".into()),
        exclude_completed: true,
        ..WatchJobsOptions::default()
    };
    let suppression = Jobs::suppression(&options);

    c.bench_function("admit_10k_changes", |b| {
        b.iter(|| {
            changes
                .iter()
                .filter(|change| admit::<Jobs>(&options, &suppression, change))
                .count()
        });
    });
}

criterion_group!(benches, bench_snapshot_build, bench_diff, bench_admit);
criterion_main!(benches);
