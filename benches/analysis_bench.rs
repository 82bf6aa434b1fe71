//! Benchmarks for the feasibility analysis generator
//!
//! Run with: cargo bench

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};

use pulseboard::analysis::{generate, generate_all};
use pulseboard::feed::StdRandom;
use pulseboard::fixtures::seed_projects;
use pulseboard::model::FeasibilityMode;

fn bench_single_analysis(c: &mut Criterion) {
    let projects = seed_projects();
    let project = &projects[0];
    let mut rng = StdRandom::seeded(42);

    c.bench_function("generate_single", |b| {
        b.iter(|| generate(black_box(project), FeasibilityMode::Safe, &mut rng))
    });
}

fn bench_full_set(c: &mut Criterion) {
    let mut group = c.benchmark_group("generate_all");
    let projects = seed_projects();

    group.throughput(Throughput::Elements((projects.len() * 3) as u64));
    group.bench_function("fixture_projects", |b| {
        let mut rng = StdRandom::seeded(42);
        b.iter(|| generate_all(black_box(&projects), &mut rng))
    });

    // Scaled-up project set
    let many: Vec<_> = (0..100)
        .flat_map(|i| {
            projects.iter().cloned().map(move |mut p| {
                p.id = format!("{}-{}", p.id, i);
                p
            })
        })
        .collect();

    group.throughput(Throughput::Elements((many.len() * 3) as u64));
    group.bench_function("400_projects", |b| {
        let mut rng = StdRandom::seeded(42);
        b.iter(|| generate_all(black_box(&many), &mut rng))
    });

    group.finish();
}

criterion_group!(benches, bench_single_analysis, bench_full_set);
criterion_main!(benches);
