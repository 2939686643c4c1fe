//! Benchmarks for clique enumeration and the nearness pipeline.
//!
//! Enumeration dominates MCE nearness runtime; the engines are compared on
//! the same seeded random graphs so regressions in any one of them show up
//! against the others.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};

use propinquity::enumerate::{self, enumerate_iterative};
use propinquity::idset::IdSet;
use propinquity::messaging::{self, EngineParams};
use propinquity::nearness::{NearnessParams, run_mce};
use propinquity::synthetic::{clustered_objects, random_graph};

fn bench_enumerators(c: &mut Criterion) {
    let mut group = c.benchmark_group("maximal_cliques");

    for &n in [16, 32, 64].iter() {
        let graph = random_graph(n, 0.2, 42);

        group.bench_with_input(BenchmarkId::new("recursive", n), &graph, |b, g| {
            b.iter(|| enumerate::maximal_cliques(black_box(g)));
        });

        group.bench_with_input(BenchmarkId::new("iterative", n), &graph, |b, g| {
            b.iter(|| {
                let mut cliques: Vec<IdSet> = Vec::new();
                enumerate_iterative(black_box(g), |c| cliques.push(*c));
                cliques
            });
        });

        group.bench_with_input(BenchmarkId::new("messaging", n), &graph, |b, g| {
            let params = EngineParams {
                max_iterations: 100_000,
                singletons: true,
            };
            b.iter(|| messaging::maximal_cliques(black_box(g), params).unwrap());
        });
    }

    group.finish();
}

fn bench_nearness(c: &mut Criterion) {
    let mut group = c.benchmark_group("nearness_mce");
    group.sample_size(10);

    let sets = clustered_objects(8, 24, 4, 0.05, 7);
    for &threads in [1usize, 4].iter() {
        let params = NearnessParams {
            epsilon: 0.3,
            num_features: 4,
            singletons: false,
            threads,
        };
        group.bench_with_input(
            BenchmarkId::from_parameter(threads),
            &threads,
            |b, _| {
                b.iter(|| run_mce(black_box(&sets.objects), params).unwrap());
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_enumerators, bench_nearness);
criterion_main!(benches);
