// Benchmarks for the surrogate selection engine
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::prelude::*;
use surrosel::{BaselineSimulator, EmbeddingPopulation, SimulationConfig, Strategy, SurrogateSelector};

fn generate_population(n: usize, dim: usize) -> EmbeddingPopulation {
    let mut rng = rand::rng();
    EmbeddingPopulation::new(
        (0..n).map(|i| format!("DTXSID{:06}", i)).collect(),
        (0..n)
            .map(|_| (0..dim).map(|_| rng.random_range(-1.0..1.0)).collect())
            .collect(),
    )
    .unwrap()
}

fn benchmark_score(c: &mut Criterion) {
    let mut group = c.benchmark_group("lard_score");

    for size in [100, 1000, 5000].iter() {
        let selector = SurrogateSelector::new(generate_population(*size, 8));
        let subset: Vec<usize> = (0..size / 10).collect();
        group.bench_with_input(BenchmarkId::new("10pct", size), size, |b, _| {
            b.iter(|| black_box(selector.score(black_box(&subset)).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_hierarchical(c: &mut Criterion) {
    let mut group = c.benchmark_group("hierarchical");
    group.sample_size(10); // Fewer samples for large datasets

    for size in [100, 500, 2000].iter() {
        let selector = SurrogateSelector::new(generate_population(*size, 8));
        group.bench_with_input(BenchmarkId::new("ward_20pct", size), size, |b, &size| {
            b.iter(|| black_box(selector.select(size / 5, Strategy::Hierarchical).unwrap()));
        });
    }

    group.finish();
}

fn benchmark_simulation(c: &mut Criterion) {
    let mut group = c.benchmark_group("simulation");
    group.sample_size(10);

    let selector = SurrogateSelector::new(generate_population(1000, 8));
    let sizes = [10, 100, 200, 500];

    for parallel in [false, true] {
        let config = SimulationConfig {
            repetitions: 100,
            parallel,
        };
        let name = if parallel { "parallel" } else { "sequential" };
        group.bench_function(name, |b| {
            b.iter(|| {
                let result = BaselineSimulator::with_config(&selector, config)
                    .run(black_box(&sizes))
                    .unwrap();
                black_box(result);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_score, benchmark_hierarchical, benchmark_simulation);
criterion_main!(benches);
