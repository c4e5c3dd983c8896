//! Criterion benchmarks for the binary-encoded GA.
//!
//! Uses synthetic objectives (Sphere, Rastrigin) to measure pure
//! algorithm overhead across encodings and operators.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use u_genetic::ga::operators::{crossover, mutate};
use u_genetic::ga::{CrossoverMethod, GeneticAlgorithm, GeneticConfig, Individual};

// ===========================================================================
// Objectives (negated for maximization)
// ===========================================================================

fn sphere(v: &[Vec<f64>]) -> f64 {
    -v.iter().flatten().map(|x| x * x).sum::<f64>()
}

fn rastrigin(v: &[Vec<f64>]) -> f64 {
    let two_pi = 2.0 * std::f64::consts::PI;
    -v.iter()
        .flatten()
        .map(|x| 10.0 + x * x - 10.0 * (two_pi * x).cos())
        .sum::<f64>()
}

// ===========================================================================
// Benchmarks
// ===========================================================================

fn bench_ga_sphere(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_sphere");
    group.sample_size(10);

    for (dim, pop, gen) in [(2usize, 50usize, 50usize), (10, 100, 30), (50, 100, 20)] {
        let config: GeneticConfig = GeneticConfig::default()
            .with_shape(1, dim)
            .with_population_size(pop)
            .with_max_generations(gen)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::new(format!("d{}_p{}_g{}", dim, pop, gen), dim),
            &config,
            |b, config| {
                b.iter(|| {
                    let mut ga = GeneticAlgorithm::new(config.clone(), sphere)
                        .expect("valid benchmark config");
                    black_box(ga.run())
                })
            },
        );
    }
    group.finish();
}

fn bench_ga_rastrigin(c: &mut Criterion) {
    let mut group = c.benchmark_group("ga_rastrigin");
    group.sample_size(10);

    for method in [CrossoverMethod::SinglePointBitLevel, CrossoverMethod::UniformBitLevel] {
        let config: GeneticConfig = GeneticConfig::default()
            .with_shape(2, 5)
            .with_bounds(-5.12, 5.12)
            .with_integer_bits(20)
            .with_crossover_method(method)
            .with_max_generations(30)
            .with_seed(42);
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("{method:?}")),
            &config,
            |b, config| {
                b.iter(|| {
                    let mut ga = GeneticAlgorithm::new(config.clone(), rastrigin)
                        .expect("valid benchmark config");
                    black_box(ga.run())
                })
            },
        );
    }
    group.finish();
}

fn bench_operators(c: &mut Criterion) {
    let mut group = c.benchmark_group("operators");

    let config: GeneticConfig<f64, u64> = GeneticConfig::default().with_shape(4, 16);
    let mut rng = StdRng::seed_from_u64(42);
    let p1 = Individual::random(&config, &mut rng);
    let p2 = Individual::random(&config, &mut rng);

    for method in [CrossoverMethod::SinglePointBitLevel, CrossoverMethod::UniformBitLevel] {
        let config = config.clone().with_crossover_method(method);
        group.bench_function(format!("crossover_{method:?}"), |b| {
            b.iter(|| black_box(crossover(&p1, &p2, &config, &mut rng)))
        });
    }

    group.bench_function("mutate_self_adaptive", |b| {
        let mut ind = p1.clone();
        b.iter(|| mutate(black_box(&mut ind), &config, &mut rng))
    });
    group.finish();
}

criterion_group!(benches, bench_ga_sphere, bench_ga_rastrigin, bench_operators);
criterion_main!(benches);
