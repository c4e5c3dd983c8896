//! Drive the sum of two 3-d vectors to zero.
//!
//! Run with `cargo run --example simple`; set `RUST_LOG=debug` for more.

use u_genetic::ga::{GeneticAlgorithm, GeneticConfig, GeneticError};

fn main() -> Result<(), GeneticError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config: GeneticConfig = GeneticConfig::default()
        .with_population_size(100)
        .with_max_generations(100)
        .with_shape(2, 3)
        .with_bounds(-1000.0, 1000.0)
        .with_auto_adaptation(false)
        .with_mutation_probability(0.05);

    // maximize -(sum)^2
    let fitness = |vectors: &[Vec<f64>]| -> f64 {
        let sum: f64 = vectors.iter().flatten().sum();
        -(sum * sum)
    };

    let mut ga = GeneticAlgorithm::new(config, fitness)?;
    let result = ga.run();

    println!("best fitness: {}", result.best_fitness);
    println!("best vectors: {:?}", result.best_vectors);
    Ok(())
}
