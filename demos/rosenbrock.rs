//! Rosenbrock function without elitism, with self-adaptive mutation.
//!
//! The global minimum is at (1, 1).

use u_genetic::ga::{GeneticAlgorithm, GeneticConfig, GeneticError};

fn main() -> Result<(), GeneticError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let config: GeneticConfig = GeneticConfig::default()
        .with_population_size(60)
        .with_max_generations(2000)
        .with_shape(1, 2)
        .with_bounds(-5.0, 5.0)
        .with_tournament_size(2)
        .with_elitism(false)
        .with_auto_adaptation(true)
        .with_print_interval(50);

    let rosenbrock = |vectors: &[Vec<f64>]| -> f64 {
        let (x, y) = (vectors[0][0], vectors[0][1]);
        -((1.0 - x).powi(2) + 100.0 * (y - x * x).powi(2))
    };

    let mut ga = GeneticAlgorithm::new(config, rosenbrock)?;
    let result = ga.run();

    let best = &result.best_vectors[0];
    println!("best solution found: ({}, {})", best[0], best[1]);
    println!("expected: (1, 1)");
    if let Some(rate) = result.best.global_mutation_probability() {
        println!("evolved global mutation rate: {rate:.6}");
    }
    Ok(())
}
