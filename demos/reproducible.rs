//! Two runs with the same seed produce the same result.

use u_genetic::ga::{GeneticAlgorithm, GeneticConfig, GeneticError};

fn main() -> Result<(), GeneticError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config: GeneticConfig = GeneticConfig::default()
        .with_population_size(60)
        .with_max_generations(30)
        .with_seed(12345);
    let fitness = |vectors: &[Vec<f64>]| -> f64 { vectors[0][0] + vectors[0][1] };

    let first = GeneticAlgorithm::new(config.clone(), fitness)?.run();
    let second = GeneticAlgorithm::new(config, fitness)?.run();

    println!("run 1 best fitness: {}", first.best_fitness);
    println!("run 2 best fitness: {}", second.best_fitness);
    println!(
        "results identical: {}",
        if first.fitness_history == second.fitness_history { "yes" } else { "no" }
    );
    Ok(())
}
