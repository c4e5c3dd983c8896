//! Per-generation callback with a narrow `f32`/`u16` encoding.

use u_genetic::ga::{CrossoverMethod, GeneticAlgorithm, GeneticConfig, GeneticError};

fn main() -> Result<(), GeneticError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config: GeneticConfig<f32, u16> = GeneticConfig::default()
        .with_population_size(40)
        .with_max_generations(50)
        .with_shape(1, 3)
        .with_bounds(-10.0, 10.0)
        .with_integer_bits(16)
        .with_crossover_method(CrossoverMethod::UniformBitLevel);
    let interval = 10;

    // maximize the sum of absolute values
    let fitness = |vectors: &[Vec<f32>]| -> f32 { vectors.iter().flatten().map(|x| x.abs()).sum() };

    let mut ga = GeneticAlgorithm::new(config, fitness)?;
    let mut reports = 0;
    let result = ga.run_with_callback(|gen, best, _| {
        if gen % interval == 0 {
            println!("  [callback] gen {gen} - fitness: {best}");
            reports += 1;
        }
    });

    println!("callback reported {reports} times");
    println!("best fitness: {}", result.best_fitness);
    println!("best individual:\n{}", result.best);
    Ok(())
}
