//! GA evolutionary loop execution.
//!
//! [`GeneticAlgorithm`] owns the population, the best-ever record and the
//! single random source. One generation ([`GeneticAlgorithm::step`]) runs:
//! selection → elitism snapshot → offspring → mutation → elite
//! reinsertion → best-tracking.
//!
//! Random draws happen in a fixed order (initialization, tournament
//! indices, shuffles and crossover draws, mutation draws, elite slot), so
//! a seeded run is reproducible. Fitness evaluation never draws random
//! numbers and may run in parallel without affecting results.

use super::config::GeneticConfig;
use super::error::Result;
use super::individual::Individual;
use super::operators::{crossover, mutate};
use super::selection::tournament_pool;
use super::types::{FitnessFunction, Gene, Real};
use log::{debug, info, trace};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Result of a GA optimization run.
#[derive(Debug, Clone)]
pub struct RunResult<R: Real, G: Gene> {
    /// The best individual found since construction or the last reset.
    pub best: Individual<R, G>,

    /// Fitness of `best`.
    pub best_fitness: R,

    /// `best` decoded to real vectors.
    pub best_vectors: Vec<Vec<R>>,

    /// Number of generations executed by this run.
    pub generations: usize,

    /// Whether the run was cancelled externally.
    pub cancelled: bool,

    /// Best-ever fitness after initialization and after every generation.
    pub fitness_history: Vec<f64>,
}

/// Binary-encoded genetic algorithm maximizing a [`FitnessFunction`].
///
/// # Usage
///
/// ```
/// use u_genetic::ga::{GeneticAlgorithm, GeneticConfig};
///
/// let config: GeneticConfig = GeneticConfig::default()
///     .with_population_size(40)
///     .with_max_generations(30)
///     .with_seed(42);
/// let sphere = |v: &[Vec<f64>]| -> f64 { -v.iter().flatten().map(|x| x * x).sum::<f64>() };
///
/// let mut ga = GeneticAlgorithm::new(config, sphere).unwrap();
/// let result = ga.run();
/// assert_eq!(result.generations, 30);
/// assert!(result.best_fitness <= 0.0);
/// ```
pub struct GeneticAlgorithm<R: Real, G: Gene, F: FitnessFunction<R>> {
    config: GeneticConfig<R, G>,
    fitness: F,
    rng: StdRng,
    population: Vec<Individual<R, G>>,
    generation: usize,
    best_fitness: R,
    best_individual: Individual<R, G>,
    fitness_history: Vec<f64>,
}

impl<R: Real, G: Gene, F: FitnessFunction<R>> GeneticAlgorithm<R, G, F> {
    /// Validates the configuration, seeds the random source and creates
    /// and evaluates the initial population.
    ///
    /// # Errors
    /// Returns [`GeneticError::InvalidConfig`](super::GeneticError::InvalidConfig)
    /// if the configuration is invalid.
    pub fn new(config: GeneticConfig<R, G>, fitness: F) -> Result<Self> {
        config.validate()?;

        let mut rng = create_rng(config.seed);
        let mut population = initial_population(&config, &mut rng);
        evaluate_all(&mut population, &fitness, config.parallel);
        let best_individual = population[0].clone();

        let mut ga = Self {
            config,
            fitness,
            rng,
            population,
            generation: 0,
            best_fitness: R::lowest(),
            best_individual,
            fitness_history: Vec::new(),
        };
        ga.update_best();
        ga.fitness_history.push(ga.best_fitness.to_f64());

        debug!(
            "initialized population of {} (seed: {:?}), best fitness {}",
            ga.config.population_size, ga.config.seed, ga.best_fitness
        );
        Ok(ga)
    }

    /// Replaces the configuration and restarts from a fresh population.
    ///
    /// The random source is reseeded from the new configuration, the
    /// generation counter and the best-ever record are cleared.
    ///
    /// # Errors
    /// Returns an error, leaving the current state untouched, if the new
    /// configuration is invalid.
    pub fn reset(&mut self, config: GeneticConfig<R, G>) -> Result<()> {
        config.validate()?;

        self.rng = create_rng(config.seed);
        self.population = initial_population(&config, &mut self.rng);
        self.config = config;
        evaluate_all(&mut self.population, &self.fitness, self.config.parallel);
        self.generation = 0;
        self.best_fitness = R::lowest();
        self.best_individual = self.population[0].clone();
        self.fitness_history.clear();
        self.update_best();
        self.fitness_history.push(self.best_fitness.to_f64());

        debug!("reset to a new population of {}", self.config.population_size);
        Ok(())
    }

    /// Runs `max_generations` generations.
    pub fn run(&mut self) -> RunResult<R, G> {
        self.run_with_cancel(|_, _, _| {}, None)
    }

    /// Runs `max_generations` generations, calling `callback` after each
    /// with the zero-based generation index, the best-ever fitness and the
    /// best-ever individual.
    pub fn run_with_callback<C>(&mut self, callback: C) -> RunResult<R, G>
    where
        C: FnMut(usize, R, &Individual<R, G>),
    {
        self.run_with_cancel(callback, None)
    }

    /// Runs with a callback and an optional cancellation token.
    ///
    /// If `cancel` is `Some` and the flag is set to `true`, the run stops
    /// before the next generation and returns the best solution found so
    /// far.
    pub fn run_with_cancel<C>(
        &mut self,
        mut callback: C,
        cancel: Option<Arc<AtomicBool>>,
    ) -> RunResult<R, G>
    where
        C: FnMut(usize, R, &Individual<R, G>),
    {
        info!("starting genetic algorithm\n{}", self.config);

        let max_generations = self.config.max_generations;
        let mut generations = 0;
        let mut cancelled = false;

        for gen in 0..max_generations {
            if let Some(ref flag) = cancel {
                if flag.load(Ordering::Relaxed) {
                    cancelled = true;
                    break;
                }
            }

            self.step();
            generations += 1;

            if gen % self.config.print_interval == 0 || gen + 1 == max_generations {
                self.log_progress(gen, max_generations);
            }

            callback(self.generation - 1, self.best_fitness, &self.best_individual);
        }

        if cancelled {
            info!("cancelled after {generations} generations");
        }
        info!("final best fitness: {}", self.best_fitness);
        info!("best individual:\n{}", self.best_individual);

        RunResult {
            best: self.best_individual.clone(),
            best_fitness: self.best_fitness,
            best_vectors: self.best_individual.to_real_vectors(),
            generations,
            cancelled,
            fitness_history: self.fitness_history.clone(),
        }
    }

    /// Executes one generation.
    pub fn step(&mut self) {
        let mut selected = self.selection();

        if self.config.enable_elitism {
            self.update_best();
        }

        self.create_offspring(&mut selected);
        self.mutate_population();

        if self.config.enable_elitism {
            self.add_best();
        }

        self.update_best();

        self.generation += 1;
        self.fitness_history.push(self.best_fitness.to_f64());
        trace!(
            "generation {} done, best fitness {}",
            self.generation,
            self.best_fitness
        );
    }

    /// Best fitness found since construction or the last reset.
    pub fn best_fitness(&self) -> R {
        self.best_fitness
    }

    /// Snapshot of the best individual, independent of the population.
    pub fn best_individual(&self) -> &Individual<R, G> {
        &self.best_individual
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn population(&self) -> &[Individual<R, G>] {
        &self.population
    }

    pub fn config(&self) -> &GeneticConfig<R, G> {
        &self.config
    }

    /// Best-ever fitness after initialization and after every generation.
    pub fn fitness_history(&self) -> &[f64] {
        &self.fitness_history
    }

    /// Tournament selection of half a population.
    fn selection(&mut self) -> Vec<Individual<R, G>> {
        tournament_pool(
            &mut self.population,
            self.config.half_population_size(),
            self.config.tournament_size,
            &self.fitness,
            &mut self.rng,
        )
    }

    /// Replaces the population with two rounds of shuffled pairwise
    /// crossover of the selected pool.
    ///
    /// An odd pool pairs its last individual with the first one of the
    /// shuffled pool and keeps only the first child of that pair, so each
    /// round yields exactly `pool.len()` offspring.
    fn create_offspring(&mut self, selected: &mut [Individual<R, G>]) {
        let half = selected.len();
        let mut next = Vec::with_capacity(self.config.population_size);

        for _ in 0..2 {
            selected.shuffle(&mut self.rng);
            for i in (0..half).step_by(2) {
                let (child1, child2) = crossover(
                    &selected[i],
                    &selected[(i + 1) % half],
                    &self.config,
                    &mut self.rng,
                );
                next.push(child1);
                if i + 1 < half {
                    next.push(child2);
                }
            }
        }

        self.population = next;
    }

    fn mutate_population(&mut self) {
        for ind in &mut self.population {
            mutate(ind, &self.config, &mut self.rng);
        }
    }

    /// Overwrites one random slot with the best-ever snapshot.
    fn add_best(&mut self) {
        let idx = self.rng.random_range(0..self.population.len());
        self.population[idx] = self.best_individual.clone();
    }

    /// Evaluates the population and records any strict improvement.
    fn update_best(&mut self) {
        evaluate_all(&mut self.population, &self.fitness, self.config.parallel);

        for ind in &self.population {
            if let Some(f) = ind.fitness() {
                if f > self.best_fitness {
                    self.best_fitness = f;
                    self.best_individual = ind.clone();
                }
            }
        }
    }

    fn log_progress(&self, gen: usize, max_generations: usize) {
        let rates = self.best_individual.mutation_probabilities();
        if rates.is_empty() {
            info!(
                "generation {}/{} - best fitness: {}",
                gen + 1,
                max_generations,
                self.best_fitness
            );
        } else {
            info!(
                "generation {}/{} - best fitness: {} - mutation rates: {:?}",
                gen + 1,
                max_generations,
                self.best_fitness,
                rates
            );
        }
    }
}

fn create_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::seed_from_u64(rand::random()),
    }
}

fn initial_population<R: Real, G: Gene>(
    config: &GeneticConfig<R, G>,
    rng: &mut StdRng,
) -> Vec<Individual<R, G>> {
    (0..config.population_size)
        .map(|_| Individual::random(config, rng))
        .collect()
}

/// Evaluate every individual whose fitness is not cached.
#[cfg(feature = "parallel")]
fn evaluate_all<R: Real, G: Gene, F: FitnessFunction<R>>(
    population: &mut [Individual<R, G>],
    fitness: &F,
    parallel: bool,
) {
    use rayon::prelude::*;

    if parallel {
        population.par_iter_mut().for_each(|ind| {
            ind.evaluate(fitness);
        });
    } else {
        for ind in population.iter_mut() {
            ind.evaluate(fitness);
        }
    }
}

/// Evaluate every individual whose fitness is not cached.
#[cfg(not(feature = "parallel"))]
fn evaluate_all<R: Real, G: Gene, F: FitnessFunction<R>>(
    population: &mut [Individual<R, G>],
    fitness: &F,
    _parallel: bool,
) {
    for ind in population.iter_mut() {
        ind.evaluate(fitness);
    }
}

// ============================================================================
// Tests
// ============================================================================
