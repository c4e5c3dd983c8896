//! Tournament selection.
//!
//! Fills the breeding pool by repeatedly sampling `k` individuals with
//! replacement and keeping the fittest. Fitness is evaluated lazily: an
//! individual is scored the first time it takes part in a tournament and
//! its cached value is reused afterwards.
//!
//! # References
//!
//! - Miller & Goldberg (1995), "Genetic Algorithms, Tournament Selection,
//!   and the Effects of Noise"

use super::individual::Individual;
use super::types::{FitnessFunction, Gene, Real};
use rand::Rng;

/// Runs one tournament and returns the winner's index.
///
/// All `k` indices are drawn first, then compared in draw order; the
/// winner has the strictly greatest fitness, ties keep the first-drawn
/// maximum.
///
/// # Panics
/// Panics if `population` is empty or `k` is zero.
pub fn tournament<R, G, F, Rn>(
    population: &mut [Individual<R, G>],
    k: usize,
    fitness: &F,
    rng: &mut Rn,
) -> usize
where
    R: Real,
    G: Gene,
    F: FitnessFunction<R> + ?Sized,
    Rn: Rng,
{
    assert!(
        !population.is_empty(),
        "cannot select from empty population"
    );
    assert!(k > 0, "tournament size must be at least 1");

    let n = population.len();
    let draws: Vec<usize> = (0..k).map(|_| rng.random_range(0..n)).collect();

    let mut best_idx = draws[0];
    let mut best_fitness = population[best_idx].evaluate(fitness);
    for &idx in &draws[1..] {
        let f = population[idx].evaluate(fitness);
        if f > best_fitness {
            best_fitness = f;
            best_idx = idx;
        }
    }
    best_idx
}

/// Builds a breeding pool of `size` tournament winners.
///
/// Winners are copied; the population is left untouched apart from its
/// fitness caches.
pub fn tournament_pool<R, G, F, Rn>(
    population: &mut [Individual<R, G>],
    size: usize,
    k: usize,
    fitness: &F,
    rng: &mut Rn,
) -> Vec<Individual<R, G>>
where
    R: Real,
    G: Gene,
    F: FitnessFunction<R> + ?Sized,
    Rn: Rng,
{
    (0..size)
        .map(|_| {
            let idx = tournament(population, k, fitness, rng);
            population[idx].clone()
        })
        .collect()
}
