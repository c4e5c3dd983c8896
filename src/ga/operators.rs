//! Bit-level genetic operators.
//!
//! Crossover and mutation for binary-encoded individuals. Both operate on
//! the `integer_bits` significant bits of every gene and never change the
//! number or width of genes.
//!
//! # Crossover Operators
//!
//! - [`single_point_bit_level`]: one cut over the concatenated gene bits
//! - [`uniform_bit_level`]: independent per-bit inheritance
//!
//! Both are applied per chromosome (each with its own random draws) and,
//! for self-adaptive individuals, once more to the mutation-probability
//! genes. See [`crossover`].
//!
//! # Mutation
//!
//! - [`mutate`]: per-bit flips at a fixed or self-adaptive rate
//!
//! # References
//!
//! - Syswerda (1989), "Uniform Crossover in Genetic Algorithms"
//! - Bäck (1992), "Self-Adaptation in Genetic Algorithms"

use super::config::{CrossoverMethod, GeneticConfig};
use super::individual::Individual;
use super::types::{low_mask, Gene, Real};
use rand::Rng;

// ============================================================================
// Crossover operators
// ============================================================================

/// Single-point bit-level crossover of two gene sequences.
///
/// `cut` indexes the concatenated bits, `cut < genes * bits`. With
/// `k = cut / bits` and `k' = cut % bits`:
///
/// - genes before `k` pass through unchanged (child 1 from parent 1,
///   child 2 from parent 2),
/// - gene `k` takes its low `k'` bits from the same-side parent and the
///   remaining high bits from the other parent,
/// - genes after `k` are swapped between the children.
///
/// # Panics
/// Panics if the parents have different lengths or `cut` is out of range.
pub fn single_point_bit_level<G: Gene>(
    parent1: &[G],
    parent2: &[G],
    bits: u32,
    cut: usize,
) -> (Vec<G>, Vec<G>) {
    let n = parent1.len();
    assert_eq!(n, parent2.len(), "parents must have equal length");
    assert!(
        cut < n * bits as usize,
        "cut point {cut} out of range for {n} genes of {bits} bits"
    );

    let k = cut / bits as usize;
    let k_prime = (cut % bits as usize) as u32;

    let mut child1 = Vec::with_capacity(n);
    let mut child2 = Vec::with_capacity(n);
    child1.extend_from_slice(&parent1[..k]);
    child2.extend_from_slice(&parent2[..k]);

    let low = low_mask(k_prime);
    let high = low_mask(bits) & !low;
    let g1 = parent1[k].to_u64();
    let g2 = parent2[k].to_u64();
    child1.push(G::from_u64((g1 & low) | (g2 & high)));
    child2.push(G::from_u64((g2 & low) | (g1 & high)));

    child1.extend_from_slice(&parent2[k + 1..]);
    child2.extend_from_slice(&parent1[k + 1..]);

    (child1, child2)
}

/// Uniform bit-level crossover of two gene sequences.
///
/// For every bit of every gene (low bit first) a uniform `[0, 1)` value
/// is drawn: if it is `<= probability` child 1 inherits parent 1's bit
/// and child 2 parent 2's, otherwise the assignment swaps.
///
/// # Panics
/// Panics if the parents have different lengths.
pub fn uniform_bit_level<G: Gene, Rn: Rng>(
    parent1: &[G],
    parent2: &[G],
    bits: u32,
    probability: f64,
    rng: &mut Rn,
) -> (Vec<G>, Vec<G>) {
    uniform_bit_level_with(parent1, parent2, bits, probability, || rng.random::<f64>())
}

/// [`uniform_bit_level`] with an explicit draw source.
fn uniform_bit_level_with<G: Gene>(
    parent1: &[G],
    parent2: &[G],
    bits: u32,
    probability: f64,
    mut draw: impl FnMut() -> f64,
) -> (Vec<G>, Vec<G>) {
    assert_eq!(parent1.len(), parent2.len(), "parents must have equal length");

    parent1
        .iter()
        .zip(parent2)
        .map(|(g1, g2)| {
            let (g1, g2) = (g1.to_u64(), g2.to_u64());
            let mut c1 = 0u64;
            let mut c2 = 0u64;
            for bit in 0..bits {
                let mask = 1u64 << bit;
                if draw() <= probability {
                    c1 |= g1 & mask;
                    c2 |= g2 & mask;
                } else {
                    c1 |= g2 & mask;
                    c2 |= g1 & mask;
                }
            }
            (G::from_u64(c1), G::from_u64(c2))
        })
        .unzip()
}

/// Recombines one gene sequence with the configured operator.
fn recombine<R: Real, G: Gene, Rn: Rng>(
    parent1: &[G],
    parent2: &[G],
    config: &GeneticConfig<R, G>,
    rng: &mut Rn,
) -> (Vec<G>, Vec<G>) {
    let bits = config.integer_bits;
    match config.crossover_method {
        CrossoverMethod::SinglePointBitLevel => {
            let cut = rng.random_range(0..parent1.len() * bits as usize);
            single_point_bit_level(parent1, parent2, bits, cut)
        }
        CrossoverMethod::UniformBitLevel => uniform_bit_level(
            parent1,
            parent2,
            bits,
            config.uniform_crossover_probability,
            rng,
        ),
    }
}

/// Produces two children from two parents.
///
/// Each chromosome is recombined independently, in vector order; then,
/// when the parents carry mutation-probability genes, those are
/// recombined as one more sequence. Both children come back unevaluated.
///
/// # Panics
/// Panics if the parents differ in shape.
pub fn crossover<R: Real, G: Gene, Rn: Rng>(
    parent1: &Individual<R, G>,
    parent2: &Individual<R, G>,
    config: &GeneticConfig<R, G>,
    rng: &mut Rn,
) -> (Individual<R, G>, Individual<R, G>) {
    assert_eq!(
        parent1.number_of_vectors(),
        parent2.number_of_vectors(),
        "parents must have the same number of vectors"
    );
    assert_eq!(
        parent1.mutation_genes().len(),
        parent2.mutation_genes().len(),
        "parents must have the same number of mutation genes"
    );

    let mut child1 = parent1.clone();
    let mut child2 = parent2.clone();

    for v in 0..parent1.number_of_vectors() {
        let (genes1, genes2) = recombine(parent1.genes(v), parent2.genes(v), config, rng);
        for (i, (g1, g2)) in genes1.into_iter().zip(genes2).enumerate() {
            child1.set_gene(v, i, g1);
            child2.set_gene(v, i, g2);
        }
    }

    if parent1.is_self_adaptive() {
        let (genes1, genes2) = recombine(
            parent1.mutation_genes(),
            parent2.mutation_genes(),
            config,
            rng,
        );
        for (k, (g1, g2)) in genes1.into_iter().zip(genes2).enumerate() {
            child1.set_mutation_gene(k, g1);
            child2.set_mutation_gene(k, g2);
        }
    }

    child1.invalidate_fitness();
    child2.invalidate_fitness();
    (child1, child2)
}

// ============================================================================
// Mutation operator
// ============================================================================

/// Flips each of the low `bits` bits of `gene` with probability `rate`.
fn flip_bits<G: Gene, Rn: Rng>(gene: G, bits: u32, rate: f64, rng: &mut Rn) -> G {
    let mut value = gene.to_u64();
    for bit in 0..bits {
        if rng.random::<f64>() < rate {
            value ^= 1u64 << bit;
        }
    }
    G::from_u64(value)
}

/// Per-bit mutation.
///
/// Every bit of every solution gene of vector `v` flips with probability
/// `initial_mutation_probability`, or, for self-adaptive individuals, with
/// the individual's own decoded rate for `v`. The mutation-probability
/// genes of a self-adaptive individual then flip at its global rate.
/// The fitness cache is always invalidated.
pub fn mutate<R: Real, G: Gene, Rn: Rng>(
    individual: &mut Individual<R, G>,
    config: &GeneticConfig<R, G>,
    rng: &mut Rn,
) {
    let bits = config.integer_bits;

    for v in 0..individual.number_of_vectors() {
        let rate = if individual.is_self_adaptive() {
            individual.mutation_probability(v)
        } else {
            config.initial_mutation_probability
        };
        for c in 0..individual.dimension() {
            let gene = flip_bits(individual.gene(v, c), bits, rate, rng);
            individual.set_gene(v, c, gene);
        }
    }

    if let Some(global) = individual.global_mutation_probability() {
        for k in 0..individual.mutation_genes().len() {
            let gene = flip_bits(individual.mutation_gene(k), bits, global, rng);
            individual.set_mutation_gene(k, gene);
        }
    }

    individual.invalidate_fitness();
}

// ============================================================================
// Tests
// ============================================================================
