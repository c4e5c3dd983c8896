//! Binary-encoded candidate solution.
//!
//! An [`Individual`] stores `number_of_vectors` chromosomes of `dimension`
//! genes each, optionally followed by `number_of_vectors + 1`
//! mutation-probability genes (one rate per vector plus a global rate).
//! Fitness is cached as an explicit [`Evaluation`] state which every gene
//! write resets.

use super::codec::Codec;
use super::config::GeneticConfig;
use super::types::{FitnessFunction, Gene, Real};
use rand::Rng;
use std::fmt;

/// Cached fitness state of an individual.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Evaluation<R: Real> {
    /// Genes changed since the last evaluation (or never evaluated).
    Unevaluated,
    /// Fitness of the current genes.
    Evaluated(R),
}

/// A candidate solution in the GA population.
///
/// Individuals are plain values: cloning duplicates genes and cache state,
/// nothing is shared between copies.
#[derive(Debug, Clone, PartialEq)]
pub struct Individual<R: Real, G: Gene> {
    codec: Codec<R>,
    chromosomes: Vec<Vec<G>>,
    mutation_genes: Vec<G>,
    evaluation: Evaluation<R>,
}

impl<R: Real, G: Gene> Individual<R, G> {
    /// Creates an individual whose genes are uniform in `[0, 2^bits - 1]`.
    ///
    /// Solution genes are drawn first, vector by vector, then the
    /// mutation-probability genes when auto-adaptation is enabled.
    pub fn random<Rn: Rng>(config: &GeneticConfig<R, G>, rng: &mut Rn) -> Self {
        let max_code = config.codec().max_code();
        let mut draw = || G::from_u64(rng.random_range(0..=max_code));

        let chromosomes: Vec<Vec<G>> = (0..config.number_of_vectors)
            .map(|_| (0..config.dimension).map(|_| draw()).collect())
            .collect();
        let mutation_genes: Vec<G> = (0..config.mutation_gene_count())
            .map(|_| draw())
            .collect();

        Self {
            codec: config.codec(),
            chromosomes,
            mutation_genes,
            evaluation: Evaluation::Unevaluated,
        }
    }

    /// Creates an individual from explicit genes.
    ///
    /// # Panics
    /// Panics if the chromosomes are empty or do not all have the same
    /// length, or if `mutation_genes` is neither empty nor one longer than
    /// the number of chromosomes.
    pub fn from_genes(codec: Codec<R>, chromosomes: Vec<Vec<G>>, mutation_genes: Vec<G>) -> Self {
        assert!(!chromosomes.is_empty(), "individual needs at least one chromosome");
        let dimension = chromosomes[0].len();
        assert!(
            chromosomes.iter().all(|c| c.len() == dimension),
            "chromosomes must have equal length"
        );
        assert!(
            mutation_genes.is_empty() || mutation_genes.len() == chromosomes.len() + 1,
            "expected {} mutation genes, got {}",
            chromosomes.len() + 1,
            mutation_genes.len()
        );
        Self {
            codec,
            chromosomes,
            mutation_genes,
            evaluation: Evaluation::Unevaluated,
        }
    }

    /// Codec used to decode solution genes.
    pub fn codec(&self) -> Codec<R> {
        self.codec
    }

    pub fn number_of_vectors(&self) -> usize {
        self.chromosomes.len()
    }

    pub fn dimension(&self) -> usize {
        self.chromosomes[0].len()
    }

    /// Whether the individual carries self-adaptive mutation genes.
    pub fn is_self_adaptive(&self) -> bool {
        !self.mutation_genes.is_empty()
    }

    /// Decodes every solution gene.
    ///
    /// The result has exactly `number_of_vectors × dimension` values.
    pub fn to_real_vectors(&self) -> Vec<Vec<R>> {
        self.chromosomes
            .iter()
            .map(|chromosome| chromosome.iter().map(|&g| self.codec.decode(g)).collect())
            .collect()
    }

    /// Genes of one chromosome.
    pub fn genes(&self, vector: usize) -> &[G] {
        &self.chromosomes[vector]
    }

    /// Returns one solution gene.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn gene(&self, vector: usize, component: usize) -> G {
        self.check_gene_index(vector, component);
        self.chromosomes[vector][component]
    }

    /// Overwrites one solution gene and invalidates the fitness cache.
    ///
    /// # Panics
    /// Panics if either index is out of range.
    pub fn set_gene(&mut self, vector: usize, component: usize, gene: G) {
        self.check_gene_index(vector, component);
        self.chromosomes[vector][component] = gene;
        self.evaluation = Evaluation::Unevaluated;
    }

    /// All mutation-probability genes; empty without auto-adaptation.
    pub fn mutation_genes(&self) -> &[G] {
        &self.mutation_genes
    }

    /// Returns one mutation-probability gene.
    ///
    /// Index `number_of_vectors` is the global rate.
    ///
    /// # Panics
    /// Panics if the index is out of range.
    pub fn mutation_gene(&self, index: usize) -> G {
        self.check_mutation_index(index);
        self.mutation_genes[index]
    }

    /// Overwrites one mutation-probability gene and invalidates the
    /// fitness cache.
    ///
    /// # Panics
    /// Panics if the index is out of range.
    pub fn set_mutation_gene(&mut self, index: usize, gene: G) {
        self.check_mutation_index(index);
        self.mutation_genes[index] = gene;
        self.evaluation = Evaluation::Unevaluated;
    }

    /// Decoded mutation probability for a vector, in `[0, 1]`.
    ///
    /// # Panics
    /// Panics if the index is out of range.
    pub fn mutation_probability(&self, index: usize) -> f64 {
        Codec::<f64>::unit(self.codec.bits()).decode(self.mutation_gene(index))
    }

    /// Decoded global mutation probability, if self-adaptive.
    pub fn global_mutation_probability(&self) -> Option<f64> {
        self.is_self_adaptive()
            .then(|| self.mutation_probability(self.number_of_vectors()))
    }

    /// All decoded mutation probabilities, per vector then global.
    pub fn mutation_probabilities(&self) -> Vec<f64> {
        let unit = Codec::<f64>::unit(self.codec.bits());
        self.mutation_genes.iter().map(|&g| unit.decode(g)).collect()
    }

    /// Cached fitness, if the current genes have been evaluated.
    pub fn fitness(&self) -> Option<R> {
        match self.evaluation {
            Evaluation::Evaluated(f) => Some(f),
            Evaluation::Unevaluated => None,
        }
    }

    pub fn evaluation(&self) -> Evaluation<R> {
        self.evaluation
    }

    /// Stores the fitness of the current genes.
    pub fn set_fitness(&mut self, fitness: R) {
        self.evaluation = Evaluation::Evaluated(fitness);
    }

    pub fn is_evaluated(&self) -> bool {
        matches!(self.evaluation, Evaluation::Evaluated(_))
    }

    /// Drops the cached fitness.
    pub fn invalidate_fitness(&mut self) {
        self.evaluation = Evaluation::Unevaluated;
    }

    /// Returns the cached fitness, evaluating and caching it first if
    /// needed.
    pub fn evaluate<F: FitnessFunction<R> + ?Sized>(&mut self, fitness: &F) -> R {
        if let Evaluation::Evaluated(f) = self.evaluation {
            return f;
        }
        let f = fitness.evaluate(&self.to_real_vectors());
        self.evaluation = Evaluation::Evaluated(f);
        f
    }

    fn check_gene_index(&self, vector: usize, component: usize) {
        assert!(
            vector < self.chromosomes.len(),
            "vector index {vector} out of range for {} vectors",
            self.chromosomes.len()
        );
        assert!(
            component < self.chromosomes[vector].len(),
            "component index {component} out of range for dimension {}",
            self.chromosomes[vector].len()
        );
    }

    fn check_mutation_index(&self, index: usize) {
        assert!(
            index < self.mutation_genes.len(),
            "mutation gene index {index} out of range for {} genes",
            self.mutation_genes.len()
        );
    }
}

impl<R: Real, G: Gene> fmt::Display for Individual<R, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, vector) in self.to_real_vectors().iter().enumerate() {
            let values: Vec<String> = vector.iter().map(|v| v.to_string()).collect();
            writeln!(f, "  vector {i}: [{}]", values.join(", "))?;
        }
        if self.is_self_adaptive() {
            let rates: Vec<String> = self
                .mutation_probabilities()
                .iter()
                .map(|p| format!("{p:.6}"))
                .collect();
            writeln!(f, "  mutation rates: [{}]", rates.join(", "))?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn config() -> GeneticConfig<f64, u16> {
        GeneticConfig::default()
            .with_shape(2, 3)
            .with_integer_bits(10)
            .with_bounds(-1.0, 1.0)
    }

    #[test]
    fn test_random_shape() {
        let mut rng = StdRng::seed_from_u64(42);
        let ind = Individual::random(&config(), &mut rng);
        assert_eq!(ind.number_of_vectors(), 2);
        assert_eq!(ind.dimension(), 3);
        assert_eq!(ind.mutation_genes().len(), 3);
        assert!(!ind.is_evaluated());

        let vectors = ind.to_real_vectors();
        assert_eq!(vectors.len(), 2);
        assert!(vectors.iter().all(|v| v.len() == 3));
        assert!(vectors.iter().flatten().all(|&x| (-1.0..=1.0).contains(&x)));
    }

    #[test]
    fn test_random_genes_respect_bit_width() {
        let mut rng = StdRng::seed_from_u64(1);
        for _ in 0..50 {
            let ind = Individual::random(&config(), &mut rng);
            for v in 0..2 {
                assert!(ind.genes(v).iter().all(|&g| g < 1024));
            }
            assert!(ind.mutation_genes().iter().all(|&g| g < 1024));
        }
    }

    #[test]
    fn test_no_mutation_genes_without_auto_adaptation() {
        let mut rng = StdRng::seed_from_u64(42);
        let ind = Individual::random(&config().with_auto_adaptation(false), &mut rng);
        assert!(!ind.is_self_adaptive());
        assert!(ind.global_mutation_probability().is_none());
        assert!(ind.mutation_probabilities().is_empty());
    }

    #[test]
    fn test_decoding_explicit_genes() {
        let codec = Codec::new(-1.0, 1.0, 10);
        let ind: Individual<f64, u16> =
            Individual::from_genes(codec, vec![vec![0, 1023], vec![1023, 0]], vec![0, 1023, 1023]);
        assert_eq!(ind.to_real_vectors(), vec![vec![-1.0, 1.0], vec![1.0, -1.0]]);
        assert_eq!(ind.mutation_probability(0), 0.0);
        assert_eq!(ind.mutation_probability(1), 1.0);
        assert_eq!(ind.global_mutation_probability(), Some(1.0));
        assert_eq!(ind.mutation_probabilities(), vec![0.0, 1.0, 1.0]);
    }

    #[test]
    fn test_gene_write_invalidates_cache() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut ind = Individual::random(&config(), &mut rng);

        ind.set_fitness(5.0);
        assert!(ind.is_evaluated());
        assert_eq!(ind.fitness(), Some(5.0));

        ind.set_gene(1, 2, 7);
        assert_eq!(ind.gene(1, 2), 7);
        assert_eq!(ind.evaluation(), Evaluation::Unevaluated);

        ind.set_fitness(6.0);
        ind.set_mutation_gene(2, 9);
        assert_eq!(ind.mutation_gene(2), 9);
        assert!(ind.fitness().is_none());

        ind.set_fitness(1.0);
        ind.invalidate_fitness();
        assert!(!ind.is_evaluated());
    }

    #[test]
    fn test_evaluate_uses_cache() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut ind = Individual::random(&config(), &mut rng);
        let calls = AtomicUsize::new(0);
        let fitness = |v: &[Vec<f64>]| {
            calls.fetch_add(1, Ordering::Relaxed);
            v.iter().flatten().sum::<f64>()
        };

        let first = ind.evaluate(&fitness);
        let second = ind.evaluate(&fitness);
        assert_eq!(first, second);
        assert_eq!(ind.fitness(), Some(first));
        assert_eq!(calls.load(Ordering::Relaxed), 1);

        ind.set_gene(0, 0, 0);
        ind.evaluate(&fitness);
        assert_eq!(calls.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_clone_is_independent() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut original = Individual::random(&config(), &mut rng);
        original.set_fitness(2.0);
        let mut copy = original.clone();
        copy.set_gene(0, 0, 0);
        copy.set_gene(0, 1, 0);

        assert!(original.is_evaluated());
        assert!(!copy.is_evaluated());
        assert_eq!(original.fitness(), Some(2.0));
    }

    #[test]
    #[should_panic(expected = "component index 3 out of range")]
    fn test_gene_out_of_range_panics() {
        let mut rng = StdRng::seed_from_u64(5);
        let ind = Individual::random(&config(), &mut rng);
        ind.gene(0, 3);
    }

    #[test]
    #[should_panic(expected = "vector index 2 out of range")]
    fn test_set_gene_out_of_range_panics() {
        let mut rng = StdRng::seed_from_u64(5);
        let mut ind = Individual::random(&config(), &mut rng);
        ind.set_gene(2, 0, 1);
    }

    #[test]
    #[should_panic(expected = "mutation gene index 3 out of range")]
    fn test_mutation_gene_out_of_range_panics() {
        let mut rng = StdRng::seed_from_u64(5);
        let ind = Individual::random(&config(), &mut rng);
        ind.mutation_gene(3);
    }

    #[test]
    fn test_display_lists_vectors() {
        let codec = Codec::new(0.0, 1.0, 8);
        let ind: Individual<f64, u8> = Individual::from_genes(codec, vec![vec![0, 255]], vec![]);
        assert_eq!(ind.to_string(), "  vector 0: [0, 1]\n");
    }
}
