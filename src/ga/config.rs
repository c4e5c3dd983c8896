//! GA configuration.
//!
//! [`GeneticConfig`] holds all parameters that control the evolutionary
//! loop and the binary encoding of candidate solutions.

use super::codec::Codec;
use super::error::{GeneticError, Result};
use super::types::{Gene, Real};
use std::fmt;
use std::marker::PhantomData;

/// Bit-level recombination operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CrossoverMethod {
    /// One random cut point over the concatenated bits of a chromosome.
    ///
    /// Bits below the cut come from the same-side parent, bits above it
    /// from the other parent.
    #[default]
    SinglePointBitLevel,

    /// Every bit is drawn independently.
    ///
    /// Child 1 keeps parent 1's bit with probability
    /// `uniform_crossover_probability`, otherwise takes parent 2's bit;
    /// child 2 always receives the complementary bit.
    UniformBitLevel,
}

impl fmt::Display for CrossoverMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CrossoverMethod::SinglePointBitLevel => f.write_str("single-point bit-level"),
            CrossoverMethod::UniformBitLevel => f.write_str("uniform bit-level"),
        }
    }
}

/// Configuration for the binary-encoded Genetic Algorithm.
///
/// `R` is the real type candidates decode to and fitness is expressed in;
/// `G` is the unsigned integer type storing each gene.
///
/// # Defaults
///
/// ```
/// use u_genetic::ga::GeneticConfig;
///
/// let config: GeneticConfig = GeneticConfig::default();
/// assert_eq!(config.population_size, 100);
/// assert_eq!(config.integer_bits, 32);
/// assert!(config.validate().is_ok());
/// ```
///
/// # Builder Pattern
///
/// ```
/// use u_genetic::ga::{CrossoverMethod, GeneticConfig};
///
/// let config = GeneticConfig::<f32, u16>::default()
///     .with_population_size(40)
///     .with_bounds(-5.0, 5.0)
///     .with_integer_bits(12)
///     .with_crossover_method(CrossoverMethod::UniformBitLevel)
///     .with_seed(7);
/// assert!(config.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GeneticConfig<R: Real = f64, G: Gene = u32> {
    /// Number of individuals in the population. Must be even and non-zero.
    pub population_size: usize,

    /// Number of generations executed by a full run.
    pub max_generations: usize,

    /// Number of real vectors making up one candidate.
    pub number_of_vectors: usize,

    /// Number of components in each vector.
    pub dimension: usize,

    /// Significant bits per gene, at most the bit width of `G`.
    pub integer_bits: u32,

    /// Lower encoding bound.
    pub min_real: R,

    /// Upper encoding bound. Must be greater than `min_real`.
    pub max_real: R,

    /// Number of draws per tournament (with replacement).
    pub tournament_size: usize,

    /// Reinject the best-ever individual into every new population.
    pub enable_elitism: bool,

    /// Evolve per-vector mutation rates alongside the solution.
    pub enable_auto_adaptation: bool,

    /// Per-bit flip probability when auto-adaptation is disabled.
    pub initial_mutation_probability: f64,

    /// Probability that a child inherits the same-side parent's bit
    /// under [`CrossoverMethod::UniformBitLevel`].
    pub uniform_crossover_probability: f64,

    /// Recombination operator.
    pub crossover_method: CrossoverMethod,

    /// Generations between two progress log lines.
    pub print_interval: usize,

    /// Random seed for reproducibility.
    ///
    /// `None` uses a random seed.
    pub seed: Option<u64>,

    /// Whether to evaluate pending individuals in parallel using rayon.
    ///
    /// Only effective with the `parallel` feature. Evaluation never draws
    /// random numbers, so results do not depend on this flag.
    pub parallel: bool,

    #[cfg_attr(feature = "serde", serde(skip))]
    _gene: PhantomData<G>,
}

impl<R: Real, G: Gene> Default for GeneticConfig<R, G> {
    fn default() -> Self {
        Self {
            population_size: 100,
            max_generations: 100,
            number_of_vectors: 1,
            dimension: 2,
            integer_bits: G::BITS,
            min_real: R::from_f64(-10.0),
            max_real: R::from_f64(10.0),
            tournament_size: 3,
            enable_elitism: true,
            enable_auto_adaptation: true,
            initial_mutation_probability: 0.01,
            uniform_crossover_probability: 0.5,
            crossover_method: CrossoverMethod::default(),
            print_interval: 10,
            seed: None,
            parallel: false,
            _gene: PhantomData,
        }
    }
}

impl<R: Real, G: Gene> GeneticConfig<R, G> {
    /// Sets the population size.
    pub fn with_population_size(mut self, n: usize) -> Self {
        self.population_size = n;
        self
    }

    /// Sets the number of generations.
    pub fn with_max_generations(mut self, n: usize) -> Self {
        self.max_generations = n;
        self
    }

    /// Sets the candidate shape: `vectors` vectors of `dimension` components.
    pub fn with_shape(mut self, vectors: usize, dimension: usize) -> Self {
        self.number_of_vectors = vectors;
        self.dimension = dimension;
        self
    }

    /// Sets the significant bits per gene.
    pub fn with_integer_bits(mut self, bits: u32) -> Self {
        self.integer_bits = bits;
        self
    }

    /// Sets the encoding bounds.
    pub fn with_bounds(mut self, min: R, max: R) -> Self {
        self.min_real = min;
        self.max_real = max;
        self
    }

    /// Sets the tournament size.
    pub fn with_tournament_size(mut self, k: usize) -> Self {
        self.tournament_size = k;
        self
    }

    /// Enables or disables elitism.
    pub fn with_elitism(mut self, enabled: bool) -> Self {
        self.enable_elitism = enabled;
        self
    }

    /// Enables or disables self-adaptive mutation rates.
    pub fn with_auto_adaptation(mut self, enabled: bool) -> Self {
        self.enable_auto_adaptation = enabled;
        self
    }

    /// Sets the fixed per-bit mutation probability.
    pub fn with_mutation_probability(mut self, p: f64) -> Self {
        self.initial_mutation_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the uniform crossover bit-inheritance probability.
    pub fn with_uniform_crossover_probability(mut self, p: f64) -> Self {
        self.uniform_crossover_probability = p.clamp(0.0, 1.0);
        self
    }

    /// Sets the crossover operator.
    pub fn with_crossover_method(mut self, method: CrossoverMethod) -> Self {
        self.crossover_method = method;
        self
    }

    /// Sets the progress logging interval.
    pub fn with_print_interval(mut self, n: usize) -> Self {
        self.print_interval = n;
        self
    }

    /// Sets the random seed for reproducibility.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Enables or disables parallel evaluation.
    pub fn with_parallel(mut self, parallel: bool) -> Self {
        self.parallel = parallel;
        self
    }

    /// Size of the tournament-selected breeding pool.
    pub fn half_population_size(&self) -> usize {
        self.population_size / 2
    }

    /// Number of mutation-probability genes per individual.
    ///
    /// One per vector plus a global rate, or none without auto-adaptation.
    pub fn mutation_gene_count(&self) -> usize {
        if self.enable_auto_adaptation {
            self.number_of_vectors + 1
        } else {
            0
        }
    }

    /// Codec for solution genes.
    pub fn codec(&self) -> Codec<R> {
        Codec::new(self.min_real, self.max_real, self.integer_bits)
    }

    /// Validates the configuration.
    ///
    /// Returns [`GeneticError::InvalidConfig`] describing the first
    /// parameter found out of bounds.
    pub fn validate(&self) -> Result<()> {
        let invalid = |msg: &str| -> Result<()> { Err(GeneticError::InvalidConfig(msg.into())) };

        let min = self.min_real.to_f64();
        let max = self.max_real.to_f64();
        if !min.is_finite() || !max.is_finite() {
            return invalid("min_real and max_real must be finite");
        }
        if min >= max {
            return invalid("min_real must be less than max_real");
        }
        if self.population_size == 0 {
            return invalid("population_size must be at least 2");
        }
        if self.population_size % 2 != 0 {
            return invalid("population_size must be even");
        }
        if self.tournament_size == 0 {
            return invalid("tournament_size must be at least 1");
        }
        if self.tournament_size > self.population_size {
            return invalid("tournament_size must not exceed population_size");
        }
        if self.integer_bits == 0 {
            return invalid("integer_bits must be at least 1");
        }
        if self.integer_bits > G::BITS {
            return Err(GeneticError::InvalidConfig(format!(
                "integer_bits ({}) exceeds the {}-bit gene type",
                self.integer_bits,
                G::BITS
            )));
        }
        if self.number_of_vectors == 0 {
            return invalid("number_of_vectors must be at least 1");
        }
        if self.dimension == 0 {
            return invalid("dimension must be at least 1");
        }
        if !(0.0..=1.0).contains(&self.initial_mutation_probability) {
            return invalid("initial_mutation_probability must be within [0, 1]");
        }
        if !(0.0..=1.0).contains(&self.uniform_crossover_probability) {
            return invalid("uniform_crossover_probability must be within [0, 1]");
        }
        if self.print_interval == 0 {
            return invalid("print_interval must be at least 1");
        }
        Ok(())
    }
}

impl<R: Real, G: Gene> fmt::Display for GeneticConfig<R, G> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Genetic algorithm configuration:")?;
        writeln!(f, "  population size:       {}", self.population_size)?;
        writeln!(f, "  max generations:       {}", self.max_generations)?;
        writeln!(
            f,
            "  shape:                 {} x {}",
            self.number_of_vectors, self.dimension
        )?;
        writeln!(
            f,
            "  encoding:              {} bits over [{}, {}]",
            self.integer_bits, self.min_real, self.max_real
        )?;
        writeln!(f, "  tournament size:       {}", self.tournament_size)?;
        writeln!(f, "  crossover:             {}", self.crossover_method)?;
        if self.crossover_method == CrossoverMethod::UniformBitLevel {
            writeln!(
                f,
                "  uniform crossover p:   {}",
                self.uniform_crossover_probability
            )?;
        }
        writeln!(f, "  elitism:               {}", self.enable_elitism)?;
        if self.enable_auto_adaptation {
            writeln!(f, "  mutation:              self-adaptive")
        } else {
            writeln!(
                f,
                "  mutation probability:  {}",
                self.initial_mutation_probability
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_config() -> GeneticConfig<f64, u32> {
        GeneticConfig::default()
    }

    #[test]
    fn test_default_config() {
        let config = default_config();
        assert_eq!(config.population_size, 100);
        assert_eq!(config.max_generations, 100);
        assert_eq!(config.number_of_vectors, 1);
        assert_eq!(config.dimension, 2);
        assert_eq!(config.integer_bits, 32);
        assert_eq!(config.min_real, -10.0);
        assert_eq!(config.max_real, 10.0);
        assert_eq!(config.tournament_size, 3);
        assert!(config.enable_elitism);
        assert!(config.enable_auto_adaptation);
        assert_eq!(config.crossover_method, CrossoverMethod::SinglePointBitLevel);
        assert!(config.seed.is_none());
        assert!(!config.parallel);
    }

    #[test]
    fn test_default_bits_follow_gene_type() {
        assert_eq!(GeneticConfig::<f64, u8>::default().integer_bits, 8);
        assert_eq!(GeneticConfig::<f32, u16>::default().integer_bits, 16);
        assert_eq!(GeneticConfig::<f64, u64>::default().integer_bits, 64);
    }

    #[test]
    fn test_builder_pattern() {
        let config = default_config()
            .with_population_size(60)
            .with_max_generations(2000)
            .with_shape(2, 3)
            .with_integer_bits(16)
            .with_bounds(-5.0, 5.0)
            .with_tournament_size(2)
            .with_elitism(false)
            .with_auto_adaptation(false)
            .with_mutation_probability(0.05)
            .with_uniform_crossover_probability(0.7)
            .with_crossover_method(CrossoverMethod::UniformBitLevel)
            .with_print_interval(50)
            .with_seed(42)
            .with_parallel(true);

        assert_eq!(config.population_size, 60);
        assert_eq!(config.max_generations, 2000);
        assert_eq!(config.number_of_vectors, 2);
        assert_eq!(config.dimension, 3);
        assert_eq!(config.integer_bits, 16);
        assert_eq!(config.min_real, -5.0);
        assert_eq!(config.max_real, 5.0);
        assert_eq!(config.tournament_size, 2);
        assert!(!config.enable_elitism);
        assert!(!config.enable_auto_adaptation);
        assert!((config.initial_mutation_probability - 0.05).abs() < 1e-12);
        assert!((config.uniform_crossover_probability - 0.7).abs() < 1e-12);
        assert_eq!(config.crossover_method, CrossoverMethod::UniformBitLevel);
        assert_eq!(config.print_interval, 50);
        assert_eq!(config.seed, Some(42));
        assert!(config.parallel);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_clamp_probabilities() {
        let config = default_config()
            .with_mutation_probability(1.5)
            .with_uniform_crossover_probability(-0.5);
        assert_eq!(config.initial_mutation_probability, 1.0);
        assert_eq!(config.uniform_crossover_probability, 0.0);
    }

    #[test]
    fn test_validate_ok() {
        assert!(default_config().validate().is_ok());
    }

    #[test]
    fn test_validate_odd_population() {
        let config = default_config().with_population_size(101);
        assert!(matches!(
            config.validate(),
            Err(GeneticError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_validate_zero_population() {
        let config = default_config().with_population_size(0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_inverted_bounds() {
        let config = default_config().with_bounds(10.0, -10.0);
        assert!(config.validate().is_err());

        let config = default_config().with_bounds(3.0, 3.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_non_finite_bounds() {
        let config = default_config().with_bounds(f64::NEG_INFINITY, 0.0);
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_tournament_size() {
        assert!(default_config().with_tournament_size(0).validate().is_err());
        assert!(default_config()
            .with_tournament_size(101)
            .validate()
            .is_err());
        assert!(default_config()
            .with_tournament_size(100)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_integer_bits() {
        let err = default_config().with_integer_bits(33).validate().unwrap_err();
        assert!(err.to_string().contains("33"));
        assert!(default_config().with_integer_bits(0).validate().is_err());
        assert!(GeneticConfig::<f64, u16>::default()
            .with_integer_bits(17)
            .validate()
            .is_err());
        assert!(GeneticConfig::<f64, u64>::default()
            .with_integer_bits(64)
            .validate()
            .is_ok());
    }

    #[test]
    fn test_validate_shape() {
        assert!(default_config().with_shape(0, 2).validate().is_err());
        assert!(default_config().with_shape(2, 0).validate().is_err());
    }

    #[test]
    fn test_validate_print_interval() {
        assert!(default_config().with_print_interval(0).validate().is_err());
    }

    #[test]
    fn test_mutation_gene_count() {
        let config = default_config().with_shape(3, 2);
        assert_eq!(config.mutation_gene_count(), 4);
        assert_eq!(
            config.with_auto_adaptation(false).mutation_gene_count(),
            0
        );
    }

    #[test]
    fn test_display_mentions_parameters() {
        let text = default_config().with_population_size(64).to_string();
        assert!(text.contains("population size:       64"));
        assert!(text.contains("self-adaptive"));
    }
}
