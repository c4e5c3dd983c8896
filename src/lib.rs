//! Binary-encoded genetic algorithm for real-valued maximization.
//!
//! Provides a generic GA over fixed-width integer genes:
//!
//! - **Codec**: uniform quantization of bounded reals into `integer_bits`
//!   bit codes, exact at both bounds.
//! - **Bit-level crossover**: single-point and uniform recombination at
//!   individual-bit granularity.
//! - **Self-adaptive mutation**: per-vector mutation rates encoded as
//!   extra genes and evolved under selection pressure.
//! - **Tournament selection** and **elitism** with a best-ever record
//!   kept outside the live population.
//!
//! # Example
//!
//! ```
//! use u_genetic::ga::{GeneticAlgorithm, GeneticConfig};
//!
//! // Rosenbrock, negated for maximization; optimum at (1, 1).
//! let rosenbrock = |v: &[Vec<f64>]| -> f64 {
//!     let (x, y) = (v[0][0], v[0][1]);
//!     -((1.0 - x).powi(2) + 100.0 * (y - x * x).powi(2))
//! };
//! let config: GeneticConfig = GeneticConfig::default()
//!     .with_bounds(-5.0, 5.0)
//!     .with_max_generations(50)
//!     .with_seed(1);
//!
//! let mut ga = GeneticAlgorithm::new(config, rosenbrock)?;
//! let result = ga.run();
//! assert_eq!(result.best_vectors.len(), 1);
//! # Ok::<(), u_genetic::ga::GeneticError>(())
//! ```

pub mod ga;
