//! Binary-encoded Genetic Algorithm.
//!
//! Candidate solutions are `number_of_vectors` real vectors of `dimension`
//! components, each component quantized into a fixed-width unsigned
//! integer gene. The engine maximizes a user [`FitnessFunction`] with
//! tournament selection, bit-level crossover, per-bit mutation (optionally
//! self-adaptive) and elitism.
//!
//! # Core Traits
//!
//! - [`Real`]: real type candidates decode to (`f32`, `f64`)
//! - [`Gene`]: unsigned integer type storing genes (`u8`–`u64`)
//! - [`FitnessFunction`]: objective to maximize
//!
//! # Key Types
//!
//! - [`GeneticConfig`]: Algorithm parameters and encoding bounds
//! - [`GeneticAlgorithm`]: Executes the evolutionary loop
//! - [`RunResult`]: Final optimization result with fitness history
//! - [`Individual`]: Binary-encoded candidate with cached fitness
//! - [`Codec`]: Real/integer quantizer
//!
//! # Submodules
//!
//! - [`operators`]: Single-point and uniform bit-level crossover, mutation
//! - [`selection`]: Tournament selection
//!
//! # References
//!
//! - Holland (1975), *Adaptation in Natural and Artificial Systems*
//! - Goldberg (1989), *Genetic Algorithms in Search, Optimization, and Machine Learning*
//! - Bäck (1992), "Self-Adaptation in Genetic Algorithms"

mod codec;
mod config;
mod error;
mod individual;
pub mod operators;
mod runner;
pub mod selection;
mod types;

pub use codec::{decode, encode, Codec};
pub use config::{CrossoverMethod, GeneticConfig};
pub use error::{GeneticError, Result};
pub use individual::{Evaluation, Individual};
pub use runner::{GeneticAlgorithm, RunResult};
pub use types::{low_mask, FitnessFunction, Gene, Real};
