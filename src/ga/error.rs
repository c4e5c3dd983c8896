//! Error types.

use thiserror::Error;

/// Errors reported by the GA before a run starts.
///
/// Once a configuration has been validated the evolutionary loop itself
/// cannot fail; misuse of indices is a programming error and panics.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GeneticError {
    /// A configuration parameter violates its bounds.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

/// Result alias for fallible GA operations.
pub type Result<T> = std::result::Result<T, GeneticError>;
