//! Error types for the genome layer.

use thiserror::Error;

/// Errors that can stop a generational step.
///
/// Scoring and persistence faults are absorbed by the engine and never show
/// up here.
#[derive(Debug, Error)]
pub enum GenomeError {
    /// The seed population has no members, so no elite can be picked.
    #[error("empty seed population: at least one plan is required")]
    EmptyPopulation,

    /// Invalid engine configuration.
    #[error("configuration error: {0}")]
    InvalidConfig(String),
}

/// Result type for genome operations.
pub type GenomeResult<T> = Result<T, GenomeError>;

/// Errors from writing a generation summary.
#[derive(Debug, Error)]
pub enum PersistenceError {
    /// Filesystem failure.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Summary could not be encoded.
    #[error("serialization error: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The sink refused the summary.
    #[error("sink unavailable: {0}")]
    Unavailable(String),
}

/// Result type for persistence operations.
pub type PersistenceResult<T> = Result<T, PersistenceError>;
