//! CLI error types

use thiserror::Error;

/// CLI error types
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Evaluation error
    #[error("Evaluation error: {0}")]
    Eval(#[from] stratos_evaluator::EvalError),

    /// Evolution error
    #[error("Evolution error: {0}")]
    Genome(#[from] stratos_genome::GenomeError),
}

/// Result type for CLI operations
pub type CliResult<T> = Result<T, CliError>;
