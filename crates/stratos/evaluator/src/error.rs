//! Error types for plan evaluation.

use thiserror::Error;

/// Errors a scorer may report for a single plan.
///
/// The evolution engine collapses every one of these to a score of 0.0 for
/// the affected member; they never abort a generation.
#[derive(Debug, Error)]
pub enum EvalError {
    /// The scorer could not evaluate the plan.
    #[error("evaluation failed: {0}")]
    Failed(String),

    /// The scorer produced something that is not a usable number.
    #[error("non-numeric score: {0}")]
    NonNumeric(String),

    /// Reading evaluator inputs (feedback, profiles) failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for evaluation operations.
pub type EvalResult<T> = Result<T, EvalError>;
