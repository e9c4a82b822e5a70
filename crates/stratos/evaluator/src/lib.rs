//! # stratos-evaluator
//!
//! Fitness evaluation for plan records.
//!
//! The evaluator follows the **weighted-factor policy**: five sub-scores
//! derived from a plan's shape are combined under normalized
//! [`FactorWeights`]. Evaluation is pure and never fails; a list field of
//! the wrong type is scored as empty.
//!
//! The crate also carries the [`PlanScorer`] boundary used by the evolution
//! engine and a [`WeightTuner`] that nudges weights from user feedback.

#![deny(unsafe_code)]

pub mod error;
pub mod scorer;
pub mod stratos;
pub mod tuner;
pub mod weights;

// ── Re-exports ──────────────────────────────────────────────────────

pub use error::{EvalError, EvalResult};
pub use scorer::PlanScorer;
pub use stratos::StratosEvaluator;
pub use tuner::{
    read_feedback, tuning_baseline, FeedbackRecord, WeightTuner, DEFAULT_FEEDBACK_LIMIT,
    LEGACY_FACTOR_KEYS,
};
pub use weights::{FactorScores, FactorWeights, PlanShape, FACTOR_NAMES};
