//! The scoring boundary consumed by the evolution engine.

use stratos_types::PlanRecord;

use crate::error::{EvalError, EvalResult};
use crate::stratos::StratosEvaluator;

/// Anything that can score one plan.
///
/// Failures are reported, not raised: the engine collapses an `Err` (or a
/// non-finite score) to 0.0 for that member only.
pub trait PlanScorer {
    fn score(&self, plan: &PlanRecord) -> EvalResult<f64>;

    /// Like [`score`](Self::score), but a non-finite result is an error.
    fn checked_score(&self, plan: &PlanRecord) -> EvalResult<f64> {
        let score = self.score(plan)?;
        if score.is_finite() {
            Ok(score)
        } else {
            Err(EvalError::NonNumeric(score.to_string()))
        }
    }
}

impl PlanScorer for StratosEvaluator {
    fn score(&self, plan: &PlanRecord) -> EvalResult<f64> {
        Ok(self.evaluate(plan).score)
    }
}

impl<F> PlanScorer for F
where
    F: Fn(&PlanRecord) -> EvalResult<f64>,
{
    fn score(&self, plan: &PlanRecord) -> EvalResult<f64> {
        self(plan)
    }
}
