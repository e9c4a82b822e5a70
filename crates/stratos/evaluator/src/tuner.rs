//! Feedback-driven weight tuning.
//!
//! User ratings below the target mean shift weight toward clarity and
//! coverage; ratings above it shift weight toward structure and risk.
//! Feasibility is left alone. Updates are small and always renormalized.

use std::io::BufRead;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::EvalResult;
use crate::weights::{FactorWeights, FACTOR_NAMES};

/// Default number of most recent feedback records considered.
pub const DEFAULT_FEEDBACK_LIMIT: usize = 500;

/// Older profiles name factors with these keys.
pub const LEGACY_FACTOR_KEYS: [(&str, &str); 5] = [
    ("전략성", "structure"),
    ("설명력", "clarity"),
    ("실행력", "feasibility"),
    ("리스크대응", "risk"),
    ("커버리지", "coverage"),
];

/// One line of user feedback.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct FeedbackRecord {
    /// User rating on the 0–100 score scale.
    #[serde(default)]
    pub user_score: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// Read JSON Lines feedback, skipping blank and malformed lines.
///
/// With a non-zero `limit`, only the last `limit` records are kept.
pub fn read_feedback<R: BufRead>(reader: R, limit: Option<usize>) -> EvalResult<Vec<FeedbackRecord>> {
    let mut rows = Vec::new();
    for (line_no, line) in reader.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }
        match serde_json::from_str::<FeedbackRecord>(&line) {
            Ok(row) => rows.push(row),
            Err(e) => debug!(line = line_no + 1, error = %e, "Skipping malformed feedback line"),
        }
    }
    if let Some(limit) = limit.filter(|&n| n > 0) {
        if rows.len() > limit {
            rows.drain(..rows.len() - limit);
        }
    }
    Ok(rows)
}

/// Starting weights for tuning, from a stored weight map.
///
/// Legacy keys map to their factor, entries without a value are skipped one
/// at a time, unknown keys are ignored, and a later entry for the same factor
/// wins. Factors still missing take their default weight.
pub fn tuning_baseline<'a, I>(entries: I) -> FactorWeights
where
    I: IntoIterator<Item = (&'a str, Option<f64>)>,
{
    let mut values = FactorWeights::default().values();
    for (key, value) in entries {
        let key = LEGACY_FACTOR_KEYS
            .iter()
            .find(|(legacy, _)| *legacy == key)
            .map_or(key, |(_, factor)| *factor);
        match (FACTOR_NAMES.iter().position(|name| *name == key), value) {
            (Some(idx), Some(v)) => values[idx] = v,
            (Some(_), None) => debug!(key, "Skipping non-numeric weight"),
            (None, _) => debug!(key, "Ignoring unknown weight key"),
        }
    }
    FactorWeights::from_values(values)
}

/// Proposes new factor weights from feedback.
#[derive(Clone, Debug)]
pub struct WeightTuner {
    /// Learning rate.
    alpha: f64,
    /// Mean user score considered on target.
    target: f64,
}

impl WeightTuner {
    pub fn new() -> Self {
        Self {
            alpha: 0.03,
            target: 75.0,
        }
    }

    pub fn with_learning_rate(mut self, alpha: f64) -> Self {
        self.alpha = alpha;
        self
    }

    pub fn with_target(mut self, target: f64) -> Self {
        self.target = target;
        self
    }

    /// Proposed weights: non-negative, summing to 1.
    pub fn propose(&self, current: &FactorWeights, feedback: &[FeedbackRecord]) -> FactorWeights {
        if feedback.is_empty() {
            return current.clamped_normalized();
        }

        let mean = feedback.iter().map(|f| f.user_score).sum::<f64>() / feedback.len() as f64;
        let delta = (mean - self.target) / 100.0;

        let updated = FactorWeights {
            clarity: current.clarity - delta * self.alpha,
            coverage: current.coverage - delta * self.alpha * 0.8,
            structure: current.structure + delta * self.alpha * 0.5,
            risk: current.risk + delta * self.alpha * 0.3,
            feasibility: current.feasibility,
        };

        let proposed = updated.clamped_normalized();
        info!(
            feedback = feedback.len(),
            mean_score = mean,
            delta,
            weights = %proposed,
            "Proposed tuned weights"
        );
        proposed
    }
}

impl Default for WeightTuner {
    fn default() -> Self {
        Self::new()
    }
}
