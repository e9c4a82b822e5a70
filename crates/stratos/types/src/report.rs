//! Scored plans and evaluation reports.

use std::cmp::Ordering;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::plan::PlanRecord;

/// A plan paired with its fitness score in `[0, 100]`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ScoredPlan {
    pub plan: PlanRecord,
    pub score: f64,
}

impl ScoredPlan {
    pub fn new(plan: PlanRecord, score: f64) -> Self {
        Self { plan, score }
    }
}

/// Sort descending by score. Stable: equal scores keep their relative order.
pub fn sort_scored_desc(scored: &mut [ScoredPlan]) {
    scored.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));
}

/// Round to the canonical one-decimal precision.
pub fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

/// Outcome of evaluating one plan.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct EvaluationReport {
    /// Normalized score, one decimal.
    pub score: f64,
    /// Raw per-factor figures, in a fixed order.
    #[serde(default)]
    pub findings: Vec<String>,
    /// One advisory per unmet criterion.
    #[serde(default)]
    pub recommendations: Vec<String>,
    /// Normalized weights used for the combination; they sum to 1.
    #[serde(default)]
    pub used_weights: BTreeMap<String, f64>,
}
