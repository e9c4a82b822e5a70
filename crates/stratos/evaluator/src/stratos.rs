//! The STRATOS weighted-factor evaluator.
//!
//! Five sub-scores (structure, coverage, feasibility, risk, clarity) are
//! combined under normalized weights. The result is clamped to `[0, 100]` and
//! rounded to one decimal.

use serde_json::Value;
use stratos_types::{round1, EvaluationReport, PlanRecord};
use tracing::debug;

use crate::weights::{FactorScores, FactorWeights, PlanShape};

/// Advisory when a plan has fewer than [`MIN_MODULES`] modules.
pub const REC_MODULES: &str = "Expand the core modules to 4-8 so each execution stage is concrete.";
/// Advisory when a plan has fewer than [`MIN_OBJECTIVES`] objectives.
pub const REC_OBJECTIVES: &str = "Define at least 3 core objectives with measurable KPIs.";
/// Advisory when the flow is shorter than [`MIN_FLOW_STEPS`].
pub const REC_FLOW: &str =
    "Lay out an execution flow of at least 3 chained modules to expose dependencies.";
/// Advisory for an untitled plan.
pub const REC_TITLE: &str = "Give the plan a clear, specific title.";
/// Advisory when no specific deficiency was found.
pub const REC_GENERIC: &str =
    "Plan meets the baseline criteria; sharpen KPI targets and risk mitigations next.";

pub const MIN_MODULES: usize = 4;
pub const MIN_OBJECTIVES: usize = 3;
pub const MIN_FLOW_STEPS: usize = 3;

/// Weighted-factor plan evaluator.
#[derive(Clone, Debug, Default)]
pub struct StratosEvaluator {
    weights: FactorWeights,
}

impl StratosEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_weights(mut self, weights: FactorWeights) -> Self {
        self.weights = weights;
        self
    }

    /// Configured (not yet normalized) weights.
    pub fn weights(&self) -> &FactorWeights {
        &self.weights
    }

    /// Score a plan. Never fails; the input is not modified.
    pub fn evaluate(&self, plan: &PlanRecord) -> EvaluationReport {
        self.evaluate_shape(&PlanShape::of(plan), &plan.title)
    }

    /// Score any JSON value without failing.
    ///
    /// List fields count every raw entry, so entries a lenient decode would
    /// drop still count here.
    pub fn evaluate_value(&self, value: &Value) -> EvaluationReport {
        let label = value
            .get("title")
            .and_then(Value::as_str)
            .or_else(|| value.as_str())
            .unwrap_or_default();
        self.evaluate_shape(&PlanShape::of_value(value), label)
    }

    fn evaluate_shape(&self, shape: &PlanShape, label: &str) -> EvaluationReport {
        let factors = FactorScores::from_shape(shape);
        let norm = self.weights.normalized();
        let combined = factors.combine(&norm);
        let combined = if combined.is_finite() { combined } else { 0.0 };
        let score = round1(combined.clamp(0.0, 100.0));

        let findings = vec![
            format!("structure={:.1}", factors.structure),
            format!("coverage={:.1}", factors.coverage),
            format!("feasibility={:.1}", factors.feasibility),
            format!("risk={}", factors.risk as i64),
            format!("clarity={:.1}", factors.clarity),
            format!("weights={}", norm),
        ];

        let recommendations = recommendations_for(shape);

        debug!(
            title = %label,
            score,
            recommendations = recommendations.len(),
            "Plan evaluated"
        );

        EvaluationReport {
            score,
            findings,
            recommendations,
            used_weights: norm.as_map(),
        }
    }
}

/// One advisory per unmet criterion, in a fixed order; a generic advisory
/// when every criterion is met.
fn recommendations_for(shape: &PlanShape) -> Vec<String> {
    let mut recs = Vec::new();
    if shape.modules < MIN_MODULES {
        recs.push(REC_MODULES.to_string());
    }
    if shape.objectives < MIN_OBJECTIVES {
        recs.push(REC_OBJECTIVES.to_string());
    }
    if shape.flow < MIN_FLOW_STEPS {
        recs.push(REC_FLOW.to_string());
    }
    if !shape.titled {
        recs.push(REC_TITLE.to_string());
    }
    if recs.is_empty() {
        recs.push(REC_GENERIC.to_string());
    }
    recs
}
