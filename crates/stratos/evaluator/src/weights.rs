//! Factor weights and per-factor sub-scores.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use stratos_types::PlanRecord;

/// Names of the five scoring factors, in reporting order.
pub const FACTOR_NAMES: [&str; 5] = ["structure", "coverage", "feasibility", "risk", "clarity"];

/// Relative importance of each factor.
///
/// `Default` gives the built-in weighting. When decoded from a profile, a
/// factor the profile omits weighs 0.0: a partial profile replaces the
/// defaults, it does not patch them.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct FactorWeights {
    #[serde(default)]
    pub structure: f64,
    #[serde(default)]
    pub coverage: f64,
    #[serde(default)]
    pub feasibility: f64,
    #[serde(default)]
    pub risk: f64,
    #[serde(default)]
    pub clarity: f64,
}

impl Default for FactorWeights {
    fn default() -> Self {
        Self {
            structure: 0.25,
            coverage: 0.25,
            feasibility: 0.25,
            risk: 0.15,
            clarity: 0.10,
        }
    }
}

impl FactorWeights {
    pub(crate) fn values(&self) -> [f64; 5] {
        [
            self.structure,
            self.coverage,
            self.feasibility,
            self.risk,
            self.clarity,
        ]
    }

    pub(crate) fn from_values(v: [f64; 5]) -> Self {
        Self {
            structure: v[0],
            coverage: v[1],
            feasibility: v[2],
            risk: v[3],
            clarity: v[4],
        }
    }

    pub fn sum(&self) -> f64 {
        self.values().iter().sum()
    }

    /// Scale so the weights sum to 1. A zero-sum set divides by 1.0.
    ///
    /// Non-finite weights count as 0, and the result holds finite values only.
    pub fn normalized(&self) -> Self {
        let finite = self.values().map(finite_or_zero);
        let total: f64 = finite.iter().sum();
        let divisor = if total == 0.0 || !total.is_finite() {
            1.0
        } else {
            total
        };
        Self::from_values(finite.map(|w| finite_or_zero(w / divisor)))
    }

    /// Clamp negative weights to zero, then normalize.
    pub fn clamped_normalized(&self) -> Self {
        Self::from_values(self.values().map(|w| w.max(0.0))).normalized()
    }

    /// Factor name → weight.
    pub fn as_map(&self) -> BTreeMap<String, f64> {
        FACTOR_NAMES
            .iter()
            .zip(self.values())
            .map(|(name, w)| (name.to_string(), w))
            .collect()
    }
}

impl std::fmt::Display for FactorWeights {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = FACTOR_NAMES
            .iter()
            .zip(self.values())
            .map(|(name, w)| format!("{}:{:.3}", name, w))
            .collect();
        write!(f, "{{{}}}", parts.join(", "))
    }
}

fn finite_or_zero(w: f64) -> f64 {
    if w.is_finite() {
        w
    } else {
        0.0
    }
}

// ── Plan Shape ──────────────────────────────────────────────────────

/// The counts the evaluator reads from a plan.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PlanShape {
    pub flow: usize,
    pub objectives: usize,
    pub modules: usize,
    pub titled: bool,
}

impl PlanShape {
    pub fn of(plan: &PlanRecord) -> Self {
        Self {
            flow: plan.flow.len(),
            objectives: plan.objectives.len(),
            modules: plan.modules.len(),
            titled: !plan.title.is_empty(),
        }
    }

    /// Counts taken from raw JSON.
    ///
    /// A list field counts every entry, whatever its type; a field that is
    /// not an array counts 0. The title counts when it is a non-empty,
    /// non-zero, non-false value.
    pub fn of_value(value: &Value) -> Self {
        match value {
            Value::Object(fields) => {
                let count = |key: &str| {
                    fields
                        .get(key)
                        .and_then(Value::as_array)
                        .map_or(0, Vec::len)
                };
                Self {
                    flow: count("flow"),
                    objectives: count("objectives"),
                    modules: count("modules"),
                    titled: fields.get("title").is_some_and(is_truthy),
                }
            }
            Value::Null => Self::default(),
            Value::String(s) => Self {
                titled: !s.is_empty(),
                ..Self::default()
            },
            _ => Self {
                titled: true,
                ..Self::default()
            },
        }
    }
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|n| n != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(items) => !items.is_empty(),
        Value::Object(fields) => !fields.is_empty(),
    }
}

// ── Factor Scores ───────────────────────────────────────────────────

/// Raw sub-scores for one plan, each on a 0–100 scale.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct FactorScores {
    pub structure: f64,
    pub coverage: f64,
    pub feasibility: f64,
    pub risk: f64,
    pub clarity: f64,
}

/// Baseline risk sub-score.
pub const RISK_BASELINE: f64 = 70.0;
/// Clarity for a titled plan.
pub const CLARITY_TITLED: f64 = 86.7;
/// Clarity for an untitled plan.
pub const CLARITY_UNTITLED: f64 = 70.0;

impl FactorScores {
    pub fn from_plan(plan: &PlanRecord) -> Self {
        Self::from_shape(&PlanShape::of(plan))
    }

    /// Extract the sub-scores from a plan's shape.
    pub fn from_shape(shape: &PlanShape) -> Self {
        let n_flow = shape.flow.min(3) as f64;
        let n_obj = shape.objectives.min(3) as f64;
        let n_mod = shape.modules.min(2) as f64;

        Self {
            // 3-step flow saturates at 80
            structure: (20.0 + 20.0 * n_flow).min(100.0),
            // 3 objectives saturate at 75
            coverage: (60.0 + 5.0 * n_obj).min(100.0),
            // 2 modules saturate at 80
            feasibility: (60.0 + 10.0 * n_mod).min(100.0),
            risk: RISK_BASELINE,
            clarity: if shape.titled {
                CLARITY_TITLED
            } else {
                CLARITY_UNTITLED
            },
        }
    }

    /// Weighted sum under already-normalized weights.
    pub fn combine(&self, weights: &FactorWeights) -> f64 {
        self.structure * weights.structure
            + self.coverage * weights.coverage
            + self.feasibility * weights.feasibility
            + self.risk * weights.risk
            + self.clarity * weights.clarity
    }
}
