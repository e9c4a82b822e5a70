//! Property tests: evaluation scores stay within [0, 100] and weights normalize.

use proptest::prelude::*;
use stratos_evaluator::{FactorWeights, StratosEvaluator};
use stratos_tests::{arb_plan, arb_plan_json};

fn weights_from<S>(factor: S) -> impl Strategy<Value = FactorWeights>
where
    S: Strategy<Value = f64> + Clone,
{
    prop::array::uniform5(factor).prop_map(|w| FactorWeights {
        structure: w[0],
        coverage: w[1],
        feasibility: w[2],
        risk: w[3],
        clarity: w[4],
    })
}

fn weights_in(range: std::ops::Range<f64>) -> impl Strategy<Value = FactorWeights> {
    weights_from(range)
}

/// Mostly ordinary weights, with the occasional infinity or NaN from a
/// hand-edited profile.
fn arb_weights() -> impl Strategy<Value = FactorWeights> {
    weights_from(prop_oneof![
        8 => -1.0f64..2.0,
        1 => Just(f64::INFINITY),
        1 => Just(f64::NEG_INFINITY),
        1 => Just(f64::NAN),
    ])
}

proptest! {
    /// Any plan under any weights scores within [0, 100].
    #[test]
    fn score_is_bounded(plan in arb_plan(), weights in arb_weights()) {
        let report = StratosEvaluator::new().with_weights(weights).evaluate(&plan);
        prop_assert!((0.0..=100.0).contains(&report.score));
        prop_assert!(!report.recommendations.is_empty());
    }

    /// Reported weights are finite whatever the configured weights were.
    #[test]
    fn used_weights_are_finite(weights in arb_weights()) {
        let report = StratosEvaluator::new()
            .with_weights(weights)
            .evaluate(&stratos_tests::rich_plan());
        prop_assert!(report.used_weights.values().all(|w| w.is_finite()));
        prop_assert!(report.score.is_finite());
    }

    /// Malformed JSON never fails evaluation.
    #[test]
    fn malformed_json_is_scored(value in arb_plan_json()) {
        let report = StratosEvaluator::new().evaluate_value(&value);
        prop_assert!((0.0..=100.0).contains(&report.score));
        prop_assert_eq!(report.findings.len(), 6);
    }

    /// Used weights always sum to one, up to rounding.
    #[test]
    fn used_weights_sum_to_one(weights in weights_in(0.01..2.0)) {
        let report = StratosEvaluator::new()
            .with_weights(weights)
            .evaluate(&stratos_tests::rich_plan());
        let total: f64 = report.used_weights.values().sum();
        prop_assert!((total - 1.0).abs() < 1e-6);
    }

    /// Scores are reported with at most one decimal.
    #[test]
    fn score_has_one_decimal(plan in arb_plan()) {
        let score = StratosEvaluator::new().evaluate(&plan).score;
        prop_assert!(((score * 10.0).round() - score * 10.0).abs() < 1e-6);
    }
}
