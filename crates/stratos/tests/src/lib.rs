//! Shared fixtures and proptest strategies for the STRATOS test suites.

use proptest::prelude::*;
use serde_json::{json, Value};
use stratos_evaluator::{EvalError, EvalResult};
use stratos_types::{ModuleEntry, PlanRecord};

// ---------------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------------

/// A plan with one module, objective, flow step and risk per name.
pub fn staged_plan(title: &str, names: &[&str]) -> PlanRecord {
    names.iter().fold(PlanRecord::new(title), |plan, name| {
        plan.with_module(ModuleEntry::named(*name, "stage"))
            .with_flow_step(*name)
            .with_objective(format!("{} objective", name))
            .with_risk(format!("{} risk", name))
    })
}

/// A plan meeting every evaluator criterion.
pub fn rich_plan() -> PlanRecord {
    staged_plan("Growth launch", &["discover", "design", "build", "launch"])
}

/// Scores plans by title: `"a"` 90, `"b"` 40, `"c"` 95, anything else 50.
pub fn title_scorer(plan: &PlanRecord) -> EvalResult<f64> {
    Ok(match plan.title.as_str() {
        "a" => 90.0,
        "b" => 40.0,
        "c" => 95.0,
        _ => 50.0,
    })
}

/// Fails on every plan.
pub fn raising_scorer(_plan: &PlanRecord) -> EvalResult<f64> {
    Err(EvalError::Failed("scorer unavailable".into()))
}

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// Short lowercase identifiers drawn from a small alphabet, so duplicates occur.
pub fn arb_name() -> impl Strategy<Value = String> {
    "[a-e]{1,2}"
}

pub fn arb_strings(max: usize) -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(arb_name(), 0..max)
}

/// A module entry, occasionally unnamed or with an empty name.
pub fn arb_module() -> impl Strategy<Value = ModuleEntry> {
    (
        prop_oneof![
            6 => arb_name().prop_map(Some),
            1 => Just(Some(String::new())),
            1 => Just(None),
        ],
        prop::option::of("[a-z ]{0,8}"),
    )
        .prop_map(|(name, role)| ModuleEntry {
            name,
            role,
            ..ModuleEntry::default()
        })
}

pub fn arb_plan() -> impl Strategy<Value = PlanRecord> {
    (
        prop::option::of("[A-Za-z ]{0,12}"),
        arb_strings(6),
        prop::collection::vec(arb_module(), 0..6),
        arb_strings(6),
        arb_strings(4),
    )
        .prop_map(|(title, objectives, modules, flow, risks)| PlanRecord {
            title: title.unwrap_or_default(),
            objectives,
            modules,
            flow,
            risks,
            ..PlanRecord::default()
        })
}

/// Arbitrary JSON shaped loosely like a plan, with wrong types mixed in.
pub fn arb_plan_json() -> impl Strategy<Value = Value> {
    let field = prop_oneof![
        Just(Value::Null),
        any::<i32>().prop_map(|n| json!(n)),
        "[a-z]{0,6}".prop_map(|s| json!(s)),
        arb_strings(5).prop_map(|v| json!(v)),
        prop::collection::vec(arb_name(), 0..4)
            .prop_map(|names| json!(names.iter().map(|n| json!({"name": n})).collect::<Vec<_>>())),
    ];
    prop::collection::btree_map(
        prop_oneof![
            Just("title".to_string()),
            Just("objectives".to_string()),
            Just("modules".to_string()),
            Just("flow".to_string()),
            Just("risks".to_string()),
            Just("meta".to_string()),
        ],
        field,
        0..6,
    )
    .prop_map(|fields| Value::Object(fields.into_iter().collect()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rich_plan_is_consistent() {
        let plan = rich_plan();
        assert_eq!(plan.modules.len(), 4);
        assert!(plan.flow_is_consistent());
    }

    #[test]
    fn scorers_behave() {
        assert_eq!(title_scorer(&PlanRecord::new("c")).unwrap(), 95.0);
        assert!(raising_scorer(&PlanRecord::default()).is_err());
    }
}
