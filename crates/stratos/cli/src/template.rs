//! Template plan generator.
//!
//! Produces a minimal three-stage plan for a domain and a free-text goal.
//! It seeds a population when no plans are available yet.

use chrono::Utc;
use serde_json::Value;
use stratos_types::{ModuleEntry, PlanRecord};

/// Version tag stamped on template plans.
pub const TEMPLATE_VERSION: &str = "1.0";

/// Build the template plan for `domain` and `input`.
pub fn template_plan(domain: &str, input: &str) -> PlanRecord {
    let title = format!("[{}] Strategy: {}", domain, input).trim().to_string();

    let mut plan = PlanRecord::new(title)
        .with_objective("Define core goals")
        .with_objective("Select core KPIs")
        .with_objective("Build execution roadmap")
        .with_module(ModuleEntry::named("Discovery", "problem and user research").with_deps(""))
        .with_module(ModuleEntry::named("Design", "process and funnel design").with_deps("Discovery"))
        .with_module(
            ModuleEntry::named("Delivery", "execution, launch and observability").with_deps("Design"),
        )
        .with_flow_step("Discovery")
        .with_flow_step("Design")
        .with_flow_step("Delivery")
        .with_risk("Insufficient data")
        .with_risk("Resource bottleneck")
        .with_domain(domain)
        .with_version(TEMPLATE_VERSION);

    plan.meta
        .extra
        .insert("model".into(), Value::String("template".into()));
    plan.meta.extra.insert(
        "timestamp".into(),
        Value::String(Utc::now().format("%Y-%m-%dT%H:%M:%SZ").to_string()),
    );
    plan
}
