//! Genetic operators: crossover and mutation over plan records.
//!
//! Every random draw comes from the caller's generator, so a seeded `Rng`
//! reproduces a run exactly. Neither operator modifies its inputs.

use std::collections::HashSet;

use rand::seq::SliceRandom;
use rand::Rng;
use stratos_types::{timestamp_now, GenomeOp, ModuleEntry, ModuleKey, PlanMeta, PlanRecord};

/// Tags mutation may append to a title.
pub const TITLE_TAGS: [&str; 5] = ["(revised)", "(A/B)", "(experiment)", "(v2)", "(hardened)"];
/// Title used when both crossover parents are untitled.
pub const DEFAULT_TITLE: &str = "Strategy";
/// Objective appended by exploratory mutation.
pub const EXPLORATORY_OBJECTIVE: &str = "Strengthen experiment design";
/// Risk appended by exploratory mutation.
pub const EXPLORATORY_RISK: &str = "Hypothesis validation may fail";
/// Module substituted when a merge leaves no modules.
pub const PLACEHOLDER_MODULE: &str = "requirements_ingest";
pub const PLACEHOLDER_ROLE: &str = "requirements intake";

// Fractions of the mutation rate for the lower-impact moves.
const ADD_OBJECTIVE_FACTOR: f64 = 0.5;
const ADD_RISK_FACTOR: f64 = 0.6;
const SHUFFLE_FLOW_FACTOR: f64 = 0.4;

// ── Merge helpers ───────────────────────────────────────────────────

/// Uniform cut index in `[0, len]`; no draw for an empty field.
fn cut_point<R: Rng + ?Sized>(len: usize, rng: &mut R) -> usize {
    if len == 0 {
        0
    } else {
        rng.gen_range(0..=len)
    }
}

/// Keep the first occurrence of each string, in order.
pub fn dedup_strings<'a, I>(items: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a String>,
{
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.as_str()))
        .cloned()
        .collect()
}

/// Cut-and-splice merge of two string lists: `x[..cx] ++ y[cy..]`, deduplicated.
pub fn merge_strings<R: Rng + ?Sized>(x: &[String], y: &[String], rng: &mut R) -> Vec<String> {
    let cx = cut_point(x.len(), rng);
    let cy = cut_point(y.len(), rng);
    dedup_strings(x[..cx].iter().chain(&y[cy..]))
}

/// Cut-and-splice merge of two module lists, deduplicated by [`ModuleKey`].
///
/// An empty result is replaced by the single placeholder module.
pub fn merge_modules<R: Rng + ?Sized>(
    x: &[ModuleEntry],
    y: &[ModuleEntry],
    rng: &mut R,
) -> Vec<ModuleEntry> {
    let cx = cut_point(x.len(), rng);
    let cy = cut_point(y.len(), rng);

    let mut seen: HashSet<ModuleKey> = HashSet::new();
    let merged: Vec<ModuleEntry> = x[..cx]
        .iter()
        .chain(&y[cy..])
        .filter(|m| seen.insert(m.key()))
        .cloned()
        .collect();

    if merged.is_empty() {
        vec![ModuleEntry::named(PLACEHOLDER_MODULE, PLACEHOLDER_ROLE)]
    } else {
        merged
    }
}

/// `"{a} / {b}"` for distinct non-empty titles, else whichever is non-empty.
pub fn mix_title(a: &str, b: &str) -> String {
    match (a.is_empty(), b.is_empty()) {
        (false, false) if a != b => format!("{} / {}", a, b),
        (false, _) => a.to_string(),
        (true, false) => b.to_string(),
        (true, true) => DEFAULT_TITLE.to_string(),
    }
}

/// Drop flow steps that name no module; fall back to module order if none remain.
fn reconcile_flow(flow: Vec<String>, modules: &[ModuleEntry]) -> Vec<String> {
    let names: Vec<&str> = modules.iter().filter_map(ModuleEntry::usable_name).collect();
    let kept: Vec<String> = flow
        .into_iter()
        .filter(|step| names.contains(&step.as_str()))
        .collect();
    if kept.is_empty() {
        names.into_iter().map(str::to_string).collect()
    } else {
        kept
    }
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value.as_ref().filter(|v| !v.is_empty()).cloned()
}

// ── Crossover ───────────────────────────────────────────────────────

/// Merge two plans into a child.
///
/// Objectives, modules, flow and risks are each spliced at random cut points
/// and deduplicated; the flow is then reconciled against the merged modules.
pub fn crossover<R: Rng + ?Sized>(a: &PlanRecord, b: &PlanRecord, rng: &mut R) -> PlanRecord {
    let title = mix_title(&a.title, &b.title);
    let objectives = merge_strings(&a.objectives, &b.objectives, rng);
    let modules = merge_modules(&a.modules, &b.modules, rng);
    let flow = reconcile_flow(merge_strings(&a.flow, &b.flow, rng), &modules);
    let risks = merge_strings(&a.risks, &b.risks, rng);

    let meta = PlanMeta {
        domain: non_empty(&a.meta.domain).or_else(|| non_empty(&b.meta.domain)),
        genome_op: Some(GenomeOp::Crossover),
        generated_at: Some(timestamp_now()),
        parents: vec![a.meta.lineage().to_string(), b.meta.lineage().to_string()],
        ..PlanMeta::default()
    };

    PlanRecord {
        title,
        objectives,
        modules,
        flow,
        risks,
        meta,
    }
}

// ── Mutation ────────────────────────────────────────────────────────

fn trial<R: Rng + ?Sized>(rng: &mut R, probability: f64) -> bool {
    rng.gen::<f64>() < probability
}

/// Append a random tag unless that exact tag is already in the title.
fn tag_title<R: Rng + ?Sized>(title: &str, rng: &mut R) -> String {
    match TITLE_TAGS.choose(rng) {
        Some(tag) if !title.contains(tag) => format!("{} {}", title, tag).trim().to_string(),
        _ => title.to_string(),
    }
}

/// Derive a perturbed copy of `plan`.
///
/// Independent trials run in a fixed order, each reading the state left by
/// the previous one: title tag (`rate`), objective shuffle (`rate`, only when
/// there are objectives), exploratory objective (`rate * 0.5`), exploratory
/// risk (`rate * 0.6`), flow shuffle (`rate * 0.4`, only when there is a
/// flow). Rates outside `[0, 1]` behave as always/never.
pub fn mutate<R: Rng + ?Sized>(plan: &PlanRecord, rate: f64, rng: &mut R) -> PlanRecord {
    let mut next = plan.clone();

    if trial(rng, rate) {
        next.title = tag_title(&next.title, rng);
    }

    if !next.objectives.is_empty() && trial(rng, rate) {
        next.objectives.shuffle(rng);
    }

    if trial(rng, rate * ADD_OBJECTIVE_FACTOR) {
        next.objectives.push(EXPLORATORY_OBJECTIVE.to_string());
    }

    if trial(rng, rate * ADD_RISK_FACTOR) {
        next.risks.push(EXPLORATORY_RISK.to_string());
    }

    if !next.flow.is_empty() && trial(rng, rate * SHUFFLE_FLOW_FACTOR) {
        next.flow.shuffle(rng);
    }

    next.meta.genome_op = Some(GenomeOp::Mutated);
    next.meta.mutated_at = Some(timestamp_now());
    next.meta.mutation_rate = Some(rate);
    next
}
