//! Generational evolution engine.
//!
//! One step scores the population, keeps the elites, breeds offspring from
//! the parent pool, records a best-effort summary, then re-scores and ranks
//! the next population. Scoring and persistence faults never abort a step;
//! only an empty seed population does.

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;
use serde::{Deserialize, Serialize};
use stratos_evaluator::PlanScorer;
use stratos_types::{sort_scored_desc, PlanRecord, ScoredPlan};
use tracing::{debug, info, warn};

use crate::error::{GenomeError, GenomeResult};
use crate::operators::{crossover, mutate};
use crate::persistence::GenerationSink;

// ── Configuration ───────────────────────────────────────────────────

/// Knobs for one generational step.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EvolutionConfig {
    /// Elites carried over unchanged; at least one always survives.
    pub survivors: usize,
    /// Children bred per generation.
    pub offspring: usize,
    /// Probability gate for mutation moves.
    pub mutation_rate: f64,
    /// Minimum score to enter the parent pool.
    pub discard_threshold: f64,
    /// Generation label for summaries.
    pub generation: u32,
}

impl Default for EvolutionConfig {
    fn default() -> Self {
        Self {
            survivors: 3,
            offspring: 4,
            mutation_rate: 0.3,
            discard_threshold: 60.0,
            generation: 1,
        }
    }
}

impl EvolutionConfig {
    /// Elites kept from a population of `population` members.
    pub fn elite_count(&self, population: usize) -> usize {
        self.survivors.max(1).min(population)
    }
}

// ── Outcome ─────────────────────────────────────────────────────────

/// Everything one generational step produced.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GenerationOutcome {
    /// Label of the generation that was evolved.
    pub generation: u32,
    /// Elites selected from the scored input, best first.
    pub elites: Vec<ScoredPlan>,
    /// Members eligible as crossover parents.
    pub parent_pool: Vec<ScoredPlan>,
    /// Next population, ranked best first.
    pub next_population: Vec<PlanRecord>,
    /// Next population with scores, ranked best first.
    pub scored: Vec<ScoredPlan>,
}

impl GenerationOutcome {
    pub fn best(&self) -> Option<&ScoredPlan> {
        self.scored.first()
    }

    pub fn population_size(&self) -> usize {
        self.next_population.len()
    }
}

// ── Scoring helpers ─────────────────────────────────────────────────

/// Score one plan, collapsing any failure or non-finite result to 0.0.
pub fn safe_score<S: PlanScorer + ?Sized>(scorer: &S, plan: &PlanRecord) -> f64 {
    match scorer.checked_score(plan) {
        Ok(score) => score,
        Err(e) => {
            debug!(title = %plan.title, error = %e, "Scoring failed; using 0.0");
            0.0
        }
    }
}

/// Score every member and rank them best first (stable).
pub fn score_population<S: PlanScorer + ?Sized>(
    population: &[PlanRecord],
    scorer: &S,
) -> Vec<ScoredPlan> {
    let mut scored: Vec<ScoredPlan> = population
        .iter()
        .map(|plan| ScoredPlan::new(plan.clone(), safe_score(scorer, plan)))
        .collect();
    sort_scored_desc(&mut scored);
    scored
}

/// Members scoring at least `threshold`; when fewer than two qualify, the
/// top two overall (or the single member of a one-member population).
///
/// `ranked` must already be sorted best first.
pub fn select_parent_pool(ranked: &[ScoredPlan], threshold: f64) -> Vec<ScoredPlan> {
    let qualified: Vec<ScoredPlan> = ranked
        .iter()
        .filter(|s| s.score >= threshold)
        .cloned()
        .collect();
    if qualified.len() >= 2 {
        qualified
    } else {
        ranked.iter().take(2).cloned().collect()
    }
}

// ── Engine ──────────────────────────────────────────────────────────

/// Runs generational steps for one domain.
pub struct GenerationEngine {
    domain: String,
    config: EvolutionConfig,
    sink: Option<Arc<dyn GenerationSink>>,
}

impl GenerationEngine {
    pub fn new(domain: impl Into<String>, config: EvolutionConfig) -> Self {
        Self {
            domain: domain.into(),
            config,
            sink: None,
        }
    }

    pub fn with_sink(mut self, sink: Arc<dyn GenerationSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn domain(&self) -> &str {
        &self.domain
    }

    pub fn config(&self) -> &EvolutionConfig {
        &self.config
    }

    /// Evolve one generation from `seed`.
    ///
    /// The returned population holds `min(max(1, survivors), len(seed)) +
    /// offspring` members. Fails only for an empty seed.
    pub fn evolve_once<S, R>(
        &self,
        seed: &[PlanRecord],
        scorer: &S,
        rng: &mut R,
    ) -> GenomeResult<GenerationOutcome>
    where
        S: PlanScorer + ?Sized,
        R: Rng + ?Sized,
    {
        if seed.is_empty() {
            return Err(GenomeError::EmptyPopulation);
        }
        let cfg = &self.config;

        let ranked = score_population(seed, scorer);
        let elites: Vec<ScoredPlan> = ranked
            .iter()
            .take(cfg.elite_count(ranked.len()))
            .cloned()
            .collect();
        let parent_pool = select_parent_pool(&ranked, cfg.discard_threshold);

        let mut children = Vec::with_capacity(cfg.offspring);
        for _ in 0..cfg.offspring {
            let (a, b) = match (parent_pool.choose(rng), parent_pool.choose(rng)) {
                (Some(a), Some(b)) => (a, b),
                _ => return Err(GenomeError::EmptyPopulation),
            };
            let child = crossover(&a.plan, &b.plan, rng);
            children.push(mutate(&child, cfg.mutation_rate, rng));
        }

        let next_population: Vec<PlanRecord> = elites
            .iter()
            .map(|e| e.plan.clone())
            .chain(children)
            .collect();

        if let Some(sink) = &self.sink {
            if let Err(e) = sink.record(&self.domain, cfg.generation, &ranked, &next_population) {
                warn!(
                    domain = %self.domain,
                    generation = cfg.generation,
                    error = %e,
                    "Generation summary not saved"
                );
            }
        }

        let scored = score_population(&next_population, scorer);
        let next_population: Vec<PlanRecord> = scored.iter().map(|s| s.plan.clone()).collect();

        info!(
            domain = %self.domain,
            generation = cfg.generation,
            elites = elites.len(),
            parent_pool = parent_pool.len(),
            offspring = cfg.offspring,
            population = next_population.len(),
            best = scored.first().map(|s| s.score).unwrap_or(0.0),
            "Generation evolved"
        );

        Ok(GenerationOutcome {
            generation: cfg.generation,
            elites,
            parent_pool,
            next_population,
            scored,
        })
    }

    /// Evolve `generations` consecutive steps, advancing the generation label
    /// after each one. Returns every step's outcome in order.
    pub fn run<S, R>(
        &mut self,
        seed: &[PlanRecord],
        scorer: &S,
        rng: &mut R,
        generations: u32,
    ) -> GenomeResult<Vec<GenerationOutcome>>
    where
        S: PlanScorer + ?Sized,
        R: Rng + ?Sized,
    {
        if generations == 0 {
            return Err(GenomeError::InvalidConfig(
                "generations must be at least 1".into(),
            ));
        }

        let mut population = seed.to_vec();
        let mut outcomes = Vec::with_capacity(generations as usize);
        for _ in 0..generations {
            let outcome = self.evolve_once(&population, scorer, rng)?;
            population = outcome.next_population.clone();
            outcomes.push(outcome);
            self.config.generation += 1;
        }
        Ok(outcomes)
    }
}
