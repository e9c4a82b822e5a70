//! Generation summary sinks.
//!
//! A summary is a best-effort snapshot of one generation: the five best
//! scored members and the size of the population that follows. The engine
//! discards any error a sink returns.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use stratos_types::{sort_scored_desc, timestamp_now, PlanRecord, ScoredPlan};
use tracing::debug;

use crate::error::{PersistenceError, PersistenceResult};

/// Number of top members kept in a summary.
pub const SUMMARY_TOP_N: usize = 5;

/// One ranked member in a generation summary.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SummaryEntry {
    pub title: String,
    pub score: f64,
    pub objectives: Vec<String>,
    pub flow: Vec<String>,
}

/// Snapshot of one generation.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GenerationSummary {
    pub generation: u32,
    pub timestamp: String,
    pub top: Vec<SummaryEntry>,
    pub population_size: usize,
}

impl GenerationSummary {
    pub fn build(generation: u32, scored: &[ScoredPlan], next_population: &[PlanRecord]) -> Self {
        let mut ranked = scored.to_vec();
        sort_scored_desc(&mut ranked);
        let top = ranked
            .into_iter()
            .take(SUMMARY_TOP_N)
            .map(|s| SummaryEntry {
                title: s.plan.title,
                score: s.score,
                objectives: s.plan.objectives,
                flow: s.plan.flow,
            })
            .collect();

        Self {
            generation,
            timestamp: timestamp_now(),
            top,
            population_size: next_population.len(),
        }
    }
}

/// Receives one summary per generation.
pub trait GenerationSink: Send + Sync {
    fn record(
        &self,
        domain: &str,
        generation: u32,
        scored: &[ScoredPlan],
        next_population: &[PlanRecord],
    ) -> PersistenceResult<()>;
}

// ── JSON file sink ──────────────────────────────────────────────────

/// Writes `<root>/<domain>/genome/gen_<NNN>.json`.
pub struct JsonFileSink {
    root: PathBuf,
}

impl JsonFileSink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Summary path for a generation.
    pub fn path_for(&self, domain: &str, generation: u32) -> PathBuf {
        self.root
            .join(domain)
            .join("genome")
            .join(format!("gen_{:03}.json", generation))
    }

    /// Read a previously written summary.
    pub fn load(&self, domain: &str, generation: u32) -> PersistenceResult<GenerationSummary> {
        let file = File::open(self.path_for(domain, generation))?;
        Ok(serde_json::from_reader(file)?)
    }
}

impl GenerationSink for JsonFileSink {
    fn record(
        &self,
        domain: &str,
        generation: u32,
        scored: &[ScoredPlan],
        next_population: &[PlanRecord],
    ) -> PersistenceResult<()> {
        let path = self.path_for(domain, generation);
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let summary = GenerationSummary::build(generation, scored, next_population);
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, &summary)?;
        writer.flush()?;

        debug!(path = %path.display(), generation, "Generation summary written");
        Ok(())
    }
}

// ── In-memory sink ──────────────────────────────────────────────────

/// Keeps summaries in memory, keyed by domain.
pub struct MemorySink {
    summaries: RwLock<Vec<(String, GenerationSummary)>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self {
            summaries: RwLock::new(Vec::new()),
        }
    }

    /// All recorded `(domain, summary)` pairs, oldest first.
    pub fn summaries(&self) -> Vec<(String, GenerationSummary)> {
        self.summaries.read().clone()
    }

    pub fn len(&self) -> usize {
        self.summaries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.summaries.read().is_empty()
    }
}

impl Default for MemorySink {
    fn default() -> Self {
        Self::new()
    }
}

impl GenerationSink for MemorySink {
    fn record(
        &self,
        domain: &str,
        generation: u32,
        scored: &[ScoredPlan],
        next_population: &[PlanRecord],
    ) -> PersistenceResult<()> {
        let summary = GenerationSummary::build(generation, scored, next_population);
        self.summaries.write().push((domain.to_string(), summary));
        Ok(())
    }
}

/// Sink that always fails, for exercising the engine's error absorption.
pub struct FailingSink;

impl GenerationSink for FailingSink {
    fn record(
        &self,
        _domain: &str,
        _generation: u32,
        _scored: &[ScoredPlan],
        _next_population: &[PlanRecord],
    ) -> PersistenceResult<()> {
        Err(PersistenceError::Unavailable("simulated sink failure".into()))
    }
}
