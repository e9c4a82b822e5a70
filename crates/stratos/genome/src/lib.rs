//! # stratos-genome
//!
//! Genetic operators and the generational evolution engine for plan records.
//!
//! # Generation Step
//!
//! 1. **Score** every member; a failing scorer yields 0.0 for that member.
//! 2. **Rank** best first (stable).
//! 3. **Elites**: the top `max(1, survivors)` members survive unchanged.
//! 4. **Parent pool**: members at or above `discard_threshold`, falling back
//!    to the top two (or the only member).
//! 5. **Breed** `offspring` children: two parents drawn with replacement,
//!    crossed over, then mutated.
//! 6. **Record** a best-effort summary through the configured sink.
//! 7. **Re-score** and rank the next population.
//!
//! All randomness flows through the caller's `rand::Rng`.

#![deny(unsafe_code)]

pub mod engine;
pub mod error;
pub mod operators;
pub mod persistence;

// ── Re-exports ──────────────────────────────────────────────────────

pub use engine::{
    safe_score, score_population, select_parent_pool, EvolutionConfig, GenerationEngine,
    GenerationOutcome,
};
pub use error::{GenomeError, GenomeResult, PersistenceError, PersistenceResult};
pub use operators::{
    crossover, dedup_strings, merge_modules, merge_strings, mix_title, mutate, DEFAULT_TITLE,
    EXPLORATORY_OBJECTIVE, EXPLORATORY_RISK, PLACEHOLDER_MODULE, TITLE_TAGS,
};
pub use persistence::{
    FailingSink, GenerationSink, GenerationSummary, JsonFileSink, MemorySink, SummaryEntry,
    SUMMARY_TOP_N,
};
