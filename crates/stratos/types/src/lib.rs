//! # stratos-types
//!
//! Shared data model for the STRATOS plan evolution workspace.
//!
//! A [`PlanRecord`] is the unit being scored and evolved: a title, ordered
//! objectives, a set of named modules, an execution flow over those module
//! names, risks, and a provenance block. Plans arrive from outside as loosely
//! shaped JSON, so every field decodes leniently (see [`lenient`]) and a plan
//! can always be built from any JSON value.
//!
//! # Invariants
//!
//! - Module names are unique within a plan after any merge; entries without a
//!   usable name are identified by a structural signature ([`ModuleKey`]).
//! - `flow` only references names present in `modules` after crossover.
//! - `meta` never influences scoring.

#![deny(unsafe_code)]

pub mod lenient;
pub mod plan;
pub mod report;

// ── Re-exports ──────────────────────────────────────────────────────

pub use plan::{timestamp_now, GenomeOp, ModuleEntry, ModuleKey, PlanMeta, PlanRecord};
pub use report::{round1, sort_scored_desc, EvaluationReport, ScoredPlan};

/// Format used for every provenance timestamp.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Lineage identifier recorded when a parent carries no version tag.
pub const UNKNOWN_LINEAGE: &str = "na";
