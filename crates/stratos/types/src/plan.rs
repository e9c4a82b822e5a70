//! Plan records: the structured artifact being scored and evolved.

use std::collections::BTreeMap;

use chrono::Utc;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::lenient;
use crate::TIMESTAMP_FORMAT;

// ── Module Entry ────────────────────────────────────────────────────

/// One module of a plan: a named unit of work with a role and an optional
/// dependency marker.
///
/// `name`, `role` and `deps` are read only when they hold text. A value of
/// any other type stays in `extra` under its own key and serializes back
/// unchanged.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct ModuleEntry {
    /// Module name; unique within a plan when present and non-empty.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// What the module does.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    /// Upstream module(s) this one depends on.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deps: Option<String>,
    /// Any other fields the producer attached.
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl<'de> Deserialize<'de> for ModuleEntry {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let mut extra = BTreeMap::<String, Value>::deserialize(d)?;
        let name = lenient::take_text(&mut extra, "name");
        let role = lenient::take_text(&mut extra, "role");
        let deps = lenient::take_text(&mut extra, "deps");
        Ok(Self {
            name,
            role,
            deps,
            extra,
        })
    }
}

impl ModuleEntry {
    pub fn named(name: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            role: Some(role.into()),
            ..Self::default()
        }
    }

    pub fn with_deps(mut self, deps: impl Into<String>) -> Self {
        self.deps = Some(deps.into());
        self
    }

    pub fn with_field(mut self, key: impl Into<String>, value: Value) -> Self {
        self.extra.insert(key.into(), value);
        self
    }

    /// The name, if it is usable as an identifier (present and non-empty).
    pub fn usable_name(&self) -> Option<&str> {
        self.name.as_deref().filter(|n| !n.is_empty())
    }

    /// Merge-time identity of this entry.
    pub fn key(&self) -> ModuleKey {
        match self.usable_name() {
            Some(name) => ModuleKey::Name(name.to_string()),
            None => ModuleKey::Signature(self.signature()),
        }
    }

    /// Canonical serialization of every field, keys sorted.
    pub fn signature(&self) -> String {
        let mut fields: BTreeMap<&str, Value> = self
            .extra
            .iter()
            .map(|(k, v)| (k.as_str(), v.clone()))
            .collect();
        for (key, value) in [
            ("name", &self.name),
            ("role", &self.role),
            ("deps", &self.deps),
        ] {
            if let Some(v) = value {
                fields.insert(key, Value::String(v.clone()));
            }
        }
        serde_json::to_string(&fields).unwrap_or_else(|_| format!("{:?}", fields))
    }
}

/// Identity of a module entry during merges.
///
/// Entries with a usable name are keyed by it; entries without one are keyed
/// by their structural signature and still carry no name.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum ModuleKey {
    Name(String),
    Signature(String),
}

impl std::fmt::Display for ModuleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ModuleKey::Name(name) => write!(f, "name:{}", name),
            ModuleKey::Signature(sig) => write!(f, "sig:{}", sig),
        }
    }
}

// ── Provenance ──────────────────────────────────────────────────────

/// Which genetic operator last produced a plan.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum GenomeOp {
    Crossover,
    Mutated,
}

impl std::fmt::Display for GenomeOp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GenomeOp::Crossover => write!(f, "crossover"),
            GenomeOp::Mutated => write!(f, "mutated"),
        }
    }
}

/// Provenance block. Never read by the evaluator.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanMeta {
    /// Domain tag.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_text"
    )]
    pub domain: Option<String>,
    /// Operator that produced this plan.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::genome_op"
    )]
    pub genome_op: Option<GenomeOp>,
    /// When crossover produced this plan.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_text"
    )]
    pub generated_at: Option<String>,
    /// When mutation last touched this plan.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_text"
    )]
    pub mutated_at: Option<String>,
    /// Rate used by the last mutation.
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_number"
    )]
    pub mutation_rate: Option<f64>,
    /// Opaque version tag used as a lineage identifier.
    #[serde(
        default,
        alias = "qgen_version",
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient::opt_text"
    )]
    pub version: Option<String>,
    /// Lineage identifiers of both crossover parents.
    #[serde(
        default,
        skip_serializing_if = "Vec::is_empty",
        deserialize_with = "lenient::string_list"
    )]
    pub parents: Vec<String>,
    /// Producer-specific fields (model, timestamp, ...).
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl PlanMeta {
    /// Lineage identifier, or `"na"` when the plan carries none.
    pub fn lineage(&self) -> &str {
        self.version
            .as_deref()
            .filter(|v| !v.is_empty())
            .unwrap_or(crate::UNKNOWN_LINEAGE)
    }
}

/// Current UTC time in the provenance timestamp format.
pub fn timestamp_now() -> String {
    Utc::now().format(TIMESTAMP_FORMAT).to_string()
}

// ── Plan Record ─────────────────────────────────────────────────────

/// A structured plan: the unit being evolved and scored.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub objectives: Vec<String>,
    #[serde(default, deserialize_with = "lenient::module_list")]
    pub modules: Vec<ModuleEntry>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub flow: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub risks: Vec<String>,
    #[serde(default, deserialize_with = "lenient::meta")]
    pub meta: PlanMeta,
}

impl PlanRecord {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    pub fn with_objective(mut self, objective: impl Into<String>) -> Self {
        self.objectives.push(objective.into());
        self
    }

    pub fn with_module(mut self, module: ModuleEntry) -> Self {
        self.modules.push(module);
        self
    }

    pub fn with_flow_step(mut self, step: impl Into<String>) -> Self {
        self.flow.push(step.into());
        self
    }

    pub fn with_risk(mut self, risk: impl Into<String>) -> Self {
        self.risks.push(risk.into());
        self
    }

    pub fn with_domain(mut self, domain: impl Into<String>) -> Self {
        self.meta.domain = Some(domain.into());
        self
    }

    pub fn with_version(mut self, version: impl Into<String>) -> Self {
        self.meta.version = Some(version.into());
        self
    }

    /// Usable module names, in module order.
    pub fn module_names(&self) -> Vec<&str> {
        self.modules.iter().filter_map(ModuleEntry::usable_name).collect()
    }

    /// Whether every flow step names a module of this plan.
    pub fn flow_is_consistent(&self) -> bool {
        let names = self.module_names();
        self.flow.iter().all(|step| names.contains(&step.as_str()))
    }

    /// Build a plan from any JSON value without failing.
    ///
    /// Objects decode field by field (see [`crate::lenient`]); any other value
    /// becomes a plan whose title is the value's text.
    pub fn from_value_lenient(value: Value) -> Self {
        match value {
            Value::Object(_) => serde_json::from_value(value).unwrap_or_default(),
            Value::Null => Self::default(),
            Value::String(s) => Self::new(s),
            other => Self::new(other.to_string()),
        }
    }

    /// Parse JSON text, then decode leniently.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        let value: Value = serde_json::from_str(text)?;
        Ok(Self::from_value_lenient(value))
    }
}

impl std::fmt::Display for PlanRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Plan({:?}, objectives={}, modules={}, flow={})",
            self.title,
            self.objectives.len(),
            self.modules.len(),
            self.flow.len(),
        )
    }
}
