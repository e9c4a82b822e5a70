//! Lenient field decoders.
//!
//! Plans come from external generators and hand-edited files. A field of the
//! wrong shape decodes as its empty form instead of failing the whole plan:
//! a non-array list is empty, non-string list entries are dropped, non-object
//! module entries are dropped, and a malformed meta block is default meta.
//! Module fields that should be text but are not keep their value verbatim
//! among the entry's extra fields.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::plan::{GenomeOp, ModuleEntry, PlanMeta};

/// Text field: `null` is empty, other scalars keep their JSON text.
pub fn text<'de, D: Deserializer<'de>>(d: D) -> Result<String, D::Error> {
    Ok(opt_text_from(Value::deserialize(d)?).unwrap_or_default())
}

/// Optional text field: `null` is `None`, other scalars keep their JSON text.
pub fn opt_text<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
    Ok(opt_text_from(Value::deserialize(d)?))
}

/// Optional number: anything that is not a JSON number is `None`.
pub fn opt_number<'de, D: Deserializer<'de>>(d: D) -> Result<Option<f64>, D::Error> {
    Ok(Value::deserialize(d)?.as_f64())
}

/// Ordered string list; non-arrays are empty and non-strings are dropped.
pub fn string_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
    Ok(strings_from(Value::deserialize(d)?))
}

/// Module list; non-arrays are empty and non-object entries are dropped.
pub fn module_list<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<ModuleEntry>, D::Error> {
    Ok(modules_from(Value::deserialize(d)?))
}

/// Genome operation tag; unknown tags are `None`.
pub fn genome_op<'de, D: Deserializer<'de>>(d: D) -> Result<Option<GenomeOp>, D::Error> {
    let value = Value::deserialize(d)?;
    Ok(serde_json::from_value(value).ok())
}

/// Provenance block; anything that is not a well-formed object is default meta.
pub fn meta<'de, D: Deserializer<'de>>(d: D) -> Result<PlanMeta, D::Error> {
    let value = Value::deserialize(d)?;
    if !value.is_object() {
        return Ok(PlanMeta::default());
    }
    Ok(serde_json::from_value(value).unwrap_or_default())
}

/// Remove `key` from `fields` when it holds text or `null`. Any other value
/// is left in place.
pub fn take_text(fields: &mut BTreeMap<String, Value>, key: &str) -> Option<String> {
    match fields.remove(key)? {
        Value::String(s) => Some(s),
        Value::Null => None,
        other => {
            fields.insert(key.to_string(), other);
            None
        }
    }
}

pub(crate) fn opt_text_from(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        other => Some(other.to_string()),
    }
}

pub(crate) fn strings_from(value: Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    }
}

pub(crate) fn modules_from(value: Value) -> Vec<ModuleEntry> {
    match value {
        Value::Array(items) => items
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect(),
        _ => Vec::new(),
    }
}
