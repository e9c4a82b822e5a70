//! CLI command implementations

pub mod evaluate;
pub mod evolve;
pub mod seed;
pub mod tune;

use std::io::Read;
use std::path::Path;

use serde_json::Value;
use stratos_types::PlanRecord;

use crate::error::{CliError, CliResult};

/// Read a JSON document from a file, or from stdin when `path` is `-`.
pub fn read_json(path: &str) -> CliResult<Value> {
    let text = if path == "-" {
        let mut buf = String::new();
        std::io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        if !Path::new(path).exists() {
            return Err(CliError::NotFound(path.to_string()));
        }
        std::fs::read_to_string(path)?
    };
    Ok(serde_json::from_str(&text)?)
}

/// Decode a population: a JSON array of plans, or a single plan object.
pub fn population_from_value(value: Value) -> CliResult<Vec<PlanRecord>> {
    match value {
        Value::Array(items) => Ok(items.into_iter().map(PlanRecord::from_value_lenient).collect()),
        obj @ Value::Object(_) => Ok(vec![PlanRecord::from_value_lenient(obj)]),
        other => Err(CliError::InvalidInput(format!(
            "expected a plan object or an array of plans, got {}",
            kind(&other)
        ))),
    }
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
