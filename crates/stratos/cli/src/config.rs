//! CLI configuration and domain profiles

use crate::error::{CliError, CliResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use stratos_evaluator::{tuning_baseline, FactorWeights};
use stratos_genome::EvolutionConfig;
use tracing::debug;

/// CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Default domain tag
    pub domain: String,

    /// Root directory for generation summaries
    pub output_root: PathBuf,

    /// Root directory holding `<domain>/config.yaml` profiles
    pub profiles_root: PathBuf,

    /// Evolution engine settings
    pub evolution: EvolutionConfig,

    /// Weight override; takes precedence over the domain profile
    pub weights: Option<FactorWeights>,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            domain: "default".into(),
            output_root: PathBuf::from("output"),
            profiles_root: PathBuf::from("domains"),
            evolution: EvolutionConfig::default(),
            weights: None,
        }
    }
}

impl CliConfig {
    /// Load configuration from file
    pub fn load(path: Option<&str>) -> CliResult<Self> {
        let config_path = match path {
            Some(p) => PathBuf::from(p),
            None => match Self::default_config_path() {
                Some(p) => p,
                None => return Ok(CliConfig::default()),
            },
        };

        if config_path.exists() {
            let contents = std::fs::read_to_string(&config_path)?;
            let config: CliConfig =
                toml::from_str(&contents).map_err(|e| CliError::Config(e.to_string()))?;
            debug!(path = %config_path.display(), "Loaded CLI config");
            Ok(config)
        } else {
            Ok(CliConfig::default())
        }
    }

    /// Get the default configuration file path
    fn default_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("stratos").join("config.toml"))
    }

    /// Weights for a domain: config override, then profile, then defaults.
    pub fn resolve_weights(&self, domain: &str) -> CliResult<FactorWeights> {
        if let Some(weights) = self.weights {
            return Ok(weights);
        }
        let profile = DomainProfile::load(&self.profiles_root, domain)?;
        Ok(profile
            .and_then(|p| p.weights())
            .unwrap_or_default())
    }
}

/// What `stratos config` reports: the active domain, its resolved weights,
/// and the loaded configuration.
#[derive(Debug, Serialize)]
pub struct ConfigView<'a> {
    pub domain: &'a str,
    pub weights: FactorWeights,
    pub config: &'a CliConfig,
}

impl<'a> ConfigView<'a> {
    pub fn resolve(config: &'a CliConfig, domain: &'a str) -> CliResult<Self> {
        Ok(Self {
            domain,
            weights: config.resolve_weights(domain)?,
            config,
        })
    }
}

/// A domain profile document (`<root>/<domain>/config.yaml`).
///
/// Only `stratos_weights` is interpreted; every other key is kept as-is so
/// that rewriting the weights preserves the rest of the profile.
#[derive(Debug, Clone)]
pub struct DomainProfile {
    path: PathBuf,
    doc: serde_yaml::Value,
}

impl DomainProfile {
    pub fn path_for(root: &Path, domain: &str) -> PathBuf {
        root.join(domain).join("config.yaml")
    }

    /// Load a profile; `None` when the file does not exist.
    pub fn load(root: &Path, domain: &str) -> CliResult<Option<Self>> {
        let path = Self::path_for(root, domain);
        if !path.exists() {
            return Ok(None);
        }
        let contents = std::fs::read_to_string(&path)?;
        let doc: serde_yaml::Value = serde_yaml::from_str(&contents)?;
        let doc = if doc.is_null() {
            serde_yaml::Value::Mapping(serde_yaml::Mapping::new())
        } else {
            doc
        };
        Ok(Some(Self { path, doc }))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The profile's `stratos_weights`, if present and well-formed.
    pub fn weights(&self) -> Option<FactorWeights> {
        let raw = self.doc.get("stratos_weights")?;
        serde_yaml::from_value(raw.clone()).ok()
    }

    /// Starting weights for tuning. Legacy factor keys are mapped, values
    /// that are not numeric are skipped one by one, and missing factors take
    /// their defaults.
    pub fn tuning_weights(&self) -> FactorWeights {
        match self.doc.get("stratos_weights").and_then(|v| v.as_mapping()) {
            Some(map) => tuning_baseline(
                map.iter()
                    .filter_map(|(k, v)| k.as_str().map(|key| (key, yaml_number(v)))),
            ),
            None => FactorWeights::default(),
        }
    }

    pub fn set_weights(&mut self, weights: &FactorWeights) -> CliResult<()> {
        let value = serde_yaml::to_value(weights)?;
        match self.doc.as_mapping_mut() {
            Some(map) => {
                map.insert("stratos_weights".into(), value);
                Ok(())
            }
            None => Err(CliError::Config(format!(
                "profile {} is not a mapping",
                self.path.display()
            ))),
        }
    }

    /// Back up the current file under `config_history/`, then write the profile.
    ///
    /// Returns the backup path.
    pub fn save_with_backup(&self) -> CliResult<PathBuf> {
        let dir = self
            .path
            .parent()
            .ok_or_else(|| CliError::Config("profile has no parent directory".into()))?;
        let history = dir.join("config_history");
        std::fs::create_dir_all(&history)?;

        let stamp = chrono::Utc::now().format("%Y%m%d_%H%M%S");
        let backup = history.join(format!("config_{}.yaml", stamp));
        std::fs::copy(&self.path, &backup)?;

        std::fs::write(&self.path, serde_yaml::to_string(&self.doc)?)?;
        Ok(backup)
    }
}

fn yaml_number(value: &serde_yaml::Value) -> Option<f64> {
    match value {
        serde_yaml::Value::Number(n) => n.as_f64(),
        serde_yaml::Value::String(s) => s.trim().parse().ok(),
        serde_yaml::Value::Bool(b) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    }
}
