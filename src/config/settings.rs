use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::rules::RulePolicy;

/// Main CLI configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct VerifierConfig {
    pub rules: RulePolicy,
    pub store: StoreConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory holding one subdirectory per project (context + generated BEP)
    /// Defaults to ~/.config/bep-verify/projects/
    pub projects_dir: PathBuf,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory where verification reports and records are saved
    pub reports_dir: PathBuf,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            projects_dir: dirs::config_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("bep-verify/projects"),
        }
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            reports_dir: PathBuf::from("./reports"),
        }
    }
}

impl VerifierConfig {
    /// Load configuration from a YAML file
    pub fn from_file(path: &PathBuf) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: VerifierConfig = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration, falling back to defaults if file doesn't exist
    pub fn load_or_default(path: Option<&PathBuf>) -> anyhow::Result<Self> {
        match path {
            Some(p) if p.exists() => Self::from_file(p),
            _ => Ok(Self::default()),
        }
    }

    fn validate(&self) -> anyhow::Result<()> {
        let threshold = self.rules.discipline_majority_threshold;
        if !(0.0..1.0).contains(&threshold) {
            anyhow::bail!(
                "rules.discipline_majority_threshold must be in [0.0, 1.0), got {}",
                threshold
            );
        }
        Ok(())
    }
}
