use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use ergo_matrix::{DEFAULT_EPSILON, DEFAULT_MAX_ITER};

/// Top-level ergo configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ErgoConfig {
    /// Convergence loop settings.
    #[serde(default)]
    pub convergence: ConvergenceToml,

    /// Output file settings.
    #[serde(default)]
    pub output: OutputToml,
}

impl ErgoConfig {
    /// Reads a configuration file, or returns defaults when `path` is `None`.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let Some(path) = path else {
            return Ok(Self::default());
        };
        let toml_str = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;
        toml::from_str(&toml_str).context("failed to parse TOML config")
    }
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct ConvergenceToml {
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,
    #[serde(default = "default_max_iter")]
    pub max_iter: usize,
}

impl Default for ConvergenceToml {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            max_iter: default_max_iter(),
        }
    }
}

fn default_epsilon() -> f64 {
    DEFAULT_EPSILON
}
fn default_max_iter() -> usize {
    DEFAULT_MAX_ITER
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct OutputToml {
    pub graph_mermaid: Option<PathBuf>,
    pub hasse_mermaid: Option<PathBuf>,
    pub json: Option<PathBuf>,
}
