use crate::error::{CliError, Result};
use argon::engine::config::{FireConfig, LangevinConfig};
use serde::Deserialize;
use std::path::Path;

/// On-disk simulation configuration: one optional section per integrator.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub fire: Option<FireConfig>,
    pub langevin: Option<LangevinConfig>,
}

impl SimulationConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;
        toml::from_str(&content).map_err(|e| CliError::Config {
            path: path.to_path_buf(),
            message: e.to_string(),
        })
    }

    /// Loads the file when given, or falls back to defaults.
    pub fn load_or_default(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::load(p),
            None => Ok(Self::default()),
        }
    }

    pub fn fire(&self) -> FireConfig {
        self.fire.unwrap_or_default()
    }

    pub fn langevin(&self) -> LangevinConfig {
        self.langevin.unwrap_or_default()
    }
}
