//! Engine configuration loading.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config: {0}")]
    ParseError(#[from] toml::de::Error),
}

/// Pairing engine configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Seed for the tie-break randomness. Omit for OS entropy; set it to
    /// make pairings reproducible (tests, replaying a round).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,

    /// Allow pairing into the adjacent standing group when a player has no
    /// legal opponent inside their own group. Off by default: the strict
    /// same-group policy.
    #[serde(default = "default_adjacent_fallback")]
    pub adjacent_fallback: bool,
}

fn default_adjacent_fallback() -> bool {
    false
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            seed: None,
            adjacent_fallback: default_adjacent_fallback(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: EngineConfig = toml::from_str(&contents)?;
        Ok(config)
    }
}
