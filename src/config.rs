//! Engine configuration
//!
//! Defaults reproduce the stock heuristic. A JSON file may override any
//! subset of fields; missing fields keep their defaults.

use crate::predict::PredictorConfig;
use crate::types::MIN_SAMPLES;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EngineConfig {
    pub predictor: PredictorConfig,
    /// History length required before predictions are issued
    pub min_samples: usize,
    /// Pause between scoring and presenting a prediction
    pub reveal_delay_ms: u64,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            predictor: PredictorConfig::default(),
            min_samples: MIN_SAMPLES,
            reveal_delay_ms: 600,
        }
    }
}

impl EngineConfig {
    /// Load configuration from a JSON file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {:?}", path))?;
        Self::from_json(&content).with_context(|| format!("Invalid config in {:?}", path))
    }

    pub fn from_json(content: &str) -> Result<Self> {
        let config: EngineConfig =
            serde_json::from_str(content).context("Failed to parse config JSON")?;
        Ok(config)
    }

    pub fn reveal_delay(&self) -> Duration {
        Duration::from_millis(self.reveal_delay_ms)
    }
}
