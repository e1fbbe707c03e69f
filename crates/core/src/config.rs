//! Configuration structures for the recession study.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Error, Result};
use crate::types::QuarterLabel;

/// Main configuration for the study.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// GDP series configuration.
    #[serde(default)]
    pub gdp: GdpConfig,
    /// Housing resampling configuration.
    #[serde(default)]
    pub housing: HousingConfig,
}

impl Config {
    /// Parse a configuration from JSON text and validate it.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a configuration from a JSON file and validate it.
    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Check invariants that serde cannot express.
    pub fn validate(&self) -> Result<()> {
        if self.housing.horizon_quarters == 0 {
            return Err(Error::config("housing.horizon_quarters must be positive"));
        }
        Ok(())
    }
}

/// GDP series configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GdpConfig {
    /// First quarter kept from the raw series.
    pub epoch: QuarterLabel,
}

impl Default for GdpConfig {
    fn default() -> Self {
        Self {
            epoch: QuarterLabel::first_of(2000),
        }
    }
}

/// Housing resampling configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HousingConfig {
    /// First quarter of the resampling horizon.
    pub horizon_start: QuarterLabel,
    /// Number of quarters in the horizon.
    pub horizon_quarters: usize,
}

impl HousingConfig {
    /// Last quarter of the horizon.
    pub fn horizon_end(&self) -> QuarterLabel {
        self.horizon_start
            .offset(self.horizon_quarters.saturating_sub(1))
    }
}

impl Default for HousingConfig {
    fn default() -> Self {
        Self {
            horizon_start: QuarterLabel::first_of(2000),
            horizon_quarters: 67,
        }
    }
}
