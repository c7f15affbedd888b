use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::layout::LayoutConfig;
use crate::present::PresentationConfig;

/// Every tunable of the pipeline. Missing fields in a config file fall back
/// to the defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub layout: LayoutConfig,
    pub presentation: PresentationConfig,
    /// Allowed distance (percentage points) of the total from 100 before the
    /// coverage is reported as imbalanced
    pub balance_tolerance: f64,
    /// Distance from 100 beyond which detected percentages are rescaled
    pub rebalance_tolerance: f64,
    /// Rescale detected percentages to sum to 100 before layout
    pub rebalance: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            layout: LayoutConfig::default(),
            presentation: PresentationConfig::default(),
            balance_tolerance: 0.5,
            rebalance_tolerance: 0.1,
            rebalance: true,
        }
    }
}

impl Config {
    /// Read a JSON config file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        Self::from_json(&text).with_context(|| format!("parsing config {}", path.display()))
    }

    pub fn from_json(text: &str) -> Result<Self> {
        let config: Config = serde_json::from_str(text)?;
        tracing::debug!("Loaded config: {:?}", config);
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_config_keeps_defaults() {
        let config = Config::from_json(r#"{"layout": {"min_box_size": 24.0}, "balance_tolerance": 1.0}"#).unwrap();
        assert_eq!(config.layout.min_box_size, 24.0);
        assert_eq!(config.layout.row_candidate_cap, 4);
        assert_eq!(config.balance_tolerance, 1.0);
        assert_eq!(config.presentation, PresentationConfig::default());
        assert!(config.rebalance);
    }

    #[test]
    fn empty_object_is_default() {
        assert_eq!(Config::from_json("{}").unwrap(), Config::default());
    }

    #[test]
    fn malformed_config_is_an_error() {
        assert!(Config::from_json(r#"{"layout": {"min_box_size": "big"}}"#).is_err());
    }

    #[test]
    fn missing_file_mentions_path() {
        let err = Config::load(Path::new("/definitely/not/here.json")).unwrap_err();
        assert!(format!("{err:#}").contains("/definitely/not/here.json"));
    }
}
