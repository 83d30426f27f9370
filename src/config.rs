// ⚙️ Dashboard Configuration - JSON file with sensible defaults
//
// Every field is optional in the file; missing fields take the defaults
// below. No file at all is the normal case.

use crate::projection::ViewportPolicy;
use anyhow::{Context as AnyhowContext, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub const DEFAULT_CONFIG_FILE: &str = "market-intel.json";
pub const DEFAULT_DATA_FILE: &str = "data/university-of-tulsa-data.csv";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    /// Competitor CSV, relative to the working directory
    pub data_path: PathBuf,

    /// Most suggestions the search-and-add control offers
    pub suggestion_limit: usize,

    /// Closest zoom level a fitted map viewport may reach
    pub max_zoom: u8,

    /// Fraction of the marker span added on every side of the viewport
    pub viewport_padding: f64,

    /// Bind address for the JSON API
    pub server_addr: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        DashboardConfig {
            data_path: PathBuf::from(DEFAULT_DATA_FILE),
            suggestion_limit: 10,
            max_zoom: 10,
            viewport_padding: 0.1,
            server_addr: "0.0.0.0:3000".to_string(),
        }
    }
}

impl DashboardConfig {
    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {:?}", path.as_ref()))?;

        let config: DashboardConfig = serde_json::from_str(&content)
            .context("Failed to parse dashboard config JSON")?;

        Ok(config)
    }

    /// Load from `path` when it exists, otherwise fall back to defaults
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        if path.as_ref().exists() {
            info!(path = ?path.as_ref(), "loading dashboard config");
            Self::from_file(path)
        } else {
            Ok(Self::default())
        }
    }

    pub fn viewport_policy(&self) -> ViewportPolicy {
        ViewportPolicy {
            padding_ratio: self.viewport_padding,
            max_zoom: self.max_zoom,
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = DashboardConfig::default();

        assert_eq!(config.data_path, PathBuf::from(DEFAULT_DATA_FILE));
        assert_eq!(config.suggestion_limit, 10);
        assert_eq!(config.viewport_policy(), ViewportPolicy::default());
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let config: DashboardConfig =
            serde_json::from_str(r#"{ "data_path": "other.csv", "max_zoom": 8 }"#).unwrap();

        assert_eq!(config.data_path, PathBuf::from("other.csv"));
        assert_eq!(config.max_zoom, 8);
        assert_eq!(config.suggestion_limit, 10);
        assert_eq!(config.server_addr, "0.0.0.0:3000");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = DashboardConfig::load_or_default("does/not/exist.json").unwrap();
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_from_file_round_trip() {
        let path = std::env::temp_dir().join(format!("market-intel-config-{}.json", uuid::Uuid::new_v4()));
        let config = DashboardConfig {
            suggestion_limit: 5,
            ..Default::default()
        };
        fs::write(&path, serde_json::to_string_pretty(&config).unwrap()).unwrap();

        let loaded = DashboardConfig::from_file(&path).unwrap();
        fs::remove_file(&path).unwrap();

        assert_eq!(loaded.suggestion_limit, 5);
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(serde_json::from_str::<DashboardConfig>("not json").is_err());
    }
}
