//! habitboard configuration
//!
//! Stored as TOML in `<config_dir>/habitboard/config.toml`:
//!
//! ```toml
//! taxonomy_path = "/home/me/habits/taxonomy.toml"
//! default_window_days = 30
//! suggestion_limit = 5
//! rollup_mode = "distinct-events"
//! ```

use crate::analytics::RollupMode;
use crate::error::CoreError;
use crate::taxonomy::Taxonomy;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

const CONFIG_FILE: &str = "config.toml";

/// User configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HabitboardConfig {
    /// Seed file for an extended taxonomy (baseline when unset)
    pub taxonomy_path: Option<PathBuf>,
    /// Trend window when none is requested
    pub default_window_days: u32,
    /// Maximum tag suggestions to show
    pub suggestion_limit: usize,
    pub rollup_mode: RollupMode,
}

impl Default for HabitboardConfig {
    fn default() -> Self {
        Self {
            taxonomy_path: None,
            default_window_days: 30,
            suggestion_limit: 5,
            rollup_mode: RollupMode::default(),
        }
    }
}

impl HabitboardConfig {
    /// Default config location, if the platform has a config directory
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("habitboard").join(CONFIG_FILE))
    }

    /// Load and check a config file
    pub fn load(path: &Path) -> Result<Self, CoreError> {
        let content = std::fs::read_to_string(path).map_err(|e| CoreError::from_io(path, e))?;
        let config: Self = toml::from_str(&content).map_err(|e| CoreError::TomlParse {
            path: path.to_path_buf(),
            message: e.message().to_string(),
            source: e,
        })?;

        if config.default_window_days == 0 {
            return Err(CoreError::InvalidConfig {
                message: "default_window_days must be at least 1".to_string(),
            });
        }

        debug!(?path, "Loaded config");
        Ok(config)
    }

    /// Load a config file, returning defaults on any error
    ///
    /// A missing file is normal and logged at debug level; an unreadable or
    /// invalid one is logged as a warning.
    pub fn load_or_default(path: &Path) -> Self {
        match Self::load(path) {
            Ok(config) => config,
            Err(CoreError::FileNotFound { .. }) => {
                debug!(?path, "Config file not found, using defaults");
                Self::default()
            }
            Err(e) => {
                warn!(?path, error = %e, "Failed to load config, using defaults");
                Self::default()
            }
        }
    }

    /// Resolve the configured taxonomy (baseline when no seed file is set)
    pub fn taxonomy(&self) -> Result<Taxonomy, CoreError> {
        match &self.taxonomy_path {
            Some(path) => Taxonomy::load(path),
            None => Ok(Taxonomy::baseline().clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = HabitboardConfig::default();
        assert_eq!(config.default_window_days, 30);
        assert_eq!(config.suggestion_limit, 5);
        assert_eq!(config.rollup_mode, RollupMode::DistinctEvents);
        assert!(config.taxonomy_path.is_none());
    }

    #[test]
    fn test_partial_toml_fills_defaults() {
        let config: HabitboardConfig = toml::from_str("rollup_mode = \"tag-sum\"").unwrap();
        assert_eq!(config.rollup_mode, RollupMode::TagSum);
        assert_eq!(config.default_window_days, 30);
    }

    #[test]
    fn test_baseline_taxonomy_when_unset() {
        let taxonomy = HabitboardConfig::default().taxonomy().unwrap();
        assert!(taxonomy.is_umbrella("food"));
    }
}
