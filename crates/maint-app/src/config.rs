//! Configuration management for maint-checker
//!
//! Config stored at: ~/.config/maint-checker/config.json

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use maint_domain::model::ColumnMatchConfig;
use maint_domain::service::classifier::DelayRules;
use maint_domain::service::filter::FilterOptions;
use maint_types::{ConfigError, OutputFormat, Result};

/// Application configuration. The sheet variants drifted on thresholds
/// and filter behavior; those knobs live here rather than in code.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Default output format (json, table)
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Delay thresholds per damage keyword
    #[serde(default)]
    pub delay_rules: DelayRules,

    /// Header match strings for the semantic columns
    #[serde(default)]
    pub columns: ColumnMatchConfig,

    /// Filter/search interaction toggles
    #[serde(default)]
    pub filter: FilterOptions,
}

impl Config {
    /// Get the config directory path
    pub fn config_dir() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .ok_or(ConfigError::NotFound)?
            .join("maint-checker");
        Ok(config_dir)
    }

    /// Get the config file path
    pub fn config_path() -> Result<PathBuf> {
        Ok(Self::config_dir()?.join("config.json"))
    }

    /// Load config from file, or create default
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            let config: Config = serde_json::from_str(&content)
                .map_err(|e| ConfigError::ParseError(e.to_string()))?;
            Ok(config)
        } else {
            Ok(Config::default())
        }
    }

    /// Save config to file
    pub fn save(&self) -> Result<()> {
        let dir = Self::config_dir()?;
        std::fs::create_dir_all(&dir).map_err(|e| ConfigError::SaveError(e.to_string()))?;
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(Self::config_path()?, content)
            .map_err(|e| ConfigError::SaveError(e.to_string()))?;
        Ok(())
    }

    /// Reset to defaults and persist
    pub fn reset() -> Result<Self> {
        let config = Config::default();
        config.save()?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_round_trips_through_json() {
        let config = Config::default();
        let json = serde_json::to_string(&config).unwrap();
        let parsed: Config = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.delay_rules.accident_days, 30);
        assert_eq!(parsed.delay_rules.default_days, 3);
        assert_eq!(parsed.output_format, OutputFormat::Table);
        assert!(!parsed.filter.search_overrides_filter);
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let parsed: Config = serde_json::from_str("{}").unwrap();
        assert_eq!(parsed.columns.vehicle, "Vehicle");
        assert_eq!(parsed.columns.damage, "damag");
        assert_eq!(parsed.delay_rules.oil_days, 3);
    }
}
