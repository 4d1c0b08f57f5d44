use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::logging::LogConfig;
use crate::models::Units;

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Configuration metadata
    pub metadata: ConfigMetadata,

    /// General application settings
    pub settings: AppSettings,

    /// Logging settings
    pub logging: LogConfig,
}

/// Configuration metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigMetadata {
    /// Configuration format version
    pub version: String,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub updated_at: DateTime<Utc>,
}

/// General application settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Data directory for the profile store
    pub data_dir: PathBuf,

    /// Default display units (metric/imperial)
    pub default_units: Units,

    /// Days of tracking considered by the adjustment engine
    pub adjustment_window_days: usize,
}

impl Default for ConfigMetadata {
    fn default() -> Self {
        let now = Utc::now();
        ConfigMetadata {
            version: "1".to_string(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl Default for AppSettings {
    fn default() -> Self {
        AppSettings {
            data_dir: dirs::data_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join("nutrirs"),
            default_units: Units::Imperial,
            adjustment_window_days: 7,
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            metadata: ConfigMetadata::default(),
            settings: AppSettings::default(),
            logging: LogConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from TOML file
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(&path)
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: AppConfig =
            toml::from_str(&content).with_context(|| "Failed to parse TOML configuration")?;

        Ok(config)
    }

    /// Save configuration to TOML file
    pub fn save_to_file<P: AsRef<Path>>(&mut self, path: P) -> Result<()> {
        self.metadata.updated_at = Utc::now();

        if let Some(parent) = path.as_ref().parent() {
            fs::create_dir_all(parent).with_context(|| {
                format!("Failed to create config directory: {}", parent.display())
            })?;
        }

        let toml_content = toml::to_string_pretty(self)
            .with_context(|| "Failed to serialize configuration to TOML")?;

        fs::write(&path, toml_content)
            .with_context(|| format!("Failed to write config file: {}", path.as_ref().display()))?;

        Ok(())
    }

    /// Get default configuration file path
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("nutrirs")
            .join("config.toml")
    }

    /// Load configuration with fallback to defaults
    pub fn load_or_default() -> Self {
        match Self::load_from_file(Self::default_config_path()) {
            Ok(config) => config,
            Err(_) => Self::default(),
        }
    }

    /// Save configuration to the default location
    pub fn save_default(&mut self) -> Result<()> {
        self.save_to_file(Self::default_config_path())
    }

    /// Get a configuration value by dotted key for the CLI
    pub fn get_value(&self, key: &str) -> Option<String> {
        match key {
            "settings.data_dir" => Some(self.settings.data_dir.display().to_string()),
            "settings.default_units" => Some(format!("{:?}", self.settings.default_units)),
            "settings.adjustment_window_days" => {
                Some(self.settings.adjustment_window_days.to_string())
            }
            "logging.level" => Some(self.logging.level.to_filter()),
            _ => None,
        }
    }

    /// Set a configuration value by dotted key for the CLI
    pub fn set_value(&mut self, key: &str, value: &str) -> Result<()> {
        match key {
            "settings.data_dir" => {
                self.settings.data_dir = PathBuf::from(value);
            }
            "settings.default_units" => {
                self.settings.default_units = match value.to_lowercase().as_str() {
                    "metric" => Units::Metric,
                    "imperial" => Units::Imperial,
                    _ => anyhow::bail!("Unknown units: {}", value),
                };
            }
            "settings.adjustment_window_days" => {
                self.settings.adjustment_window_days = value
                    .parse()
                    .with_context(|| format!("Invalid window size: {}", value))?;
            }
            "logging.level" => {
                self.logging.level = value.parse().map_err(|e: String| anyhow::anyhow!(e))?;
            }
            _ => anyhow::bail!("Unknown configuration key: {}", key),
        }
        Ok(())
    }

    /// All configuration keys understood by get/set
    pub fn known_keys() -> &'static [&'static str] {
        &[
            "settings.data_dir",
            "settings.default_units",
            "settings.adjustment_window_days",
            "logging.level",
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.settings.default_units, Units::Imperial);
        assert_eq!(config.settings.adjustment_window_days, 7);
        assert_eq!(config.metadata.version, "1");
    }

    #[test]
    fn test_config_round_trip() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AppConfig::default();
        config.settings.adjustment_window_days = 14;
        config.save_to_file(&path).unwrap();

        let loaded = AppConfig::load_from_file(&path).unwrap();
        assert_eq!(loaded.settings.adjustment_window_days, 14);
        assert_eq!(loaded.settings.default_units, config.settings.default_units);
    }

    #[test]
    fn test_toml_serialization() {
        let config = AppConfig::default();
        let toml_str = toml::to_string(&config).unwrap();
        let deserialized: AppConfig = toml::from_str(&toml_str).unwrap();
        assert_eq!(
            deserialized.settings.adjustment_window_days,
            config.settings.adjustment_window_days
        );
    }

    #[test]
    fn test_get_set_values() {
        let mut config = AppConfig::default();

        config.set_value("settings.default_units", "metric").unwrap();
        assert_eq!(config.get_value("settings.default_units").unwrap(), "Metric");

        config
            .set_value("settings.adjustment_window_days", "10")
            .unwrap();
        assert_eq!(
            config.get_value("settings.adjustment_window_days").unwrap(),
            "10"
        );

        assert!(config.set_value("nope", "1").is_err());
        assert!(config.get_value("nope").is_none());
    }

    #[test]
    fn test_save_updates_timestamp() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = AppConfig::default();
        let created = config.metadata.updated_at;
        config.save_to_file(&path).unwrap();
        assert!(config.metadata.updated_at >= created);
    }
}
