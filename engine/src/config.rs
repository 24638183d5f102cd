//! Engine configuration file support.
//!
//! Reads dashboard defaults from a TOML file: the timeline's initial
//! granularity and week-window length, and the retention terms applied
//! when a contract doesn't specify its own.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::domain::Granularity;
use crate::store::repository::StoreError;

/// Engine configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default)]
    pub timeline: TimelineSettings,
    #[serde(default)]
    pub retention: RetentionSettings,
}

/// Timeline view settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TimelineSettings {
    #[serde(default = "default_granularity")]
    pub default_granularity: String,
    #[serde(default = "default_weeks_per_view")]
    pub weeks_per_view: usize,
}

/// Default retention terms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetentionSettings {
    #[serde(default = "default_retention_percent")]
    pub default_percent: f64,
    #[serde(default = "default_dlp_months")]
    pub default_dlp_months: u32,
    #[serde(default = "default_upcoming_horizon_days")]
    pub upcoming_horizon_days: i64,
}

fn default_granularity() -> String {
    "month".to_string()
}

fn default_weeks_per_view() -> usize {
    12
}

fn default_retention_percent() -> f64 {
    5.0
}

fn default_dlp_months() -> u32 {
    12
}

fn default_upcoming_horizon_days() -> i64 {
    60
}

impl Default for TimelineSettings {
    fn default() -> Self {
        Self {
            default_granularity: default_granularity(),
            weeks_per_view: default_weeks_per_view(),
        }
    }
}

impl Default for RetentionSettings {
    fn default() -> Self {
        Self {
            default_percent: default_retention_percent(),
            default_dlp_months: default_dlp_months(),
            upcoming_horizon_days: default_upcoming_horizon_days(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            timeline: TimelineSettings::default(),
            retention: RetentionSettings::default(),
        }
    }
}

impl EngineConfig {
    /// Load configuration from a TOML file.
    ///
    /// # Arguments
    /// * `path` - Path to the configuration file
    ///
    /// # Returns
    /// * `Ok(EngineConfig)` if successful
    /// * `Err(StoreError)` if the file cannot be read or parsed
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, StoreError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            StoreError::Configuration(format!("Failed to read config file: {}", e))
        })?;

        let config: EngineConfig = toml::from_str(&content).map_err(|e| {
            StoreError::Configuration(format!("Failed to parse config file: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration from the default location.
    ///
    /// Searches for `siteline.toml` in:
    /// 1. Current directory
    /// 2. `engine/` directory
    /// 3. Parent directory
    ///
    /// Falls back to built-in defaults when no file is found.
    pub fn from_default_location() -> Result<Self, StoreError> {
        let search_paths = vec![
            PathBuf::from("siteline.toml"),
            PathBuf::from("engine/siteline.toml"),
            PathBuf::from("../siteline.toml"),
        ];

        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }

        Ok(Self::default())
    }

    /// Resolved granularity selector.
    pub fn granularity(&self) -> Result<Granularity, StoreError> {
        Granularity::from_key(&self.timeline.default_granularity).map_err(StoreError::Configuration)
    }

    fn validate(&self) -> Result<(), StoreError> {
        if self.timeline.weeks_per_view == 0 {
            return Err(StoreError::Configuration(
                "timeline.weeks_per_view must be at least 1".to_string(),
            ));
        }
        if !(0.0..=100.0).contains(&self.retention.default_percent) {
            return Err(StoreError::Configuration(format!(
                "retention.default_percent out of range: {}",
                self.retention.default_percent
            )));
        }
        self.granularity()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_are_sane() {
        let config = EngineConfig::default();
        assert_eq!(config.timeline.weeks_per_view, 12);
        assert_eq!(config.retention.default_percent, 5.0);
        assert_eq!(config.retention.default_dlp_months, 12);
        assert_eq!(config.granularity().unwrap(), Granularity::Month);
    }

    #[test]
    fn parses_partial_files_with_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[timeline]\ndefault_granularity = \"week\"\nweeks_per_view = 8"
        )
        .unwrap();

        let config = EngineConfig::from_file(file.path()).unwrap();
        assert_eq!(config.granularity().unwrap(), Granularity::Week);
        assert_eq!(config.timeline.weeks_per_view, 8);
        // Untouched section keeps defaults.
        assert_eq!(config.retention.default_percent, 5.0);
    }

    #[test]
    fn rejects_bad_values() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[retention]\ndefault_percent = 250.0").unwrap();
        assert!(matches!(
            EngineConfig::from_file(file.path()),
            Err(StoreError::Configuration(_))
        ));

        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[timeline]\ndefault_granularity = \"fortnight\"").unwrap();
        assert!(EngineConfig::from_file(file.path()).is_err());
    }

    #[test]
    fn missing_file_is_a_configuration_error() {
        assert!(matches!(
            EngineConfig::from_file("/definitely/not/here.toml"),
            Err(StoreError::Configuration(_))
        ));
    }
}
