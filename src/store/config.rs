//! Store configuration
//!
//! Both limits are fixed when the store is constructed. Configured
//! externally (file or code), immutable afterwards.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::observability::{log_event_with_fields, Event};

use super::errors::{StoreError, StoreResult};

/// Upper bound accepted for `max_level`
pub const MAX_LEVEL_CEILING: usize = 32;

/// Record store configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Capacity ceiling (default: 512)
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,

    /// Maximum tower height (default: 10)
    #[serde(default = "default_max_level")]
    pub max_level: usize,
}

fn default_max_entries() -> usize {
    512
}

fn default_max_level() -> usize {
    10
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_entries: default_max_entries(),
            max_level: default_max_level(),
        }
    }
}

impl StoreConfig {
    /// Create a config with explicit limits
    pub fn new(max_entries: usize, max_level: usize) -> Self {
        Self {
            max_entries,
            max_level,
        }
    }

    /// Load configuration from a JSON file
    pub fn load(path: &Path) -> StoreResult<Self> {
        let result = fs::read_to_string(path)
            .map_err(|e| StoreError::InvalidConfig(format!("Failed to read config: {}", e)))
            .and_then(|content| Self::from_json(&content));

        let path = path.display().to_string();
        match &result {
            Ok(config) => log_event_with_fields(
                Event::ConfigLoaded,
                &[
                    ("path", path.as_str()),
                    ("max_entries", config.max_entries.to_string().as_str()),
                    ("max_level", config.max_level.to_string().as_str()),
                ],
            ),
            Err(e) => log_event_with_fields(
                Event::ConfigRejected,
                &[("path", path.as_str()), ("reason", e.to_string().as_str())],
            ),
        }

        result
    }

    /// Parse and validate configuration from a JSON string
    pub fn from_json(content: &str) -> StoreResult<Self> {
        let config: StoreConfig = serde_json::from_str(content)
            .map_err(|e| StoreError::InvalidConfig(format!("Invalid config JSON: {}", e)))?;

        config.validate()?;

        Ok(config)
    }

    /// Validate limits
    pub fn validate(&self) -> StoreResult<()> {
        if self.max_entries == 0 {
            return Err(StoreError::InvalidConfig("max_entries must be > 0".into()));
        }

        if self.max_level == 0 || self.max_level > MAX_LEVEL_CEILING {
            return Err(StoreError::InvalidConfig(format!(
                "max_level must be within 1..={}, got {}",
                MAX_LEVEL_CEILING, self.max_level
            )));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_defaults() {
        let config = StoreConfig::default();
        assert_eq!(config.max_entries, 512);
        assert_eq!(config.max_level, 10);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_missing_fields_take_defaults() {
        let config = StoreConfig::from_json(r#"{"max_entries": 64}"#).unwrap();
        assert_eq!(config.max_entries, 64);
        assert_eq!(config.max_level, 10);

        let config = StoreConfig::from_json("{}").unwrap();
        assert_eq!(config, StoreConfig::default());
    }

    #[test]
    fn test_rejects_zero_capacity() {
        let err = StoreConfig::from_json(r#"{"max_entries": 0}"#).unwrap_err();
        assert_eq!(err.code(), "SKIP_INVALID_CONFIG");
    }

    #[test]
    fn test_rejects_level_out_of_range() {
        assert!(StoreConfig::new(10, 0).validate().is_err());
        assert!(StoreConfig::new(10, MAX_LEVEL_CEILING + 1).validate().is_err());
        assert!(StoreConfig::new(10, MAX_LEVEL_CEILING).validate().is_ok());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = StoreConfig::from_json("{max_entries: ").unwrap_err();
        assert!(err.to_string().contains("Invalid config JSON"));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{"max_entries": 1000, "max_level": 16}}"#).unwrap();

        let config = StoreConfig::load(file.path()).unwrap();
        assert_eq!(config, StoreConfig::new(1000, 16));
    }

    #[test]
    fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = StoreConfig::load(&dir.path().join("absent.json")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config"));
    }
}
