// Configuration Storage Service
// Handles config file read/write for detection and logging settings

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to access config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[source] serde_json::Error),
    #[error("Failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    #[serde(default = "default_version")]
    pub version: String,
    #[serde(default)]
    pub detection: DetectionConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            version: default_version(),
            detection: DetectionConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

/// Tunables of the detection pipeline. Defaults match the documented engine contract.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DetectionConfig {
    /// Minimum trimmed length in code points.
    #[serde(default = "default_min_chars")]
    pub min_chars: usize,
    #[serde(default = "default_min_sentences")]
    pub min_sentences: usize,
    #[serde(default = "default_min_words")]
    pub min_words: usize,
    /// How many preceding words count as "recent" for repetition.
    #[serde(default = "default_repetition_window")]
    pub repetition_window: usize,
    /// Evidence strength at which a feature earns its own reason.
    #[serde(default = "default_notable_threshold")]
    pub notable_threshold: f64,
}

impl Default for DetectionConfig {
    fn default() -> Self {
        Self {
            min_chars: default_min_chars(),
            min_sentences: default_min_sentences(),
            min_words: default_min_words(),
            repetition_window: default_repetition_window(),
            notable_threshold: default_notable_threshold(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LoggingConfig {
    #[serde(default = "default_log_filter")]
    pub filter: String,
    #[serde(default = "default_true")]
    pub file_log: bool,
    #[serde(default = "default_keep_logs")]
    pub keep_logs: usize,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            file_log: true,
            keep_logs: default_keep_logs(),
        }
    }
}

fn default_version() -> String { env!("CARGO_PKG_VERSION").to_string() }
fn default_min_chars() -> usize { 50 }
fn default_min_sentences() -> usize { 2 }
fn default_min_words() -> usize { 10 }
fn default_repetition_window() -> usize { 20 }
fn default_notable_threshold() -> f64 { 0.65 }
fn default_log_filter() -> String { "info".to_string() }
fn default_true() -> bool { true }
fn default_keep_logs() -> usize { 30 }

pub struct ConfigStore {
    config_dir: PathBuf,
    config_file: PathBuf,
}

impl ConfigStore {
    pub fn new(config_dir: PathBuf) -> Self {
        let config_file = config_dir.join("config.json");
        Self { config_dir, config_file }
    }

    /// Get default config directory
    pub fn default_config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("veriscan"))
    }

    pub fn config_file(&self) -> &Path {
        &self.config_file
    }

    /// Load configuration from file; a missing file yields defaults.
    pub fn load(&self) -> Result<AppConfig, ConfigError> {
        if !self.config_file.exists() {
            return Ok(AppConfig::default());
        }

        let content = fs::read_to_string(&self.config_file).map_err(|source| ConfigError::Io {
            path: self.config_file.clone(),
            source,
        })?;

        serde_json::from_str(&content).map_err(ConfigError::Parse)
    }

    /// Save configuration to file
    pub fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        fs::create_dir_all(&self.config_dir).map_err(|source| ConfigError::Io {
            path: self.config_dir.clone(),
            source,
        })?;

        let content = to_pretty_json(config)?;

        fs::write(&self.config_file, content).map_err(|source| ConfigError::Io {
            path: self.config_file.clone(),
            source,
        })
    }
}

fn to_pretty_json<T: Serialize>(value: &T) -> Result<String, ConfigError> {
    serde_json::to_string_pretty(value).map_err(ConfigError::Serialize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.detection.min_chars, 50);
        assert_eq!(config.detection.repetition_window, 20);
        assert_eq!(config.logging.filter, "info");
    }

    #[test]
    fn test_partial_json_fills_defaults() {
        let parsed: AppConfig =
            serde_json::from_str(r#"{"detection":{"notableThreshold":0.7}}"#).unwrap();
        assert_eq!(parsed.detection.notable_threshold, 0.7);
        assert_eq!(parsed.detection.min_words, 10);
        assert!(parsed.logging.file_log);
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().join("nested"));
        assert_eq!(store.load().unwrap(), AppConfig::default());
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().to_path_buf());
        let mut config = AppConfig::default();
        config.detection.min_chars = 80;
        config.logging.file_log = false;
        store.save(&config).unwrap();
        assert!(store.config_file().exists());
        assert_eq!(store.load().unwrap(), config);
    }

    #[test]
    fn test_corrupt_file_is_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = ConfigStore::new(dir.path().to_path_buf());
        fs::write(store.config_file(), "{not json").unwrap();
        assert!(matches!(store.load(), Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_unserializable_value_is_serialize_error() {
        let mut table = std::collections::HashMap::new();
        table.insert((1u8, 2u8), 3u8);
        let err = to_pretty_json(&table).unwrap_err();
        assert!(matches!(err, ConfigError::Serialize(_)));
        assert!(err.to_string().starts_with("Failed to serialize config"));
    }
}
