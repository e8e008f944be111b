use std::{
    fs, io,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Default value for `datadir` in [`Config`].
const DEFAULT_DATADIR: &str = "qgb-data";

/// Default value for `interval_blocks` in [`PruningConfig`].
const DEFAULT_PRUNING_INTERVAL_BLOCKS: u64 = 100;

/// Default value for `retention_window` in [`PruningConfig`].
const DEFAULT_RETENTION_WINDOW: u64 = 1000;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("invalid config: {0}")]
    Invalid(&'static str),
}

fn default_datadir() -> PathBuf {
    DEFAULT_DATADIR.into()
}

fn default_interval_blocks() -> u64 {
    DEFAULT_PRUNING_INTERVAL_BLOCKS
}

fn default_retention_window() -> u64 {
    DEFAULT_RETENTION_WINDOW
}

/// When and how far old attestations are pruned.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Serialize, Deserialize)]
pub struct PruningConfig {
    /// Pruning runs at block heights that are a multiple of this. Zero
    /// disables pruning.
    #[serde(default = "default_interval_blocks")]
    pub interval_blocks: u64,

    /// Number of most recent attestations that are always kept. Must be at
    /// least 1 so the newest attestation is never pruned.
    #[serde(default = "default_retention_window")]
    pub retention_window: u64,
}

impl PruningConfig {
    pub fn new(interval_blocks: u64, retention_window: u64) -> Self {
        Self {
            interval_blocks,
            retention_window,
        }
    }

    /// Config that never prunes.
    pub fn disabled() -> Self {
        Self::new(0, DEFAULT_RETENTION_WINDOW)
    }

    pub fn is_enabled(&self) -> bool {
        self.interval_blocks > 0
    }
}

impl Default for PruningConfig {
    fn default() -> Self {
        Self::new(DEFAULT_PRUNING_INTERVAL_BLOCKS, DEFAULT_RETENTION_WINDOW)
    }
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct LoggingConfig {
    /// Service label to append to the service name (e.g., "prod", "dev").
    #[serde(skip_serializing_if = "Option::is_none")]
    pub service_label: Option<String>,

    /// Directory path for file-based logging.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_dir: Option<PathBuf>,

    /// Prefix for log file names.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_file_prefix: Option<String>,

    /// Use JSON format for logs instead of compact format.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_format: Option<bool>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// The data directory where database contents reside.
    #[serde(default = "default_datadir")]
    pub datadir: PathBuf,

    /// Attestation pruning schedule.
    #[serde(default)]
    pub pruning: PruningConfig,

    /// Logging configuration (optional section in TOML).
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            datadir: default_datadir(),
            pruning: PruningConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl Config {
    /// Parses and validates a TOML config string.
    pub fn from_toml_str(s: &str) -> Result<Self, ConfigError> {
        let config: Config = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Reads, parses and validates a TOML config file.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let raw = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&raw)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.pruning.retention_window == 0 {
            return Err(ConfigError::Invalid(
                "pruning.retention_window must be at least 1",
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_config_load() {
        let config_string = r#"
            datadir = "/path/to/data/directory"

            [pruning]
            interval_blocks = 10
            retention_window = 50

            [logging]
            service_label = "dev"
            json_format = true
        "#;

        let config = Config::from_toml_str(config_string);
        assert!(
            config.is_ok(),
            "should be able to load TOML config but got: {:?}",
            config.err()
        );
        let config = config.unwrap();
        assert_eq!(config.datadir, PathBuf::from("/path/to/data/directory"));
        assert_eq!(config.pruning, PruningConfig::new(10, 50));
        assert_eq!(config.logging.service_label.as_deref(), Some("dev"));
        assert_eq!(config.logging.json_format, Some(true));
    }

    #[test]
    fn test_config_defaults() {
        let config = Config::from_toml_str("").expect("empty config should use defaults");
        assert_eq!(config.datadir, PathBuf::from(DEFAULT_DATADIR));
        assert_eq!(config.pruning, PruningConfig::default());
        assert!(config.pruning.is_enabled());
        assert!(config.logging.log_dir.is_none());

        let partial = Config::from_toml_str(
            r#"
            [pruning]
            interval_blocks = 0
        "#,
        )
        .unwrap();
        assert!(!partial.pruning.is_enabled());
        assert_eq!(partial.pruning.retention_window, DEFAULT_RETENTION_WINDOW);
    }

    #[test]
    fn test_zero_retention_rejected() {
        let res = Config::from_toml_str(
            r#"
            [pruning]
            retention_window = 0
        "#,
        );
        assert!(matches!(res, Err(ConfigError::Invalid(_))));
    }

    #[test]
    fn test_malformed_toml_rejected() {
        let res = Config::from_toml_str("[pruning\ninterval_blocks = 1");
        assert!(matches!(res, Err(ConfigError::Parse(_))));
    }

    #[test]
    fn test_missing_file_reports_path() {
        let err = Config::from_file(Path::new("/nonexistent/qgb/config.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/nonexistent/qgb/config.toml"));
    }
}
