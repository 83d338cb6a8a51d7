//! Configuration file parsing
//!
//! Reads changeset-log-parser.toml configuration files.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid configuration: {0}")]
    Validation(String),
}

/// Main configuration structure
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub cli: CliConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OutputConfig {
    /// Output formats: "text", "json"
    #[serde(default = "default_formats")]
    pub formats: Vec<String>,

    /// Output directory for report files
    #[serde(default = "default_output_dir")]
    pub dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            formats: default_formats(),
            dir: default_output_dir(),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CliConfig {
    /// Exit non-zero if any reconciled changeset failed
    #[serde(default = "default_fail_on_failed_changeset")]
    pub fail_on_failed_changeset: bool,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            fail_on_failed_changeset: default_fail_on_failed_changeset(),
        }
    }
}

fn default_formats() -> Vec<String> {
    vec!["text".to_string()]
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("build/reports/changesets")
}

fn default_fail_on_failed_changeset() -> bool {
    true
}

impl Config {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values.
    fn validate(&self) -> Result<(), ConfigError> {
        for format in &self.output.formats {
            if !crate::output::FORMATS.contains(&format.as_str()) {
                return Err(ConfigError::Validation(format!(
                    "invalid output format '{}'. Valid values: {}",
                    format,
                    crate::output::FORMATS.join(", ")
                )));
            }
        }
        Ok(())
    }
}
