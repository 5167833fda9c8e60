// SPDX-License-Identifier: PMPL-1.0-or-later
//! Configuration handling for accesscheck
//!
//! Only I/O and presentation are configurable. Checker thresholds are fixed.

use crate::error::{AccessCheckError, Result};
use crate::report::OutputFormat;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Page retrieval settings
    #[serde(default)]
    pub fetch: FetchConfig,

    /// Analysis settings
    #[serde(default)]
    pub analysis: AnalysisOptions,

    /// Report output settings
    #[serde(default)]
    pub report: ReportConfig,

    /// Logging configuration
    #[serde(default)]
    pub log: LogConfig,
}

/// Page retrieval configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FetchConfig {
    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User-Agent header sent with requests
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    15
}

fn default_user_agent() -> String {
    "AccessCheck/1.0 (+https://example.org)".to_string()
}

/// Options for a single analysis run
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisOptions {
    /// Annotate elements with source lines before parsing
    #[serde(default)]
    pub track_lines: bool,
}

/// Report output configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Directory reports are written to
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    /// Formats written to disk
    #[serde(default = "default_formats")]
    pub formats: Vec<OutputFormat>,

    /// Whether to write reports at all
    #[serde(default = "default_true")]
    pub save: bool,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_dir: default_output_dir(),
            formats: default_formats(),
            save: true,
        }
    }
}

fn default_output_dir() -> PathBuf {
    PathBuf::from("docs")
}

fn default_formats() -> Vec<OutputFormat> {
    vec![OutputFormat::Json, OutputFormat::Markdown]
}

fn default_true() -> bool {
    true
}

/// Logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogConfig {
    /// Log level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Load configuration from a path, falling back to defaults when absent
pub fn load_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        debug!("Config file not found at {}, using defaults", path.display());
        return Ok(Config::default());
    }

    let content = std::fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;

    if config.fetch.timeout_secs == 0 {
        return Err(AccessCheckError::Config(
            "fetch.timeout_secs must be greater than zero".to_string(),
        ));
    }

    debug!(?config, "Loaded configuration");
    Ok(config)
}

/// Default config file name
pub fn default_config_path() -> PathBuf {
    PathBuf::from("accesscheck.toml")
}

/// Write default configuration to a file
pub fn write_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let content = toml::to_string_pretty(&Config::default())?;
    std::fs::write(path, content)?;
    Ok(())
}
