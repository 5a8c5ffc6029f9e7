//! Configuration module for the serpt CLI.
//!
//! This module handles loading, saving, and managing configuration
//! settings for the serpt application.

use dirs::{config_dir, home_dir};
use num_cpus::get as get_num_cpus;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::commands::common::OutputFormat;
use crate::error::{Result, SerptError};

/// Default configuration file name.
pub const CONFIG_FILE_NAME: &str = "serpt.toml";

/// Fallback when the CPU count does not fit a `u32`.
const DEFAULT_THREAD_COUNT: u32 = 4;

/// Application configuration structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Config {
    /// Settings for `serpt tokens`.
    #[serde(default)]
    pub tokens: TokensConfig,

    /// Settings for `serpt check`.
    #[serde(default)]
    pub check: CheckConfig,
}

/// Token listing options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TokensConfig {
    /// Output format for token listings.
    #[serde(default)]
    pub format: OutputFormat,

    /// List invisible tokens too.
    #[serde(default = "default_true")]
    pub include_hidden: bool,
}

/// Lexical check options.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CheckConfig {
    /// Keep lexing after an error by skipping one character.
    #[serde(default = "default_true")]
    pub recover: bool,

    /// Diagnostics printed per file.
    #[serde(default = "default_max_errors")]
    pub max_errors: u32,

    /// Confirm the token stream reproduces the source.
    #[serde(default = "default_true")]
    pub verify_roundtrip: bool,

    /// Number of parallel jobs.
    #[serde(default = "default_parallel_jobs")]
    pub jobs: u32,
}

fn default_true() -> bool {
    true
}

fn default_max_errors() -> u32 {
    20
}

/// Get the default number of parallel jobs based on CPU count.
fn default_parallel_jobs() -> u32 {
    get_num_cpus().try_into().unwrap_or(DEFAULT_THREAD_COUNT)
}

impl Default for TokensConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            include_hidden: true,
        }
    }
}

impl Default for CheckConfig {
    fn default() -> Self {
        Self {
            recover: true,
            max_errors: default_max_errors(),
            verify_roundtrip: true,
            jobs: default_parallel_jobs(),
        }
    }
}

impl Config {
    /// Load configuration from the default location.
    ///
    /// Searches for configuration in the following order:
    /// 1. Current directory
    /// 2. `~/.config/serpt/`
    /// 3. System configuration directory
    ///
    /// Returns the default configuration if no config file is found.
    pub fn load() -> Result<Self> {
        match Self::find_config_file() {
            Some(path) => Self::load_from_path(&path),
            None => Ok(Self::default()),
        }
    }

    /// Load configuration from a specific path.
    pub fn load_from_path(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(SerptError::Config(format!(
                "Configuration file not found: {}",
                path.display()
            )));
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        tracing::debug!(path = %path.display(), "loaded configuration");

        Ok(config)
    }

    /// Save configuration to a specific path.
    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, self.to_toml()?)?;
        Ok(())
    }

    /// Render the configuration as TOML.
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Check for config in current directory.
    fn check_current_dir_config() -> Option<PathBuf> {
        let path = PathBuf::from(CONFIG_FILE_NAME);
        path.exists().then_some(path)
    }

    /// Check for config in home directory.
    fn check_home_config() -> Option<PathBuf> {
        home_dir()
            .map(|dir| dir.join(".config").join("serpt").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    /// Check for config in system config directory.
    fn check_system_config() -> Option<PathBuf> {
        config_dir()
            .map(|dir| dir.join("serpt").join(CONFIG_FILE_NAME))
            .filter(|path| path.exists())
    }

    /// Find the configuration file in standard locations.
    fn find_config_file() -> Option<PathBuf> {
        Self::check_current_dir_config()
            .or_else(Self::check_home_config)
            .or_else(Self::check_system_config)
    }
}
