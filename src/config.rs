//! Configuration management for Vimprover
//!
//! Settings are read from a TOML file in the platform config directory.
//! Missing files and missing keys fall back to defaults.
//!
//! ## Config File Locations
//!
//! | Platform | Path |
//! |----------|------|
//! | Linux | `~/.config/vimprover/config.toml` |
//!
//! Note that when run through `sudo` the home directory is usually root's.
//!
//! ## Example
//!
//! ```no_run
//! use vimprover::Config;
//!
//! let mut config = Config::load().unwrap_or_default();
//! config.report.summary_interval_secs = 300;
//! config.save().expect("Failed to save config");
//! ```

use crate::keyboard::locator::{DEFAULT_DEV_ROOT, DEFAULT_NAME_MARKER, DEFAULT_SYSFS_ROOT};
use crate::keyboard::DeviceLocator;
use crate::rules::DEFAULT_REPEAT_LIMIT;
use serde::{Deserialize, Serialize};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;
use thiserror::Error;

/// Error type for configuration operations
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to determine config directory
    #[error("Could not determine config directory")]
    NoConfigDir,
    /// IO error reading or writing config file
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    /// Failed to parse config file
    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Failed to serialize config
    #[error("Serialize error: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// Returns the path to the config file.
///
/// Nothing is created on disk; `save` creates the directory when needed.
pub fn config_path() -> Result<PathBuf, ConfigError> {
    let config_dir = dirs::config_dir().ok_or(ConfigError::NoConfigDir)?;
    Ok(config_dir.join("vimprover").join("config.toml"))
}

/// Main application configuration
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Input device discovery
    pub device: DeviceConfig,
    /// Which rules run
    pub rules: RulesConfig,
    /// Summary output
    pub report: ReportConfig,
    /// Side effect on each violation
    pub alert: AlertConfig,
}

/// Input device settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct DeviceConfig {
    /// Fixed device node; skips discovery when set
    pub path: Option<PathBuf>,
    /// Case-insensitive substring a device name must contain
    pub name_marker: String,
    /// Directory listing registered input devices
    pub sysfs_root: PathBuf,
    /// Directory holding device nodes
    pub dev_root: PathBuf,
}

impl Default for DeviceConfig {
    fn default() -> Self {
        Self {
            path: None,
            name_marker: DEFAULT_NAME_MARKER.to_string(),
            sysfs_root: PathBuf::from(DEFAULT_SYSFS_ROOT),
            dev_root: PathBuf::from(DEFAULT_DEV_ROOT),
        }
    }
}

impl DeviceConfig {
    pub fn locator(&self) -> DeviceLocator {
        DeviceLocator::new(&self.sysfs_root, &self.dev_root, &self.name_marker)
    }
}

/// Rule selection
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RulesConfig {
    pub left_shift: bool,
    pub right_shift: bool,
    pub repeated_keypress: bool,
    /// Consecutive presses that trigger the repeated keypress rule
    pub repeat_limit: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            left_shift: true,
            right_shift: true,
            repeated_keypress: true,
            repeat_limit: DEFAULT_REPEAT_LIMIT,
        }
    }
}

/// Summary settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct ReportConfig {
    /// Minimum spacing between summaries, in seconds
    pub summary_interval_secs: u64,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            summary_interval_secs: 120,
        }
    }
}

/// Alert settings
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
#[serde(default)]
pub struct AlertConfig {
    /// Program and arguments run on every violation; empty disables alerts
    pub command: Vec<String>,
}

impl Config {
    /// Load configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist.
    /// Returns an error if the file exists but cannot be parsed.
    pub fn load() -> Result<Self, ConfigError> {
        let path = config_path()?;

        if !path.exists() {
            return Ok(Self::default());
        }

        Self::load_from(&path)
    }

    /// Load configuration from a specific path.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let contents = fs::read_to_string(path)?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Save configuration to the default config file.
    pub fn save(&self) -> Result<(), ConfigError> {
        let path = config_path()?;
        self.save_to(&path)
    }

    /// Save configuration to a specific path, creating its directory.
    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let contents = toml::to_string_pretty(self)?;
        if let Some(dir) = path.parent() {
            fs::create_dir_all(dir)?;
        }
        fs::write(path, contents)?;
        Ok(())
    }

    /// Get summary interval as Duration
    pub fn summary_interval(&self) -> Duration {
        Duration::from_secs(self.report.summary_interval_secs)
    }
}
