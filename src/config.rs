//! User configuration
//!
//! Optional TOML file with defaults for the analyzer flags. Command-line
//! flags always win over values from the file.
//!
//! ```toml
//! [display]
//! color = "auto"
//! show_distance = false
//! use_mm = false
//!
//! [filter]
//! threshold = 5.0
//! ignore_below = 0.5
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Environment variable overriding the config file location
pub const CONFIG_ENV: &str = "SLOTDELTA_CONFIG";

/// When to emit ANSI colors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Color when stdout is a terminal and NO_COLOR is unset
    #[default]
    Auto,
    Always,
    Never,
}

impl ColorMode {
    /// Resolve to a yes/no decision for stdout.
    pub fn enabled(self) -> bool {
        match self {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => {
                std::env::var_os("NO_COLOR").is_none() && atty::is(atty::Stream::Stdout)
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DisplayConfig {
    pub color: ColorMode,
    pub show_distance: bool,
    pub use_mm: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub threshold: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ignore_below: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure_min: Option<i32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pressure_max: Option<i32>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub display: DisplayConfig,
    pub filter: FilterConfig,
}

impl Config {
    /// Location of the config file.
    ///
    /// `$SLOTDELTA_CONFIG` if set, else `<config dir>/slotdelta/config.toml`.
    pub fn config_path() -> Result<PathBuf> {
        if let Some(path) = std::env::var_os(CONFIG_ENV) {
            return Ok(PathBuf::from(path));
        }
        let dir = dirs::config_dir().context("Could not determine config directory")?;
        Ok(dir.join("slotdelta").join("config.toml"))
    }

    /// Load the config file, falling back to defaults if it does not exist.
    pub fn load() -> Result<Self> {
        let path = Self::config_path()?;
        if !path.exists() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {:?}", path))?;
        Self::from_toml_str(&content)
            .with_context(|| format!("Failed to parse config file: {:?}", path))
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn to_toml_string(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }
}
