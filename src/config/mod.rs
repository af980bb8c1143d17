//! Configuration system for treeq.
//!
//! This module provides the configuration structure for the `treeq` command
//! with sensible defaults and support for serialization/deserialization via
//! serde. Configuration is loaded from TOML files and merged with command-line
//! arguments by the binary.
//!
//! # Example
//!
//! ```
//! use treequery::config::{Config, OutputFormat};
//!
//! // Use default configuration
//! let config = Config::default();
//! assert_eq!(config.default_query, "\\>\"");
//! assert_eq!(config.output_format, OutputFormat::Paths);
//!
//! // Create custom configuration
//! let custom = Config {
//!     output_format: OutputFormat::Json,
//!     ..Config::default()
//! };
//! assert!(custom.show_values);
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use anyhow::Context;
use serde::{Deserialize, Serialize};
use tracing::warn;

/// How matches are printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// One `path` (or `path: value`) line per match
    Paths,
    /// A JSON array of `{path, value}` objects
    Json,
    /// A YAML sequence of `{path, value}` mappings
    Yaml,
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            OutputFormat::Paths => "paths",
            OutputFormat::Json => "json",
            OutputFormat::Yaml => "yaml",
        };
        write!(f, "{}", name)
    }
}

/// Configuration for the treeq command.
///
/// # Fields
///
/// * `default_query` - Query run when none is given (default: `\>"`, every primitive leaf)
/// * `output_format` - Output format: "paths", "json" or "yaml" (default: "paths")
/// * `log_level` - Log filter used when `RUST_LOG` is unset (default: "warn")
/// * `show_values` - Print values next to paths in "paths" output (default: true)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Query run when none is given on the command line
    #[serde(default = "default_query")]
    pub default_query: String,

    /// Output format for matches
    #[serde(default = "default_output_format")]
    pub output_format: OutputFormat,

    /// Log filter directive used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Print values next to paths
    #[serde(default = "default_show_values")]
    pub show_values: bool,
}

/// Returns the default query.
fn default_query() -> String {
    "\\>\"".to_string()
}

fn default_output_format() -> OutputFormat {
    OutputFormat::Paths
}

/// Returns the default log level.
fn default_log_level() -> String {
    "warn".to_string()
}

fn default_show_values() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            default_query: default_query(),
            output_format: default_output_format(),
            log_level: default_log_level(),
            show_values: default_show_values(),
        }
    }
}

impl Config {
    /// Returns the path to the config file.
    ///
    /// Uses `~/.config/treequery/config.toml` on all platforms.
    pub fn config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|mut path| {
            path.push(".config");
            path.push("treequery");
            path.push("config.toml");
            path
        })
    }

    /// Loads configuration from the default config file.
    ///
    /// Returns the default configuration if the file doesn't exist or can't be read.
    pub fn load() -> Self {
        let config_path = match Self::config_path() {
            Some(path) => path,
            None => return Self::default(),
        };

        if !config_path.exists() {
            return Self::default();
        }

        Self::load_from(&config_path).unwrap_or_else(|err| {
            warn!(
                path = %config_path.display(),
                "Ignoring unusable config file: {:#}", err
            );
            Self::default()
        })
    }

    /// Loads configuration from a specific file, reporting any failure.
    pub fn load_from<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }

    /// Saves configuration to the default config file.
    ///
    /// Creates the config directory if it doesn't exist.
    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path()
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        self.save_to(config_path)
    }

    /// Saves configuration to a specific file, creating parent directories.
    pub fn save_to<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let toml_string = toml::to_string_pretty(self)?;
        std::fs::write(path, toml_string)
            .with_context(|| format!("Failed to write config file {}", path.display()))?;

        Ok(())
    }
}
