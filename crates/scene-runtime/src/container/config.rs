//! # Runtime Configuration
//!
//! Defaults, then an optional JSON file, then `SK_*` environment variables.
//!
//! | Variable | Field |
//! |----------|-------|
//! | `SK_CONFIG_FILE` | file to load before overrides |
//! | `SK_INPUT_DIR` | `input_dir` |
//! | `SK_EXPORT_DIR` | `export.dir` |
//! | `SK_ON_CONFLICT` | `factory.on_conflict` (`fail` / `replace`) |
//! | `SK_TIMESTAMPED_EXPORT` | `export.timestamped_subdir` |

use serde::{Deserialize, Serialize};
use sk_03_component_factory::{ConflictPolicy, FactoryConfig};
use sk_05_exporter::ExportOptions;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::info;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid.
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// An environment override could not be parsed.
    #[error("Invalid value '{value}' for {var}: {reason}")]
    InvalidOverride {
        var: &'static str,
        value: String,
        reason: String,
    },

    /// The resolved configuration is inconsistent.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Export destination and options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Destination directory.
    pub dir: PathBuf,
    /// Exporter options.
    #[serde(flatten)]
    pub options: ExportOptions,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("./exports"),
            options: ExportOptions::default(),
        }
    }
}

/// Complete runtime configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RuntimeConfig {
    /// Directory holding `satellites/` and `facilities/`.
    pub input_dir: PathBuf,
    /// Export settings.
    pub export: ExportConfig,
    /// Factory settings.
    pub factory: FactoryConfig,
    /// Re-export and compare against the inputs after loading.
    pub verify_round_trip: bool,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self {
            input_dir: PathBuf::from("./config"),
            export: ExportConfig::default(),
            factory: FactoryConfig::default(),
            verify_round_trip: true,
        }
    }
}

impl RuntimeConfig {
    /// Read a configuration file. Absent keys keep their defaults.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ConfigError::Parse {
            path: path.display().to_string(),
            source,
        })
    }

    /// Resolve from the process environment.
    pub fn load() -> Result<Self, ConfigError> {
        Self::load_with(|var| std::env::var(var).ok())
    }

    /// Resolve from an arbitrary variable lookup.
    pub fn load_with(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let mut config = match lookup("SK_CONFIG_FILE") {
            Some(path) => {
                info!("[runtime] Loading configuration from {}", path);
                Self::from_file(path)?
            }
            None => Self::default(),
        };
        config.apply_overrides(lookup)?;
        config.validate()?;
        Ok(config)
    }

    /// Apply `SK_*` overrides.
    pub fn apply_overrides(
        &mut self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(dir) = lookup("SK_INPUT_DIR") {
            self.input_dir = PathBuf::from(dir);
        }
        if let Some(dir) = lookup("SK_EXPORT_DIR") {
            self.export.dir = PathBuf::from(dir);
        }
        if let Some(value) = lookup("SK_ON_CONFLICT") {
            self.factory.on_conflict =
                value
                    .parse::<ConflictPolicy>()
                    .map_err(|reason| ConfigError::InvalidOverride {
                        var: "SK_ON_CONFLICT",
                        value: value.clone(),
                        reason,
                    })?;
        }
        if let Some(value) = lookup("SK_TIMESTAMPED_EXPORT") {
            self.export.options.timestamped_subdir = parse_flag(&value).ok_or_else(|| {
                ConfigError::InvalidOverride {
                    var: "SK_TIMESTAMPED_EXPORT",
                    value: value.clone(),
                    reason: "expected true/false, 1/0, yes/no".to_string(),
                }
            })?;
        }
        Ok(())
    }

    /// Check consistency.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.input_dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("input_dir is empty".to_string()));
        }
        if self.export.dir.as_os_str().is_empty() {
            return Err(ConfigError::Invalid("export.dir is empty".to_string()));
        }
        if self.export.dir == self.input_dir {
            return Err(ConfigError::Invalid(
                "export.dir must differ from input_dir".to_string(),
            ));
        }
        Ok(())
    }

    /// Configuration rooted in a scratch directory, with flat exports.
    pub fn for_testing(root: impl AsRef<Path>) -> Self {
        let root = root.as_ref();
        Self {
            input_dir: root.join("config"),
            export: ExportConfig {
                dir: root.join("exports"),
                options: ExportOptions::flat(),
            },
            factory: FactoryConfig::default(),
            verify_round_trip: true,
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
