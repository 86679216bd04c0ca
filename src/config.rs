//! Startup configuration.
//!
//! Values come from built-in defaults, then an optional TOML file named by
//! `DIASCAN_CONFIG`, then `DIASCAN_*` environment variables. The artifact
//! paths have no default and must be supplied by one of the two sources.

use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Environment variable naming the TOML configuration file.
pub const CONFIG_ENV: &str = "DIASCAN_CONFIG";

const MODEL_PATH_ENV: &str = "DIASCAN_MODEL_PATH";
const SCALER_PATH_ENV: &str = "DIASCAN_SCALER_PATH";
const CACHE_ENV: &str = "DIASCAN_CACHE_ARTIFACTS";
const LOG_MODE_ENV: &str = "DIASCAN_LOG_MODE";
const LOG_FILE_ENV: &str = "DIASCAN_LOG_FILE";

/// Configuration errors. All of them abort startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("Invalid value {value:?} for {key}")]
    InvalidValue { key: &'static str, value: String },

    #[error("{0} is not configured")]
    Unset(&'static str),

    #[error("{key} points to {path:?}, which does not exist")]
    MissingFile { key: &'static str, path: PathBuf },
}

/// Where log output goes.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogMode {
    /// File when attached to a terminal, stdout otherwise
    #[default]
    Auto,
    File,
    Stdout,
}

impl FromStr for LogMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "auto" => Ok(Self::Auto),
            "file" => Ok(Self::File),
            "stdout" => Ok(Self::Stdout),
            _ => Err(ConfigError::InvalidValue {
                key: LOG_MODE_ENV,
                value: s.to_string(),
            }),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogConfig {
    #[serde(default)]
    pub mode: LogMode,

    #[serde(default = "default_log_file")]
    pub file: PathBuf,
}

fn default_log_file() -> PathBuf {
    PathBuf::from("diascan.log")
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            mode: LogMode::default(),
            file: default_log_file(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Exported classifier (JSON)
    #[serde(default)]
    pub model_path: Option<PathBuf>,

    /// Exported StandardScaler (JSON)
    #[serde(default)]
    pub scaler_path: Option<PathBuf>,

    /// Keep loaded artifacts between predictions
    #[serde(default)]
    pub cache_artifacts: bool,

    #[serde(default)]
    pub log: LogConfig,
}

/// Artifact locations after validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub model: PathBuf,
    pub scaler: PathBuf,
}

impl AppConfig {
    /// Load from the process environment and the file named by `DIASCAN_CONFIG`.
    ///
    /// # Errors
    /// Returns `ConfigError` if the file cannot be read or parsed, or an
    /// environment override is malformed.
    pub fn load() -> Result<Self, ConfigError> {
        let toml = match std::env::var_os(CONFIG_ENV) {
            Some(path) => {
                let path = PathBuf::from(path);
                let content = std::fs::read_to_string(&path)
                    .map_err(|source| ConfigError::Read { path, source })?;
                Some(content)
            }
            None => None,
        };
        Self::from_sources(toml.as_deref(), |key| std::env::var(key).ok())
    }

    /// Build from TOML text (if any) overlaid with `env` lookups.
    ///
    /// # Errors
    /// Returns `ConfigError` on malformed TOML or override values.
    pub fn from_sources(
        toml: Option<&str>,
        env: impl Fn(&str) -> Option<String>,
    ) -> Result<Self, ConfigError> {
        let mut config = match toml {
            Some(text) => toml::from_str::<AppConfig>(text)?,
            None => Self::default(),
        };

        if let Some(v) = env(MODEL_PATH_ENV).filter(|v| !v.trim().is_empty()) {
            config.model_path = Some(PathBuf::from(v));
        }
        if let Some(v) = env(SCALER_PATH_ENV).filter(|v| !v.trim().is_empty()) {
            config.scaler_path = Some(PathBuf::from(v));
        }
        if let Some(v) = env(CACHE_ENV) {
            config.cache_artifacts = parse_flag(CACHE_ENV, &v)?;
        }
        if let Some(v) = env(LOG_MODE_ENV) {
            config.log.mode = v.parse()?;
        }
        if let Some(v) = env(LOG_FILE_ENV).filter(|v| !v.trim().is_empty()) {
            config.log.file = PathBuf::from(v);
        }

        Ok(config)
    }

    /// Check that both artifacts are configured and present on disk.
    ///
    /// # Errors
    /// Returns `ConfigError::Unset` or `ConfigError::MissingFile`.
    pub fn validate(&self) -> Result<ArtifactPaths, ConfigError> {
        let model = existing(MODEL_PATH_ENV, self.model_path.as_deref())?;
        let scaler = existing(SCALER_PATH_ENV, self.scaler_path.as_deref())?;
        Ok(ArtifactPaths { model, scaler })
    }
}

fn existing(key: &'static str, path: Option<&Path>) -> Result<PathBuf, ConfigError> {
    let path = path.ok_or(ConfigError::Unset(key))?;
    if !path.is_file() {
        return Err(ConfigError::MissingFile {
            key,
            path: path.to_path_buf(),
        });
    }
    Ok(path.to_path_buf())
}

fn parse_flag(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" | "" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: value.to_string(),
        }),
    }
}
