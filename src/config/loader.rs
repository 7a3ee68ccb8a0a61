use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::config::types::EngineConfig;

/// Why an engine settings file could not be used.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{path}': {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file '{path}': {source}")]
    ParseError {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("Config validation failed: {message}")]
    ValidationError { message: String },
}

impl EngineConfig {
    /// Where the engine looks for its settings when no `--config` is given:
    /// `cmdtree/config.toml` under the platform config directory, or under
    /// the working directory on platforms without one.
    pub fn config_path() -> PathBuf {
        let config_dir = dirs::config_dir().unwrap_or_else(|| PathBuf::from("."));
        config_dir.join("cmdtree").join("config.toml")
    }

    /// Engine settings from [`Self::config_path`]. With no file there, the
    /// built-in deadline and expansion limit apply and no tree or knobs
    /// file is preset.
    pub fn load() -> Result<Self, ConfigError> {
        let path = Self::config_path();

        if !path.exists() {
            return Ok(EngineConfig::default());
        }

        Self::load_from(&path)
    }

    /// Engine settings from `path`. Sections left out of the file keep
    /// their defaults, so a file may set only `[tree] path`.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        let config: EngineConfig = toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Rejects a zero completion deadline or a zero expansion limit. Either
    /// leaves every search empty.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.completion.deadline_ms == 0 {
            return Err(ConfigError::ValidationError {
                message: "completion.deadline_ms must be greater than zero".to_string(),
            });
        }

        if self.search.max_expansions == 0 {
            return Err(ConfigError::ValidationError {
                message: "search.max_expansions must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}
