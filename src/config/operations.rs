//! Config loading and validation.

use super::model::Config;
use crate::error::{BoscaioloError, Result};
use crate::git::validate_git_arg;
use std::path::Path;
use tracing::debug;

impl Config {
    /// Load config from a YAML file.
    ///
    /// # Returns
    ///
    /// * `Ok(Config)` - Successfully loaded and validated config
    /// * `Err(BoscaioloError::ConfigError)` - Read error, parse error, or validation failure
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = std::fs::read_to_string(path).map_err(|e| {
            BoscaioloError::ConfigError(format!(
                "failed to read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        Self::from_yaml(&content)
    }

    /// Load config from `path` if it exists, otherwise return the defaults.
    pub fn load_or_default<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            debug!(event = "config.defaults_used", path = %path.display());
            return Ok(Self::default());
        }

        let config = Self::load(path)?;
        debug!(event = "config.loaded", path = %path.display());
        Ok(config)
    }

    /// Parse config from a YAML string.
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: Config = serde_yaml::from_str(yaml).map_err(|e| {
            BoscaioloError::ConfigError(format!("failed to parse config YAML: {}", e))
        })?;

        config.validate()?;
        Ok(config)
    }

    /// Serialize config to YAML string.
    pub fn to_yaml(&self) -> Result<String> {
        serde_yaml::to_string(self).map_err(|e| {
            BoscaioloError::ConfigError(format!("failed to serialize config to YAML: {}", e))
        })
    }

    /// Validate config values.
    ///
    /// `base_branch` must be a non-empty name that git will not read as an option.
    pub fn validate(&self) -> Result<()> {
        validate_git_arg(&self.base_branch, "base_branch").map_err(|e| {
            BoscaioloError::ConfigError(format!("config validation failed: {}", e))
        })
    }
}
