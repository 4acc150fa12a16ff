//! Validator configuration.
//!
//! Loaded from TOML, then optionally overridden from the environment:
//!
//! ```toml
//! [limits]
//! max_request_batch_size = 10
//!
//! [limits.owner_overrides]
//! "0x1234abcd" = 25
//! ```
//!
//! | Variable | Field |
//! |----------|-------|
//! | `VAULT_MAX_REQUEST_BATCH_SIZE` | `limits.max_request_batch_size` |

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use thiserror::Error;

/// Environment variable overriding the default write batch bound.
pub const ENV_MAX_REQUEST_BATCH_SIZE: &str = "VAULT_MAX_REQUEST_BATCH_SIZE";

/// Default bound on create/update batch length.
pub const DEFAULT_MAX_REQUEST_BATCH_SIZE: usize = 10;

/// Main validator configuration
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidatorConfig {
    /// Write batch limits
    pub limits: LimitsConfig,
}

/// Write batch limits
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Bound for callers without an override
    pub max_request_batch_size: usize,
    /// Per-owner bounds
    pub owner_overrides: HashMap<String, usize>,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_request_batch_size: DEFAULT_MAX_REQUEST_BATCH_SIZE,
            owner_overrides: HashMap::new(),
        }
    }
}

/// Errors that can occur while loading configuration.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {error}")]
    Io { path: String, error: String },

    #[error("Failed to parse config: {0}")]
    Parse(String),

    #[error("Invalid environment variable {name}={value}")]
    InvalidEnv { name: &'static str, value: String },

    #[error("Invalid limit: {0}")]
    InvalidLimit(String),
}

impl ValidatorConfig {
    /// Load and validate configuration from a TOML file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io {
            path: path.as_ref().display().to_string(),
            error: e.to_string(),
        })?;
        Self::parse(&content)
    }

    /// Parse and validate configuration from a TOML string.
    pub fn parse(content: &str) -> Result<Self, ConfigError> {
        let config: Self =
            toml::from_str(content).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(self) -> Result<Self, ConfigError> {
        self.apply_overrides_from(|name| std::env::var(name).ok())
    }

    fn apply_overrides_from<F>(mut self, lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(value) = lookup(ENV_MAX_REQUEST_BATCH_SIZE) {
            self.limits.max_request_batch_size =
                value.trim().parse().map_err(|_| ConfigError::InvalidEnv {
                    name: ENV_MAX_REQUEST_BATCH_SIZE,
                    value,
                })?;
        }
        self.validate()?;
        Ok(self)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.limits.max_request_batch_size == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_request_batch_size cannot be 0".into(),
            ));
        }

        if let Some((owner, _)) = self
            .limits
            .owner_overrides
            .iter()
            .find(|(_, bound)| **bound == 0)
        {
            return Err(ConfigError::InvalidLimit(format!(
                "override for owner {} cannot be 0",
                owner
            )));
        }

        Ok(())
    }
}
