/// Configuration for the visualization backend core
///
/// Passed explicitly into [`crate::service::PolicyService`] at construction
/// time; the library never reads ambient global state. Supports loading with
/// priority: Environment variables > Config file > Defaults.
use crate::error::{BackendError, ConfigError};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Fixed gittuf policy reference name
pub const POLICY_REF: &str = "refs/gittuf/policy";

/// Core configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Reference walked for remote policy history
    #[serde(default = "default_policy_ref")]
    pub policy_ref: String,

    /// Upper bound in seconds for a remote transfer before the caller
    /// should cancel it
    #[serde(default = "default_transfer_timeout")]
    pub transfer_timeout_secs: u64,

    /// Prefix for temporary clone directories
    #[serde(default = "default_clone_dir_prefix")]
    pub clone_dir_prefix: String,
}

// Default value functions
fn default_policy_ref() -> String {
    POLICY_REF.to_string()
}

fn default_transfer_timeout() -> u64 {
    120
}

fn default_clone_dir_prefix() -> String {
    "gittuf-viz-repo-".to_string()
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            policy_ref: default_policy_ref(),
            transfer_timeout_secs: default_transfer_timeout(),
            clone_dir_prefix: default_clone_dir_prefix(),
        }
    }
}

impl CoreConfig {
    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, BackendError> {
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()).into());
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::LoadFailed(format!("Failed to read config file: {}", e)))?;

        let config: CoreConfig = toml::from_str(&content)
            .map_err(|e| ConfigError::ParseFailed(format!("Invalid TOML: {}", e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<(), BackendError> {
        if self.policy_ref.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "policy_ref".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        if !self.policy_ref.starts_with("refs/") && self.policy_ref != "HEAD" {
            return Err(ConfigError::InvalidValue {
                key: "policy_ref".to_string(),
                reason: format!("must be a full ref name or HEAD, got '{}'", self.policy_ref),
            }
            .into());
        }

        if self.transfer_timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                key: "transfer_timeout_secs".to_string(),
                reason: "must be greater than 0".to_string(),
            }
            .into());
        }

        if self.clone_dir_prefix.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "clone_dir_prefix".to_string(),
                reason: "must not be empty".to_string(),
            }
            .into());
        }

        Ok(())
    }

    /// Apply environment variable overrides
    pub fn apply_env_overrides(&mut self) {
        if let Ok(policy_ref) = std::env::var("GITTUF_VIZ_POLICY_REF") {
            self.policy_ref = policy_ref;
        }

        if let Ok(timeout) = std::env::var("GITTUF_VIZ_TRANSFER_TIMEOUT_SECS") {
            if let Ok(secs) = timeout.parse() {
                self.transfer_timeout_secs = secs;
            }
        }
    }

    /// Create a new CoreConfig with defaults and environment overrides
    pub fn new() -> Result<Self, BackendError> {
        let mut config = Self::default();
        config.apply_env_overrides();
        config.validate()?;
        Ok(config)
    }
}
