//! Controller configuration
//!
//! The namespace to sync into and the Azure AD group ids to mirror are read
//! once from a YAML file at startup.

use crate::error::ControllerError;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Environment variable naming the configuration file
pub const CONFIG_FILE_VAR: &str = "AADSYNC_CONTROLLER_CONFIGFILE";

/// Configuration file used when `AADSYNC_CONTROLLER_CONFIGFILE` is unset
pub const DEFAULT_CONFIG_FILE: &str = "/etc/aadsynccontroller/config.yaml";

/// Controller configuration
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct ControllerConfig {
    /// Namespace holding the AADGroupSync resources
    pub namespace: String,

    /// Azure AD group object ids to sync, in processing order
    #[serde(default)]
    pub groups: Vec<String>,
}

impl ControllerConfig {
    /// Load the configuration from `AADSYNC_CONTROLLER_CONFIGFILE` or the default path
    pub fn load() -> Result<Self, ControllerError> {
        Self::from_file(config_path(std::env::var(CONFIG_FILE_VAR).ok()))
    }

    /// Load the configuration from a YAML file
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ControllerError> {
        let path = path.as_ref();
        info!("Loading controller configuration from {}", path.display());

        let contents = std::fs::read_to_string(path).map_err(|source| ControllerError::ConfigRead {
            path: path.to_path_buf(),
            source,
        })?;

        Self::from_yaml_str(&contents)
    }

    /// Parse and validate the configuration from a YAML document
    pub fn from_yaml_str(contents: &str) -> Result<Self, ControllerError> {
        let config: Self = serde_yaml::from_str(contents)?;

        if config.namespace.trim().is_empty() {
            return Err(ControllerError::InvalidConfig(
                "namespace must not be empty".to_string(),
            ));
        }

        debug!("Namespace: {}, Groups: {:?}", config.namespace, config.groups);
        Ok(config)
    }
}

/// Resolve the configuration path from the (optional) environment override
fn config_path(from_env: Option<String>) -> PathBuf {
    from_env
        .filter(|path| !path.is_empty())
        .map_or_else(|| PathBuf::from(DEFAULT_CONFIG_FILE), PathBuf::from)
}
