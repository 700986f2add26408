//! Controller-specific error types.
//!
//! Errors returned while building the controller are fatal and abort the
//! process. Errors raised while syncing a single group are recorded in the
//! [`SyncReport`](crate::reconciler::SyncReport) and logged instead.

use kube::Error as KubeError;
use kube::config::KubeconfigError;
use msgraph_client::MsGraphError;
use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur in the AAD Sync Controller.
#[derive(Debug, Error)]
pub enum ControllerError {
    /// Kubernetes API error
    #[error("Kubernetes error: {0}")]
    Kube(#[from] KubeError),

    /// Kubernetes client configuration could not be built
    #[error("Kubernetes client configuration error: {0}")]
    Kubeconfig(#[from] KubeconfigError),

    /// MS Graph API error
    #[error("MS Graph error: {0}")]
    MsGraph(#[from] MsGraphError),

    /// Controller configuration file could not be read
    #[error("Failed to read controller configuration {}: {source}", path.display())]
    ConfigRead {
        /// Path that was read
        path: PathBuf,
        /// Underlying IO error
        #[source]
        source: std::io::Error,
    },

    /// Controller configuration file is not valid YAML
    #[error("Failed to parse controller configuration: {0}")]
    ConfigParse(#[from] serde_yaml::Error),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A resource cannot be written as-is (e.g. it has no name)
    #[error("Invalid resource: {0}")]
    InvalidResource(String),
}
