//! Main controller implementation.
//!
//! Builds the MS Graph and Kubernetes clients and runs a single
//! reconciliation pass. Any error while building the controller is fatal.

use crate::cluster;
use crate::config::ControllerConfig;
use crate::error::ControllerError;
use crate::reconciler::{Reconciler, SyncReport};
use crate::resource_client::KubeGroupSyncClient;
use msgraph_client::{MsGraphClient, MsGraphConfig};
use tracing::info;

/// Batch controller for AADGroupSync resources.
#[derive(Debug)]
pub struct Controller {
    config: ControllerConfig,
    reconciler: Reconciler<MsGraphClient, KubeGroupSyncClient>,
}

impl Controller {
    /// Creates a new controller instance.
    ///
    /// Authenticates against MS Graph and verifies the Kubernetes API server
    /// is reachable.
    pub async fn new(config: ControllerConfig) -> Result<Self, ControllerError> {
        info!("Initializing AAD Sync Controller");

        // Create MS Graph client
        let msgraph_config = MsGraphConfig::from_env()?;
        let msgraph_client = MsGraphClient::connect(msgraph_config).await?;

        // Create Kubernetes client
        let kube_client = cluster::connect().await?;
        let group_sync_client = KubeGroupSyncClient::new(kube_client, &config.namespace);

        let reconciler = Reconciler::new(msgraph_client, group_sync_client);

        Ok(Self { config, reconciler })
    }

    /// Runs one reconciliation pass and returns its report.
    pub async fn run(self) -> SyncReport {
        info!(
            "AAD Sync Controller syncing {} groups into namespace {}",
            self.config.groups.len(),
            self.config.namespace
        );
        self.reconciler.run(&self.config.groups).await
    }
}
