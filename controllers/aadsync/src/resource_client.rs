//! AADGroupSync resource client.
//!
//! Thin CRUD wrapper around `Api<AADGroupSync>` scoped to one namespace.
//! There are no retries and no conflict handling: a stale `resourceVersion`
//! on update surfaces as a plain error.

use crate::error::ControllerError;
use crds::AADGroupSync;
use kube::api::{DeleteParams, ListParams, PostParams};
use kube::{Api, Client};
use tracing::info;

/// Trait for AADGroupSync CRUD operations
///
/// Abstracts the Kubernetes API so the reconciler can be tested against an
/// in-memory store.
#[async_trait::async_trait]
pub trait GroupSyncClientTrait: Send + Sync {
    /// Namespace the client operates in
    fn namespace(&self) -> &str;

    /// Get a resource by name; `Ok(None)` if it does not exist
    async fn get(&self, name: &str) -> Result<Option<AADGroupSync>, ControllerError>;

    /// Create a new resource
    async fn create(&self, group: &AADGroupSync) -> Result<AADGroupSync, ControllerError>;

    /// Replace an existing resource
    async fn update(&self, group: &AADGroupSync) -> Result<AADGroupSync, ControllerError>;

    /// Delete a resource with foreground propagation
    async fn delete(&self, name: &str) -> Result<(), ControllerError>;

    /// List all resources in the namespace
    async fn list(&self) -> Result<Vec<AADGroupSync>, ControllerError>;
}

/// Kubernetes-backed AADGroupSync client
#[derive(Clone)]
pub struct KubeGroupSyncClient {
    api: Api<AADGroupSync>,
    namespace: String,
}

impl KubeGroupSyncClient {
    /// Create a client for `namespace`
    pub fn new(client: Client, namespace: &str) -> Self {
        Self {
            api: Api::namespaced(client, namespace),
            namespace: namespace.to_string(),
        }
    }
}

impl std::fmt::Debug for KubeGroupSyncClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KubeGroupSyncClient")
            .field("namespace", &self.namespace)
            .finish_non_exhaustive()
    }
}

fn resource_name(group: &AADGroupSync) -> Result<&str, ControllerError> {
    group
        .metadata
        .name
        .as_deref()
        .ok_or_else(|| ControllerError::InvalidResource("AADGroupSync missing name".to_string()))
}

#[async_trait::async_trait]
impl GroupSyncClientTrait for KubeGroupSyncClient {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn get(&self, name: &str) -> Result<Option<AADGroupSync>, ControllerError> {
        info!("Fetching aadgroupsyncs.aad.microsoft.com: {}", name);

        let group = self.api.get_opt(name).await?;
        if group.is_none() {
            info!("Not found - aadgroupsyncs.aad.microsoft.com: {}", name);
        }
        Ok(group)
    }

    async fn create(&self, group: &AADGroupSync) -> Result<AADGroupSync, ControllerError> {
        info!("Creating aadgroupsyncs.aad.microsoft.com: {}", resource_name(group)?);
        Ok(self.api.create(&PostParams::default(), group).await?)
    }

    async fn update(&self, group: &AADGroupSync) -> Result<AADGroupSync, ControllerError> {
        let name = resource_name(group)?;
        info!("Updating aadgroupsyncs.aad.microsoft.com: {}", name);
        Ok(self.api.replace(name, &PostParams::default(), group).await?)
    }

    async fn delete(&self, name: &str) -> Result<(), ControllerError> {
        info!("Deleting aadgroupsyncs.aad.microsoft.com: {}", name);
        self.api.delete(name, &DeleteParams::foreground()).await?;
        Ok(())
    }

    async fn list(&self) -> Result<Vec<AADGroupSync>, ControllerError> {
        info!("Fetching all aadgroupsyncs.aad.microsoft.com");
        Ok(self.api.list(&ListParams::default()).await?.items)
    }
}
