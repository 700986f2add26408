//! Test utilities for unit testing the reconciler
//!
//! This module provides helpers for creating test data and an in-memory
//! AADGroupSync store.

use crate::error::ControllerError;
use crate::resource_client::GroupSyncClientTrait;
use crds::{AADGroup, AADGroupSync, AADGroupSyncSpec, AADUser, SCHEDULED_SYNC_TYPE};
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use std::collections::{BTreeMap, HashSet};
use std::sync::{Arc, Mutex, PoisonError};

/// Helper to create a test AADGroupSync whose users are `u1@example.com` style members
pub fn create_test_group_sync(name: &str, namespace: &str, user_ids: &[&str]) -> AADGroupSync {
    AADGroupSync {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        spec: AADGroupSyncSpec {
            group: AADGroup {
                object_id: name.to_string(),
                name: format!("Group {name}"),
                description: String::new(),
                user_count: u32::try_from(user_ids.len()).unwrap(),
                users: user_ids
                    .iter()
                    .map(|id| AADUser {
                        object_id: (*id).to_string(),
                        user_principal_name: format!("{id}@example.com"),
                    })
                    .collect(),
            },
            last_sync_date_time: "2024-01-01T00:00:00Z".to_string(),
            last_sync_type: SCHEDULED_SYNC_TYPE.to_string(),
        },
    }
}

/// Operations of the store that can be made to fail
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StoreOp {
    Get,
    Create,
    Update,
    Delete,
    List,
}

/// In-memory AADGroupSync store
///
/// Tracks a resource version per object so tests can tell creates from updates.
#[derive(Debug, Clone, Default)]
pub struct MockGroupSyncClient {
    namespace: String,
    resources: Arc<Mutex<BTreeMap<String, AADGroupSync>>>,
    failures: Arc<Mutex<HashSet<(StoreOp, String)>>>,
    calls: Arc<Mutex<Vec<(StoreOp, String)>>>,
}

impl MockGroupSyncClient {
    /// Create an empty store for `namespace`
    pub fn new(namespace: &str) -> Self {
        Self {
            namespace: namespace.to_string(),
            ..Default::default()
        }
    }

    /// Add a resource to the store (for test setup)
    pub fn insert(&self, mut group: AADGroupSync) {
        let name = group.metadata.name.clone().unwrap_or_default();
        group.metadata.resource_version = Some("1".to_string());
        self.lock_resources().insert(name, group);
    }

    /// Make `op` fail for `name`; `List` ignores the name
    pub fn fail(&self, op: StoreOp, name: &str) {
        let key = if op == StoreOp::List { String::new() } else { name.to_string() };
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert((op, key));
    }

    /// Snapshot of a stored resource
    pub fn stored(&self, name: &str) -> Option<AADGroupSync> {
        self.lock_resources().get(name).cloned()
    }

    /// Names of all stored resources, sorted
    pub fn names(&self) -> Vec<String> {
        self.lock_resources().keys().cloned().collect()
    }

    /// Calls made so far, in order
    pub fn calls(&self) -> Vec<(StoreOp, String)> {
        self.calls.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    fn lock_resources(&self) -> std::sync::MutexGuard<'_, BTreeMap<String, AADGroupSync>> {
        self.resources.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn record(&self, op: StoreOp, name: &str) -> Result<(), ControllerError> {
        self.calls
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push((op, name.to_string()));

        let failures = self.failures.lock().unwrap_or_else(PoisonError::into_inner);
        let key = if op == StoreOp::List { String::new() } else { name.to_string() };
        if failures.contains(&(op, key)) {
            return Err(ControllerError::InvalidResource(format!("injected {op:?} failure for {name}")));
        }
        Ok(())
    }
}

fn name_of(group: &AADGroupSync) -> String {
    group.metadata.name.clone().unwrap_or_default()
}

fn bump_version(version: Option<&str>) -> String {
    let current: u64 = version.and_then(|v| v.parse().ok()).unwrap_or(0);
    (current + 1).to_string()
}

#[async_trait::async_trait]
impl GroupSyncClientTrait for MockGroupSyncClient {
    fn namespace(&self) -> &str {
        &self.namespace
    }

    async fn get(&self, name: &str) -> Result<Option<AADGroupSync>, ControllerError> {
        self.record(StoreOp::Get, name)?;
        Ok(self.stored(name))
    }

    async fn create(&self, group: &AADGroupSync) -> Result<AADGroupSync, ControllerError> {
        let name = name_of(group);
        self.record(StoreOp::Create, &name)?;

        let mut resources = self.lock_resources();
        if resources.contains_key(&name) {
            return Err(ControllerError::InvalidResource(format!("{name} already exists")));
        }

        let mut created = group.clone();
        created.metadata.namespace = Some(self.namespace.clone());
        created.metadata.resource_version = Some("1".to_string());
        resources.insert(name, created.clone());
        Ok(created)
    }

    async fn update(&self, group: &AADGroupSync) -> Result<AADGroupSync, ControllerError> {
        let name = name_of(group);
        self.record(StoreOp::Update, &name)?;

        let mut resources = self.lock_resources();
        let Some(current) = resources.get(&name) else {
            return Err(ControllerError::InvalidResource(format!("{name} not found")));
        };
        if current.metadata.resource_version != group.metadata.resource_version {
            return Err(ControllerError::InvalidResource(format!("{name} has a stale resourceVersion")));
        }

        let mut updated = group.clone();
        updated.metadata.resource_version = Some(bump_version(group.metadata.resource_version.as_deref()));
        resources.insert(name, updated.clone());
        Ok(updated)
    }

    async fn delete(&self, name: &str) -> Result<(), ControllerError> {
        self.record(StoreOp::Delete, name)?;
        self.lock_resources().remove(name);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<AADGroupSync>, ControllerError> {
        self.record(StoreOp::List, "")?;
        Ok(self.lock_resources().values().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_update_with_stale_version_is_rejected() {
        let store = MockGroupSyncClient::new("aad-sync");
        store.insert(create_test_group_sync("g1", "aad-sync", &["u1"]));

        let current = store.get("g1").await.unwrap().unwrap();
        store.update(&current).await.unwrap();

        let result = store.update(&current).await;
        assert!(matches!(result, Err(ControllerError::InvalidResource(_))));
        assert_eq!(store.stored("g1").unwrap().metadata.resource_version.as_deref(), Some("2"));
    }
}
