//! Mock MsGraphClient for unit testing
//!
//! Stores groups in memory. Unknown group ids answer the way Graph does,
//! with a 404 `Request_ResourceNotFound` error.

use crate::error::MsGraphError;
use crate::models::{Group, User};
use crate::msgraph_trait::MsGraphClientTrait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Mock MsGraphClient for testing
#[derive(Debug, Clone, Default)]
pub struct MockMsGraphClient {
    groups: Arc<Mutex<HashMap<String, Group>>>,
    failures: Arc<Mutex<HashMap<String, String>>>,
    requests: Arc<Mutex<Vec<String>>>,
}

impl MockMsGraphClient {
    /// Create an empty mock directory
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a group to the mock directory (for test setup)
    pub fn add_group(&self, group: Group) {
        self.groups
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(group.id.clone(), group);
    }

    /// Add a group built from an id, a display name and `(object id, upn)` member pairs
    pub fn add_group_with_users(&self, id: &str, display_name: &str, users: &[(&str, &str)]) {
        self.add_group(Group {
            id: id.to_string(),
            display_name: display_name.to_string(),
            description: Some(format!("{display_name} group")),
            users: users.iter().map(|(id, upn)| User::new(*id, *upn)).collect(),
        });
    }

    /// Remove a group from the mock directory
    pub fn remove_group(&self, id: &str) {
        self.groups
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(id);
    }

    /// Make every request for `id` fail with a 500 response
    pub fn fail_group(&self, id: &str, message: &str) {
        self.failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(id.to_string(), message.to_string());
    }

    /// Group ids requested so far, in order
    pub fn requests(&self) -> Vec<String> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

#[async_trait::async_trait]
impl MsGraphClientTrait for MockMsGraphClient {
    async fn get_group(&self, group_id: &str) -> Result<Group, MsGraphError> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(group_id.to_string());

        if let Some(message) = self
            .failures
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(group_id)
        {
            return Err(MsGraphError::Api {
                status: 500,
                error: "InternalServerError".to_string(),
                description: message.clone(),
            });
        }

        self.groups
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .get(group_id)
            .cloned()
            .ok_or_else(|| MsGraphError::Api {
                status: 404,
                error: "Request_ResourceNotFound".to_string(),
                description: format!("Resource '{group_id}' does not exist"),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_returns_added_group() {
        let mock = MockMsGraphClient::new();
        mock.add_group_with_users("g1", "Platform", &[("u1", "alex@example.com")]);

        let group = mock.get_group("g1").await.unwrap();
        assert_eq!(group.users.len(), 1);
        assert_eq!(mock.requests(), vec!["g1".to_string()]);
    }

    #[tokio::test]
    async fn test_mock_unknown_group_is_not_found() {
        let mock = MockMsGraphClient::new();
        let result = mock.get_group("nope").await;
        assert!(matches!(result, Err(MsGraphError::Api { status: 404, .. })));
    }

    #[tokio::test]
    async fn test_mock_injected_failure_wins() {
        let mock = MockMsGraphClient::new();
        mock.add_group_with_users("g1", "Platform", &[]);
        mock.fail_group("g1", "throttled");

        let result = mock.get_group("g1").await;
        assert!(matches!(result, Err(MsGraphError::Api { status: 500, .. })));
    }
}
