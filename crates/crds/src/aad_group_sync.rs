//! AADGroupSync CRD
//!
//! Mirrors the membership of a single Azure AD group inside the cluster.
//! The resource name is the Azure AD object id of the group.

use kube::CustomResource;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Sync type recorded for every run of the batch job.
pub const SCHEDULED_SYNC_TYPE: &str = "Scheduled";

/// AADGroupSyncSpec holds the last synced state of an Azure AD group
#[derive(CustomResource, Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[kube(
    group = "aad.microsoft.com",
    version = "v1",
    kind = "AADGroupSync",
    plural = "aadgroupsyncs",
    namespaced
)]
#[serde(rename_all = "camelCase")]
pub struct AADGroupSyncSpec {
    /// Group details as fetched from MS Graph
    pub group: AADGroup,

    /// Time of the last sync (RFC 3339, UTC)
    pub last_sync_date_time: String,

    /// How the last sync was triggered (always "Scheduled" for the batch job)
    pub last_sync_type: String,
}

/// Azure AD group details
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AADGroup {
    /// Azure AD object id
    pub object_id: String,

    /// Display name
    pub name: String,

    /// Description (empty when the group has none)
    #[serde(default)]
    pub description: String,

    /// Number of entries in `users`
    pub user_count: u32,

    /// Group members
    #[serde(default)]
    pub users: Vec<AADUser>,
}

/// Azure AD group member
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct AADUser {
    /// Azure AD object id
    pub object_id: String,

    /// User principal name (empty for non-user members)
    #[serde(default)]
    pub user_principal_name: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use kube::{CustomResourceExt, Resource};
    use serde_json::json;

    #[test]
    fn test_crd_identity() {
        let crd = AADGroupSync::crd();
        assert_eq!(crd.metadata.name.as_deref(), Some("aadgroupsyncs.aad.microsoft.com"));
        assert_eq!(crd.spec.scope, "Namespaced");
        assert_eq!(AADGroupSync::kind(&()), "AADGroupSync");
        assert_eq!(AADGroupSync::api_version(&()), "aad.microsoft.com/v1");
    }

    #[test]
    fn test_spec_serializes_camel_case() {
        let spec = AADGroupSyncSpec {
            group: AADGroup {
                object_id: "g1".to_string(),
                name: "Platform".to_string(),
                description: "Platform team".to_string(),
                user_count: 1,
                users: vec![AADUser {
                    object_id: "u1".to_string(),
                    user_principal_name: "alex@example.com".to_string(),
                }],
            },
            last_sync_date_time: "2024-01-01T00:00:00Z".to_string(),
            last_sync_type: SCHEDULED_SYNC_TYPE.to_string(),
        };

        let value = serde_json::to_value(&spec).unwrap();
        assert_eq!(
            value,
            json!({
                "group": {
                    "objectId": "g1",
                    "name": "Platform",
                    "description": "Platform team",
                    "userCount": 1,
                    "users": [{"objectId": "u1", "userPrincipalName": "alex@example.com"}]
                },
                "lastSyncDateTime": "2024-01-01T00:00:00Z",
                "lastSyncType": "Scheduled"
            })
        );
    }

    #[test]
    fn test_deserializes_resource_without_optional_fields() {
        let resource: AADGroupSync = serde_json::from_value(json!({
            "apiVersion": "aad.microsoft.com/v1",
            "kind": "AADGroupSync",
            "metadata": {"name": "g1", "namespace": "aad"},
            "spec": {
                "group": {"objectId": "g1", "name": "Platform", "userCount": 0},
                "lastSyncDateTime": "2024-01-01T00:00:00Z",
                "lastSyncType": "Scheduled"
            }
        }))
        .unwrap();

        assert_eq!(resource.metadata.name.as_deref(), Some("g1"));
        assert!(resource.spec.group.description.is_empty());
        assert!(resource.spec.group.users.is_empty());
    }
}
