//! MS Graph API models
//!
//! Wire types match the Graph v1.0 `group` and `directoryObject` resources.
//! See: https://learn.microsoft.com/graph/api/resources/group

use serde::{Deserialize, Serialize};
use std::fmt;

/// OAuth2 access token returned by the client-credentials grant
#[derive(Clone, Deserialize)]
pub struct AuthToken {
    pub token_type: String,
    #[serde(default)]
    pub expires_in: u64,
    pub access_token: String,
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthToken")
            .field("token_type", &self.token_type)
            .field("expires_in", &self.expires_in)
            .field("access_token", &"<redacted>")
            .finish()
    }
}

/// Error body returned by either the token endpoint or the Graph API
///
/// The token endpoint uses the OAuth2 shape `{"error": "...", "error_description": "..."}`,
/// Graph uses `{"error": {"code": "...", "message": "..."}}`.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ErrorResponse {
    Graph {
        error: GraphErrorDetail,
    },
    OAuth {
        error: String,
        #[serde(default)]
        error_description: String,
    },
}

/// Inner error object of a Graph error response
#[derive(Debug, Clone, Deserialize)]
pub struct GraphErrorDetail {
    #[serde(default)]
    pub code: String,
    #[serde(default)]
    pub message: String,
}

impl ErrorResponse {
    /// Split into `(error code, description)`
    pub fn into_parts(self) -> (String, String) {
        match self {
            Self::Graph { error } => (error.code, error.message),
            Self::OAuth { error, error_description } => (error, error_description),
        }
    }
}

/// Group metadata as returned by `GET /groups/{id}`
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupResponse {
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Member list as returned by `GET /groups/{id}/members`
#[derive(Debug, Clone, Deserialize)]
pub struct MemberListResponse {
    #[serde(default)]
    pub value: Vec<User>,
    /// Present when more members exist beyond this page
    #[serde(rename = "@odata.nextLink", default)]
    pub next_link: Option<String>,
}

/// Azure AD group with its members
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: String,
    pub display_name: String,
    pub description: Option<String>,
    pub users: Vec<User>,
}

/// Azure AD group member
///
/// Members are usually users but may also be devices, service principals or
/// nested groups, in which case the user specific attributes are absent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "camelCase")]
pub struct User {
    #[serde(rename = "@odata.type", default)]
    pub odata_type: Option<String>,
    pub id: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub given_name: Option<String>,
    #[serde(default)]
    pub surname: Option<String>,
    #[serde(default)]
    pub user_principal_name: Option<String>,
}

impl User {
    /// Create a user member with the given object id and principal name
    pub fn new(id: impl Into<String>, user_principal_name: impl Into<String>) -> Self {
        Self {
            odata_type: Some("#microsoft.graph.user".to_string()),
            id: id.into(),
            user_principal_name: Some(user_principal_name.into()),
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_error_response_oauth_shape() {
        let body: ErrorResponse = serde_json::from_value(json!({
            "error": "invalid_client",
            "error_description": "AADSTS7000215: Invalid client secret provided.",
            "error_codes": [7_000_215]
        }))
        .unwrap();

        let (error, description) = body.into_parts();
        assert_eq!(error, "invalid_client");
        assert!(description.starts_with("AADSTS7000215"));
    }

    #[test]
    fn test_error_response_graph_shape() {
        let body: ErrorResponse = serde_json::from_value(json!({
            "error": {
                "code": "Request_ResourceNotFound",
                "message": "Resource 'g1' does not exist.",
                "innerError": {"request-id": "abc"}
            }
        }))
        .unwrap();

        let (error, description) = body.into_parts();
        assert_eq!(error, "Request_ResourceNotFound");
        assert_eq!(description, "Resource 'g1' does not exist.");
    }

    #[test]
    fn test_member_list_with_non_user_member() {
        let members: MemberListResponse = serde_json::from_value(json!({
            "@odata.context": "https://graph.microsoft.com/v1.0/$metadata#directoryObjects",
            "value": [
                {
                    "@odata.type": "#microsoft.graph.user",
                    "id": "u1",
                    "displayName": "Alex Doe",
                    "givenName": "Alex",
                    "surname": "Doe",
                    "userPrincipalName": "alex@example.com"
                },
                {
                    "@odata.type": "#microsoft.graph.device",
                    "id": "d1",
                    "displayName": "build-agent-01"
                }
            ]
        }))
        .unwrap();

        assert_eq!(members.value.len(), 2);
        assert_eq!(members.value[0].user_principal_name.as_deref(), Some("alex@example.com"));
        assert_eq!(members.value[1].user_principal_name, None);
        assert!(members.next_link.is_none());
    }

    #[test]
    fn test_auth_token_debug_redacts_access_token() {
        let token: AuthToken = serde_json::from_value(json!({
            "token_type": "Bearer",
            "expires_in": 3599,
            "ext_expires_in": 3599,
            "access_token": "eyJ0eXAi"
        }))
        .unwrap();

        assert_eq!(token.expires_in, 3599);
        assert!(!format!("{token:?}").contains("eyJ0eXAi"));
    }
}
