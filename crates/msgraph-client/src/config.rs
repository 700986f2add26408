//! Client configuration
//!
//! Credentials come from the standard Azure environment variables. The
//! authority host and Graph endpoint default to the public Azure cloud.

use crate::error::MsGraphError;
use std::fmt;

/// Azure AD tenant id
pub const TENANT_ID_VAR: &str = "AZURE_TENANT_ID";
/// App registration client id
pub const CLIENT_ID_VAR: &str = "AZURE_CLIENT_ID";
/// App registration client secret
pub const CLIENT_SECRET_VAR: &str = "AZURE_CLIENT_SECRET";
/// Optional override of the login authority
pub const AUTHORITY_HOST_VAR: &str = "AZURE_AUTHORITY_HOST";
/// Optional override of the Graph API base URL
pub const GRAPH_ENDPOINT_VAR: &str = "MSGRAPH_API_ENDPOINT";

/// Default login authority for the public Azure cloud
pub const DEFAULT_AUTHORITY_HOST: &str = "https://login.microsoftonline.com";
/// Default Graph API base URL
pub const DEFAULT_GRAPH_ENDPOINT: &str = "https://graph.microsoft.com/v1.0";
/// Scope requested in the client-credentials grant
pub const GRAPH_SCOPE: &str = "https://graph.microsoft.com/.default";

/// Configuration required to talk to MS Graph
#[derive(Clone, PartialEq, Eq)]
pub struct MsGraphConfig {
    /// Azure AD tenant id
    pub tenant_id: String,
    /// App registration client id
    pub client_id: String,
    /// App registration client secret
    pub client_secret: String,
    /// Login authority, without trailing slash
    pub authority_host: String,
    /// Graph API base URL, without trailing slash
    pub graph_endpoint: String,
}

impl MsGraphConfig {
    /// Create a config for the public Azure cloud
    pub fn new(
        tenant_id: impl Into<String>,
        client_id: impl Into<String>,
        client_secret: impl Into<String>,
    ) -> Self {
        Self {
            tenant_id: tenant_id.into(),
            client_id: client_id.into(),
            client_secret: client_secret.into(),
            authority_host: DEFAULT_AUTHORITY_HOST.to_string(),
            graph_endpoint: DEFAULT_GRAPH_ENDPOINT.to_string(),
        }
    }

    /// Point the client at different login and Graph hosts
    #[must_use]
    pub fn with_endpoints(mut self, authority_host: &str, graph_endpoint: &str) -> Self {
        self.authority_host = authority_host.trim_end_matches('/').to_string();
        self.graph_endpoint = graph_endpoint.trim_end_matches('/').to_string();
        self
    }

    /// Create a config from environment variables
    ///
    /// # Errors
    /// Returns `MsGraphError::InvalidConfig` if any credential variable is unset or empty.
    pub fn from_env() -> Result<Self, MsGraphError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Create a config from an arbitrary variable lookup
    ///
    /// # Errors
    /// Returns `MsGraphError::InvalidConfig` if any credential variable is unset or empty.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, MsGraphError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.is_empty());

        let (Some(tenant_id), Some(client_id), Some(client_secret)) =
            (read(TENANT_ID_VAR), read(CLIENT_ID_VAR), read(CLIENT_SECRET_VAR))
        else {
            return Err(MsGraphError::InvalidConfig(format!(
                "the {TENANT_ID_VAR}, {CLIENT_ID_VAR}, {CLIENT_SECRET_VAR} environment variables must be set"
            )));
        };

        let authority_host = read(AUTHORITY_HOST_VAR).unwrap_or_else(|| DEFAULT_AUTHORITY_HOST.to_string());
        let graph_endpoint = read(GRAPH_ENDPOINT_VAR).unwrap_or_else(|| DEFAULT_GRAPH_ENDPOINT.to_string());

        Ok(Self::new(tenant_id, client_id, client_secret).with_endpoints(&authority_host, &graph_endpoint))
    }

    /// Tenant-scoped OAuth2 token endpoint
    pub fn token_url(&self) -> String {
        format!("{}/{}/oauth2/v2.0/token", self.authority_host, self.tenant_id)
    }
}

impl fmt::Debug for MsGraphConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MsGraphConfig")
            .field("tenant_id", &self.tenant_id)
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .field("authority_host", &self.authority_host)
            .field("graph_endpoint", &self.graph_endpoint)
            .finish()
    }
}
