//! MS Graph API client
//!
//! Implements the client-credentials token request and the two group
//! endpoints: `/groups/{id}` and `/groups/{id}/members`.

use crate::config::{GRAPH_SCOPE, MsGraphConfig};
use crate::error::MsGraphError;
use crate::models::*;
use crate::msgraph_trait::MsGraphClientTrait;
use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Timeout applied to every directory call
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// MS Graph API client
#[derive(Debug)]
pub struct MsGraphClient {
    client: Client,
    config: MsGraphConfig,
    token: Option<AuthToken>,
}

impl MsGraphClient {
    /// Create a new, unauthenticated MS Graph client
    ///
    /// # Errors
    /// Returns `MsGraphError::Http` if the HTTP client cannot be built.
    pub fn new(config: MsGraphConfig) -> Result<Self, MsGraphError> {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(MsGraphError::Http)?;

        info!("Created msgraph client");

        Ok(Self {
            client,
            config,
            token: None,
        })
    }

    /// Create a client and obtain the access token it uses for its lifetime
    ///
    /// # Errors
    /// Fails if the HTTP client cannot be built or the credentials are rejected.
    pub async fn connect(config: MsGraphConfig) -> Result<Self, MsGraphError> {
        let mut client = Self::new(config)?;
        client.authenticate().await?;
        Ok(client)
    }

    /// Get the client configuration
    pub fn config(&self) -> &MsGraphConfig {
        &self.config
    }

    /// Whether an access token has been obtained
    pub fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    /// Obtain an access token via the client-credentials grant and keep it
    ///
    /// The token is never refreshed; the controller is short-lived.
    ///
    /// # Errors
    /// Returns `MsGraphError::Authentication` with the decoded OAuth2 error if the
    /// token endpoint does not answer with a success status.
    pub async fn authenticate(&mut self) -> Result<(), MsGraphError> {
        let token_url = self.config.token_url();
        info!("Fetching access token: {}", token_url);

        let form = [
            ("client_id", self.config.client_id.as_str()),
            ("scope", GRAPH_SCOPE),
            ("client_secret", self.config.client_secret.as_str()),
            ("grant_type", "client_credentials"),
        ];

        let response = self.client
            .post(&token_url)
            .form(&form)
            .send()
            .await
            .map_err(MsGraphError::Http)?;

        if !response.status().is_success() {
            let (status, error, description) = decode_error(response).await;
            return Err(MsGraphError::Authentication { status, error, description });
        }

        let token: AuthToken = response.json().await?;
        info!("Successfully obtained access token");
        debug!("TokenType: {}, ExpiresIn: {}", token.token_type, token.expires_in);

        self.token = Some(token);
        Ok(())
    }

    /// Get an Azure AD group and its members
    ///
    /// Issues two sequential requests and merges the results. Only the first
    /// page of members is read; a warning is logged when Graph reports more.
    ///
    /// # Errors
    /// Returns `MsGraphError::Api` if either request is answered with a
    /// non-success status, or `MsGraphError::NotAuthenticated` without a token.
    pub async fn get_group(&self, group_id: &str) -> Result<Group, MsGraphError> {
        let encoded_id = urlencoding::encode(group_id);

        let group_url = format!("{}/groups/{}", self.config.graph_endpoint, encoded_id);
        info!("Fetching group: {}", group_url);
        let group: GroupResponse = self.get_json(&group_url).await?;
        info!("Successfully obtained group");

        let members_url = format!("{}/groups/{}/members", self.config.graph_endpoint, encoded_id);
        info!("Fetching group members: {}", members_url);
        let members: MemberListResponse = self.get_json(&members_url).await?;

        if members.next_link.is_some() {
            warn!(
                "Group {} has more members than returned in the first page; only {} members will be synced",
                group_id,
                members.value.len()
            );
        }

        let group = Group {
            id: group.id,
            display_name: group.display_name.unwrap_or_default(),
            description: group.description,
            users: members.value,
        };

        info!("Successfully obtained group members");
        debug!(
            "ID: {}, DisplayName: {}, Description: {}, UserCount: {}",
            group.id,
            group.display_name,
            group.description.as_deref().unwrap_or_default(),
            group.users.len()
        );
        for user in &group.users {
            debug!(
                "Type: {}, ID: {}, DisplayName: {}, UserPrincipalName: {}",
                user.odata_type.as_deref().unwrap_or_default(),
                user.id,
                user.display_name.as_deref().unwrap_or_default(),
                user.user_principal_name.as_deref().unwrap_or_default()
            );
        }

        Ok(group)
    }

    /// Make an authenticated GET request and decode the JSON body
    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, MsGraphError> {
        let token = self.token.as_ref().ok_or(MsGraphError::NotAuthenticated)?;
        debug!("GET {}", url);

        let response = self.client
            .get(url)
            .bearer_auth(&token.access_token)
            .header("Accept", "application/json")
            .send()
            .await
            .map_err(MsGraphError::Http)?;

        if !response.status().is_success() {
            let (status, error, description) = decode_error(response).await;
            return Err(MsGraphError::Api { status, error, description });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Decode a non-success response into `(status, error code, description)`
///
/// Bodies that are not a recognised error shape yield empty strings.
async fn decode_error(response: Response) -> (u16, String, String) {
    let status: StatusCode = response.status();
    let body = response.text().await.unwrap_or_default();
    let (error, description) = serde_json::from_str::<ErrorResponse>(&body)
        .map(ErrorResponse::into_parts)
        .unwrap_or_default();
    (status.as_u16(), error, description)
}

#[async_trait::async_trait]
impl MsGraphClientTrait for MsGraphClient {
    async fn get_group(&self, group_id: &str) -> Result<Group, MsGraphError> {
        self.get_group(group_id).await
    }
}
