//! MS Graph client errors

use thiserror::Error;

/// Errors that can occur when interacting with the MS Graph API
#[derive(Debug, Error)]
pub enum MsGraphError {
    /// HTTP request/response error
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The token endpoint rejected the client credentials
    #[error("Authentication failed: StatusCode: {status}, Error: {error}, Description: {description}")]
    Authentication {
        /// HTTP status code returned by the token endpoint
        status: u16,
        /// OAuth2 error code
        error: String,
        /// Human readable error description
        description: String,
    },

    /// The Graph API returned a non-success response
    #[error("MS Graph API error: StatusCode: {status}, Error: {error}, Description: {description}")]
    Api {
        /// HTTP status code
        status: u16,
        /// Graph error code (e.g. "Request_ResourceNotFound")
        error: String,
        /// Human readable error message
        description: String,
    },

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Missing or invalid client configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A Graph call was made before an access token was obtained
    #[error("Not authenticated: call authenticate() before querying MS Graph")]
    NotAuthenticated,
}
