//! Microsoft Graph API Client
//!
//! A small client for reading Azure AD groups and their members from the
//! Microsoft Graph API, authenticated with the OAuth2 client-credentials grant.
//!
//! # Example
//!
//! ```no_run
//! use msgraph_client::{MsGraphClient, MsGraphConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads AZURE_TENANT_ID, AZURE_CLIENT_ID and AZURE_CLIENT_SECRET
//! let config = MsGraphConfig::from_env()?;
//!
//! // Create a client and obtain an access token
//! let client = MsGraphClient::connect(config).await?;
//!
//! // Fetch a group together with its members
//! let group = client.get_group("00000000-0000-0000-0000-000000000001").await?;
//! println!("{} has {} members", group.display_name, group.users.len());
//! # Ok(())
//! # }
//! ```
//!
//! # Limitations
//!
//! - Only the first page of group members is returned.
//! - The access token is obtained once and never refreshed.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
#[path = "trait.rs"]
pub mod msgraph_trait;
#[cfg(any(test, feature = "test-util"))]
pub mod mock;

pub use client::MsGraphClient;
pub use config::MsGraphConfig;
pub use error::MsGraphError;
pub use models::*;
pub use msgraph_trait::MsGraphClientTrait;
#[cfg(any(test, feature = "test-util"))]
pub use mock::MockMsGraphClient;
