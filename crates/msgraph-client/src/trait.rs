//! MsGraphClient trait for mocking
//!
//! This trait abstracts the MsGraphClient so the reconciler can be unit tested
//! against an in-memory directory.

use crate::error::MsGraphError;
use crate::models::Group;

/// Trait for MS Graph directory operations
///
/// All async methods must be `Send` to work with Tokio's work-stealing runtime.
#[async_trait::async_trait]
pub trait MsGraphClientTrait: Send + Sync {
    /// Get a group together with its (first page of) members
    async fn get_group(&self, group_id: &str) -> Result<Group, MsGraphError>;
}
