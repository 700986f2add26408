//! AAD Sync CRD Definitions
//!
//! Kubernetes Custom Resource Definitions for the AAD group sync controller.

pub mod aad_group_sync;

pub use aad_group_sync::*;
