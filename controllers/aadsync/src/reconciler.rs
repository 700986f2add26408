//! Reconciliation logic for AADGroupSync CRDs.
//!
//! A single sequential pass: every configured group is fetched from MS Graph
//! and written to its AADGroupSync resource, then resources for groups that
//! are no longer configured are deleted. Failures for one group are logged
//! and recorded, and the pass moves on to the next group.

use crate::error::ControllerError;
use crate::mapper;
use crate::resource_client::GroupSyncClientTrait;
use msgraph_client::MsGraphClientTrait;
use std::fmt;
use tracing::{Instrument, error, info, info_span};

/// Step of the pass in which a failure happened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncStage {
    /// Fetching the group from MS Graph
    FetchGroup,
    /// Reading the existing AADGroupSync
    GetResource,
    /// Creating a new AADGroupSync
    Create,
    /// Replacing an existing AADGroupSync
    Update,
    /// Listing AADGroupSyncs for the deletion pass
    List,
    /// Deleting an unconfigured AADGroupSync
    Delete,
}

impl fmt::Display for SyncStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stage = match self {
            Self::FetchGroup => "fetch group",
            Self::GetResource => "get resource",
            Self::Create => "create",
            Self::Update => "update",
            Self::List => "list",
            Self::Delete => "delete",
        };
        f.write_str(stage)
    }
}

/// A failure recorded during the pass
#[derive(Debug)]
pub struct SyncFailure {
    /// Group id or resource name; `None` for the list call
    pub name: Option<String>,
    /// Step that failed
    pub stage: SyncStage,
    /// Underlying error
    pub error: ControllerError,
}

/// Outcome of a reconciliation pass
#[derive(Debug, Default)]
pub struct SyncReport {
    /// Resources created
    pub created: Vec<String>,
    /// Resources updated
    pub updated: Vec<String>,
    /// Resources deleted
    pub deleted: Vec<String>,
    /// Failures, in the order they happened
    pub failures: Vec<SyncFailure>,
}

impl SyncReport {
    /// Whether every step of the pass succeeded
    pub fn is_clean(&self) -> bool {
        self.failures.is_empty()
    }

    fn fail(&mut self, name: Option<&str>, stage: SyncStage, error: impl Into<ControllerError>) {
        let error = error.into();
        match name {
            Some(name) => error!("Failed to {} {}: {}", stage, name, error),
            None => error!("Failed to {}: {}", stage, error),
        }
        self.failures.push(SyncFailure {
            name: name.map(str::to_string),
            stage,
            error,
        });
    }
}

/// Reconciles configured Azure AD groups into AADGroupSync resources.
#[derive(Debug)]
pub struct Reconciler<D, R> {
    directory: D,
    resources: R,
}

impl<D, R> Reconciler<D, R>
where
    D: MsGraphClientTrait,
    R: GroupSyncClientTrait,
{
    /// Creates a new reconciler instance.
    pub fn new(directory: D, resources: R) -> Self {
        Self { directory, resources }
    }

    /// Runs one reconciliation pass over `groups`.
    ///
    /// This method:
    /// 1. Creates or updates an AADGroupSync for every group, in order
    /// 2. Deletes every AADGroupSync whose name is not in `groups`
    ///
    /// It never fails; per-group errors are logged and returned in the report.
    pub async fn run(&self, groups: &[String]) -> SyncReport {
        let mut report = SyncReport::default();

        for group_id in groups {
            self.sync_group(group_id, &mut report)
                .instrument(info_span!("group", id = %group_id))
                .await;
        }

        info!("----------------------------------------------------");
        info!("Deleting non-configured aadgroupsyncs.aad.microsoft.com entries");
        info!("----------------------------------------------------");
        self.delete_unconfigured(groups, &mut report).await;

        info!(
            "Sync finished in namespace {}: {} created, {} updated, {} deleted, {} failed",
            self.resources.namespace(),
            report.created.len(),
            report.updated.len(),
            report.deleted.len(),
            report.failures.len()
        );

        report
    }

    async fn sync_group(&self, group_id: &str, report: &mut SyncReport) {
        let directory_group = match self.directory.get_group(group_id).await {
            Ok(group) => group,
            Err(e) => return report.fail(Some(group_id), SyncStage::FetchGroup, e),
        };

        info!("----------------------------------------------------");
        info!("Processing AAD Group ID from MS Graph: {}", directory_group.id);
        info!("----------------------------------------------------");

        let existing = match self.resources.get(group_id).await {
            Ok(existing) => existing,
            Err(e) => return report.fail(Some(group_id), SyncStage::GetResource, e),
        };

        match existing {
            None => {
                info!("Creating new aadgroupsyncs.aad.microsoft.com entry");
                let resource = mapper::from_directory_group(&directory_group);
                match self.resources.create(&resource).await {
                    Ok(_) => report.created.push(group_id.to_string()),
                    Err(e) => report.fail(Some(group_id), SyncStage::Create, e),
                }
            }
            Some(mut resource) => {
                info!("Updating existing aadgroupsyncs.aad.microsoft.com entry");
                mapper::merge_directory_group(&directory_group, &mut resource);
                match self.resources.update(&resource).await {
                    Ok(_) => report.updated.push(group_id.to_string()),
                    Err(e) => report.fail(Some(group_id), SyncStage::Update, e),
                }
            }
        }
    }

    async fn delete_unconfigured(&self, groups: &[String], report: &mut SyncReport) {
        let existing = match self.resources.list().await {
            Ok(existing) => existing,
            Err(e) => return report.fail(None, SyncStage::List, e),
        };

        for resource in existing {
            let Some(name) = resource.metadata.name.as_deref() else {
                continue;
            };
            if groups.iter().any(|group| group == name) {
                continue;
            }

            match self.resources.delete(name).await {
                Ok(()) => report.deleted.push(name.to_string()),
                Err(e) => report.fail(Some(name), SyncStage::Delete, e),
            }
        }
    }
}
