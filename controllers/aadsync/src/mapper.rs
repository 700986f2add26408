//! Maps MS Graph groups onto AADGroupSync resources.
//!
//! Every field is overwritten on each sync; the member list is rebuilt rather
//! than merged.

use chrono::{DateTime, SecondsFormat, Utc};
use crds::{AADGroup, AADGroupSync, AADGroupSyncSpec, AADUser, SCHEDULED_SYNC_TYPE};
use msgraph_client::{Group, User};

/// Build a new AADGroupSync named after the directory group id
pub fn from_directory_group(group: &Group) -> AADGroupSync {
    from_directory_group_at(group, Utc::now())
}

/// Build a new AADGroupSync, stamping it with `synced_at`
pub fn from_directory_group_at(group: &Group, synced_at: DateTime<Utc>) -> AADGroupSync {
    AADGroupSync::new(&group.id, spec_for(group, synced_at))
}

/// Overwrite the spec of an existing AADGroupSync; metadata is left untouched
pub fn merge_directory_group(group: &Group, existing: &mut AADGroupSync) {
    merge_directory_group_at(group, existing, Utc::now());
}

/// Overwrite the spec of an existing AADGroupSync, stamping it with `synced_at`
pub fn merge_directory_group_at(group: &Group, existing: &mut AADGroupSync, synced_at: DateTime<Utc>) {
    existing.spec = spec_for(group, synced_at);
}

fn spec_for(group: &Group, synced_at: DateTime<Utc>) -> AADGroupSyncSpec {
    let users: Vec<AADUser> = group.users.iter().map(to_synced_user).collect();

    AADGroupSyncSpec {
        group: AADGroup {
            object_id: group.id.clone(),
            name: group.display_name.clone(),
            description: group.description.clone().unwrap_or_default(),
            user_count: u32::try_from(users.len()).unwrap_or(u32::MAX),
            users,
        },
        last_sync_date_time: synced_at.to_rfc3339_opts(SecondsFormat::Secs, true),
        last_sync_type: SCHEDULED_SYNC_TYPE.to_string(),
    }
}

fn to_synced_user(user: &User) -> AADUser {
    AADUser {
        object_id: user.id.clone(),
        user_principal_name: user.user_principal_name.clone().unwrap_or_default(),
    }
}
