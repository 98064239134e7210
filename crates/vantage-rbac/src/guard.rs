//! Per-record access decisions.

use uuid::Uuid;
use vantage_core::models::actor::Actor;
use vantage_core::models::role::Role;
use vantage_core::record::OwnedRecord;
use vantage_core::repository::DirectoryRepository;

use crate::directory::DirectoryResolver;

/// Decides access to a single already-fetched record.
///
/// Used on single-record paths where compiling a filter is unnecessary.
/// The decision order is fixed: tenant match first (unconditionally,
/// regardless of role), then the soft-delete check, then ownership.
/// Must agree with the compiled filter for every (record, actor) pair —
/// the equivalence tests pin this down.
#[derive(Debug, Clone)]
pub struct RecordAccessGuard<D: DirectoryRepository> {
    directory: DirectoryResolver<D>,
}

impl<D: DirectoryRepository> RecordAccessGuard<D> {
    pub fn new(directory: D) -> Self {
        Self {
            directory: DirectoryResolver::new(directory),
        }
    }

    pub async fn can_access<R: OwnedRecord>(&self, record: &R, actor: &Actor) -> bool {
        if record.tenant_id() != actor.tenant_id {
            return false;
        }
        // Deleted records are reached through the dedicated admin
        // restore path, never through this guard.
        if record.is_deleted() {
            return false;
        }
        self.can_access_owner(record.owner(), actor).await
    }

    /// The ownership branch alone, evaluated against a candidate owner
    /// id. Also serves the list-by-owner path, which asks whether the
    /// requesting actor may see a target owner's records at all.
    pub async fn can_access_owner(&self, owner: Uuid, actor: &Actor) -> bool {
        match actor.role {
            Some(Role::Admin) => true,
            Some(Role::SalesManager) => {
                if owner == actor.user_id {
                    return true;
                }
                self.directory
                    .subordinates_of(actor.user_id, actor.tenant_id)
                    .await
                    .contains(&owner)
            }
            Some(Role::SalesRep) => owner == actor.user_id,
            None => false,
        }
    }
}
