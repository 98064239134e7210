//! Record access service — the per-entity RBAC surface.

use std::marker::PhantomData;
use std::sync::Arc;

use uuid::Uuid;
use vantage_core::error::{VantageError, VantageResult};
use vantage_core::filter::{DELETED_FIELD, Filter, TENANT_FIELD};
use vantage_core::models::actor::Actor;
use vantage_core::models::role::Role;
use vantage_core::record::OwnedRecord;
use vantage_core::repository::{DirectoryRepository, RecordStore};

use crate::compiler::OwnershipFilterCompiler;
use crate::guard::RecordAccessGuard;
use crate::policy::{AccessPolicy, Action, ResourceKind};

/// Access-controlled operations over one entity's storage.
///
/// Generic over the record type, its store, and the directory, so every
/// entity shares a single implementation; per-entity wiring is a type
/// alias and a constructor in [`crate::entities`].
///
/// Read operations never signal denial — a denied list is empty and a
/// denied (or missing) record is `None`, so callers cannot distinguish
/// "does not exist" from "not yours". Write operations do raise
/// [`VantageError::PermissionDenied`] when the role lacks the
/// capability, for the outer layer to map to a 403.
///
/// Every operation is stateless per call: subordinates are recomputed
/// on each request, and storage errors propagate unchanged (no retries,
/// no partial results).
pub struct RecordAccessService<R, S, D>
where
    R: OwnedRecord,
    S: RecordStore<R>,
    D: DirectoryRepository,
{
    store: S,
    policy: Arc<AccessPolicy>,
    compiler: OwnershipFilterCompiler<D>,
    guard: RecordAccessGuard<D>,
    resource: ResourceKind,
    _record: PhantomData<fn() -> R>,
}

impl<R, S, D> RecordAccessService<R, S, D>
where
    R: OwnedRecord,
    S: RecordStore<R>,
    D: DirectoryRepository + Clone,
{
    pub fn new(store: S, directory: D, policy: Arc<AccessPolicy>, resource: ResourceKind) -> Self {
        Self {
            store,
            policy,
            compiler: OwnershipFilterCompiler::new(directory.clone()),
            guard: RecordAccessGuard::new(directory),
            resource,
            _record: PhantomData,
        }
    }

    /// All live records the actor may see.
    pub async fn list_for_user(&self, actor: &Actor) -> VantageResult<Vec<R>> {
        self.list_for_user_with_deleted(actor, false).await
    }

    /// Same as [`Self::list_for_user`], optionally lifting the
    /// soft-delete exclusion. Tenant and ownership clauses always apply.
    pub async fn list_for_user_with_deleted(
        &self,
        actor: &Actor,
        include_deleted: bool,
    ) -> VantageResult<Vec<R>> {
        if !self.policy.is_permitted(actor.role, Action::View, self.resource) {
            return Ok(Vec::new());
        }

        let filter = self.compiler.compile::<R>(actor, include_deleted).await;
        self.store.query(actor.tenant_id, &filter).await
    }

    /// Fetch one record if it exists and the actor may see it.
    ///
    /// The raw id lookup may cross tenants at the storage layer; the
    /// guard applies the tenant check before anything role-based.
    pub async fn get_by_id_for_user(&self, id: Uuid, actor: &Actor) -> VantageResult<Option<R>> {
        if !self.policy.is_permitted(actor.role, Action::View, self.resource) {
            return Ok(None);
        }

        let Some(record) = self.store.get_by_id(id).await? else {
            return Ok(None);
        };

        if self.guard.can_access(&record, actor).await {
            Ok(Some(record))
        } else {
            Ok(None)
        }
    }

    /// Live records of one target owner, if the actor may see that
    /// owner's records at all.
    pub async fn list_by_owner_for_user(
        &self,
        owner_id: Uuid,
        actor: &Actor,
    ) -> VantageResult<Vec<R>> {
        if !self.policy.is_permitted(actor.role, Action::View, self.resource) {
            return Ok(Vec::new());
        }
        if !self.guard.can_access_owner(owner_id, actor).await {
            return Ok(Vec::new());
        }

        let filter = Filter::all(vec![
            Filter::eq(TENANT_FIELD, actor.tenant_id),
            Filter::eq(DELETED_FIELD, false),
            Filter::eq(R::OWNER_FIELD, owner_id),
        ]);
        self.store.query(actor.tenant_id, &filter).await
    }

    /// Case-insensitive substring search over the actor's accessible
    /// set. Always a post-filter in memory, never pushed to storage, so
    /// correctness is bounded by the ownership filter. A blank term
    /// returns the full accessible set.
    pub async fn search_for_user(&self, actor: &Actor, term: &str) -> VantageResult<Vec<R>> {
        let records = self.list_for_user(actor).await?;

        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Ok(records);
        }

        Ok(records
            .into_iter()
            .filter(|record| {
                record
                    .search_text()
                    .iter()
                    .any(|text| text.to_lowercase().contains(&needle))
            })
            .collect())
    }

    /// Create a record in the actor's tenant.
    pub async fn create_for_user(&self, actor: &Actor, record: R) -> VantageResult<R> {
        if !self.policy.is_permitted(actor.role, Action::Create, self.resource) {
            return Err(self.denied(Action::Create));
        }
        if record.tenant_id() != actor.tenant_id {
            return Err(VantageError::TenantContext);
        }

        self.store.create(record).await
    }

    /// Soft-delete a record the actor owns (or may act on). An
    /// inaccessible record reports NotFound, exactly like a missing one.
    pub async fn soft_delete_for_user(&self, actor: &Actor, id: Uuid) -> VantageResult<()> {
        if !self.policy.is_permitted(actor.role, Action::Delete, self.resource) {
            return Err(self.denied(Action::Delete));
        }

        let Some(record) = self.store.get_by_id(id).await? else {
            return Err(self.not_found(id));
        };
        if !self.guard.can_access(&record, actor).await {
            return Err(self.not_found(id));
        }

        self.store
            .soft_delete(actor.tenant_id, id, actor.user_id)
            .await
    }

    /// Bring a soft-deleted record back. Admin only.
    pub async fn restore_for_user(&self, actor: &Actor, id: Uuid) -> VantageResult<()> {
        if actor.role != Some(Role::Admin) {
            return Err(VantageError::PermissionDenied {
                reason: "restore is an admin-only operation".into(),
            });
        }

        let Some(record) = self.store.get_by_id(id).await? else {
            return Err(self.not_found(id));
        };
        if record.tenant_id() != actor.tenant_id {
            return Err(self.not_found(id));
        }

        self.store.restore(actor.tenant_id, id, actor.user_id).await
    }

    /// Physically remove a record. Admin only.
    pub async fn hard_delete_for_user(&self, actor: &Actor, id: Uuid) -> VantageResult<()> {
        if actor.role != Some(Role::Admin) {
            return Err(VantageError::PermissionDenied {
                reason: "hard delete is an admin-only operation".into(),
            });
        }

        let Some(record) = self.store.get_by_id(id).await? else {
            return Err(self.not_found(id));
        };
        if record.tenant_id() != actor.tenant_id {
            return Err(self.not_found(id));
        }

        self.store.hard_delete(actor.tenant_id, id).await
    }

    fn denied(&self, action: Action) -> VantageError {
        VantageError::PermissionDenied {
            reason: format!("role lacks {action:?} on {:?}", self.resource),
        }
    }

    fn not_found(&self, id: Uuid) -> VantageError {
        VantageError::NotFound {
            entity: R::TABLE.into(),
            id: id.to_string(),
        }
    }
}
