//! Collaborator trait definitions for data access abstraction.
//!
//! All operations are async. The RBAC engine consumes exactly two
//! collaborators: the user directory (reporting-line lookups) and the
//! tenant-scoped record store. Implementations live in `vantage-db`;
//! tests substitute in-memory fakes.

use uuid::Uuid;

use crate::error::VantageResult;
use crate::filter::Filter;
use crate::models::user::{CreateUser, User};
use crate::record::OwnedRecord;

/// User-directory collaborator.
///
/// `find_reports` resolves a manager's direct reports, filtered
/// server-side to individual-contributor role, same tenant, and not
/// soft-deleted. Errors here are the caller's to soften — the directory
/// resolver in `vantage-rbac` degrades a failed lookup to "no reports".
pub trait DirectoryRepository: Send + Sync {
    fn find_reports(
        &self,
        manager_id: Uuid,
        tenant_id: Uuid,
    ) -> impl Future<Output = VantageResult<Vec<Uuid>>> + Send;
}

/// User management surface of the directory, beyond what the RBAC engine
/// consumes.
pub trait UserDirectory: DirectoryRepository {
    fn create_user(&self, input: CreateUser) -> impl Future<Output = VantageResult<User>> + Send;

    fn get_user(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = VantageResult<User>> + Send;

    /// Point a user at a new manager (or clear the line with `None`).
    /// Implementations must reject reporting cycles.
    fn set_reporting(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        reporting_to: Option<Uuid>,
    ) -> impl Future<Output = VantageResult<User>> + Send;
}

/// Tenant-scoped record storage for one owned entity type.
///
/// `get_by_id` is a raw lookup and may cross tenants — single-record
/// access paths tenant-check the result through the record guard.
/// `query` scopes to a tenant and applies a compiled [`Filter`] rendered
/// into the backend's native query language.
pub trait RecordStore<R: OwnedRecord>: Send + Sync {
    fn create(&self, record: R) -> impl Future<Output = VantageResult<R>> + Send;

    fn get_by_id(&self, id: Uuid) -> impl Future<Output = VantageResult<Option<R>>> + Send;

    fn query(
        &self,
        tenant_id: Uuid,
        filter: &Filter,
    ) -> impl Future<Output = VantageResult<Vec<R>>> + Send;

    /// Mark a record deleted, stamping `deleted_by`/`deleted_at`. The
    /// record stays in storage and is recoverable via [`Self::restore`].
    fn soft_delete(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        deleted_by: Uuid,
    ) -> impl Future<Output = VantageResult<()>> + Send;

    fn restore(
        &self,
        tenant_id: Uuid,
        id: Uuid,
        restored_by: Uuid,
    ) -> impl Future<Output = VantageResult<()>> + Send;

    /// Physical removal. Callers gate this to Admin.
    fn hard_delete(
        &self,
        tenant_id: Uuid,
        id: Uuid,
    ) -> impl Future<Output = VantageResult<()>> + Send;
}
