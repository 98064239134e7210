//! Integration tests for the record access service, using in-memory
//! collaborator fakes.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;
use vantage_core::error::{VantageError, VantageResult};
use vantage_core::filter::Filter;
use vantage_core::models::actor::Actor;
use vantage_core::models::lead::Lead;
use vantage_core::models::role::Role;
use vantage_core::models::subsidiary::Subsidiary;
use vantage_core::record::OwnedRecord;
use vantage_core::repository::{DirectoryRepository, RecordStore};
use vantage_rbac::compiler::OwnershipFilterCompiler;
use vantage_rbac::entities::{lead_service, subsidiary_service};
use vantage_rbac::guard::RecordAccessGuard;
use vantage_rbac::policy::AccessPolicy;

// ---------------------------------------------------------------------
// In-memory fakes
// ---------------------------------------------------------------------

/// Soft-delete mutation hook the generic in-memory store needs.
trait MutableRecord: OwnedRecord + Clone {
    fn set_deleted(&mut self, deleted: bool, by: Option<Uuid>);
}

impl MutableRecord for Lead {
    fn set_deleted(&mut self, deleted: bool, by: Option<Uuid>) {
        self.is_deleted = deleted;
        self.deleted_by = by;
        self.deleted_at = if deleted { Some(Utc::now()) } else { None };
    }
}

impl MutableRecord for Subsidiary {
    fn set_deleted(&mut self, deleted: bool, by: Option<Uuid>) {
        self.is_deleted = deleted;
        self.deleted_by = by;
        self.deleted_at = if deleted { Some(Utc::now()) } else { None };
    }
}

#[derive(Clone)]
struct MemStore<R> {
    records: Arc<Mutex<Vec<R>>>,
    fail_queries: bool,
}

impl<R> MemStore<R> {
    fn new(records: Vec<R>) -> Self {
        Self {
            records: Arc::new(Mutex::new(records)),
            fail_queries: false,
        }
    }

    fn failing() -> Self {
        Self {
            records: Arc::new(Mutex::new(Vec::new())),
            fail_queries: true,
        }
    }
}

impl<R: MutableRecord> RecordStore<R> for MemStore<R> {
    async fn create(&self, record: R) -> VantageResult<R> {
        self.records.lock().unwrap().push(record.clone());
        Ok(record)
    }

    async fn get_by_id(&self, id: Uuid) -> VantageResult<Option<R>> {
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id() == id)
            .cloned())
    }

    async fn query(&self, tenant_id: Uuid, filter: &Filter) -> VantageResult<Vec<R>> {
        if self.fail_queries {
            return Err(VantageError::Database("storage offline".into()));
        }
        Ok(self
            .records
            .lock()
            .unwrap()
            .iter()
            .filter(|r| r.tenant_id() == tenant_id && filter.matches(*r))
            .cloned()
            .collect())
    }

    async fn soft_delete(&self, tenant_id: Uuid, id: Uuid, deleted_by: Uuid) -> VantageResult<()> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id() == id && r.tenant_id() == tenant_id)
            .ok_or_else(|| VantageError::NotFound {
                entity: R::TABLE.into(),
                id: id.to_string(),
            })?;
        record.set_deleted(true, Some(deleted_by));
        Ok(())
    }

    async fn restore(&self, tenant_id: Uuid, id: Uuid, _restored_by: Uuid) -> VantageResult<()> {
        let mut records = self.records.lock().unwrap();
        let record = records
            .iter_mut()
            .find(|r| r.id() == id && r.tenant_id() == tenant_id)
            .ok_or_else(|| VantageError::NotFound {
                entity: R::TABLE.into(),
                id: id.to_string(),
            })?;
        record.set_deleted(false, None);
        Ok(())
    }

    async fn hard_delete(&self, tenant_id: Uuid, id: Uuid) -> VantageResult<()> {
        self.records
            .lock()
            .unwrap()
            .retain(|r| !(r.id() == id && r.tenant_id() == tenant_id));
        Ok(())
    }
}

#[derive(Clone, Default)]
struct MemDirectory {
    reports: Arc<Mutex<HashMap<Uuid, Vec<Uuid>>>>,
    fail: bool,
}

impl MemDirectory {
    fn with_reports(manager_id: Uuid, reports: Vec<Uuid>) -> Self {
        let dir = Self::default();
        dir.reports.lock().unwrap().insert(manager_id, reports);
        dir
    }

    fn failing() -> Self {
        Self {
            reports: Arc::new(Mutex::new(HashMap::new())),
            fail: true,
        }
    }
}

impl DirectoryRepository for MemDirectory {
    async fn find_reports(&self, manager_id: Uuid, _tenant_id: Uuid) -> VantageResult<Vec<Uuid>> {
        if self.fail {
            return Err(VantageError::Database("directory offline".into()));
        }
        Ok(self
            .reports
            .lock()
            .unwrap()
            .get(&manager_id)
            .cloned()
            .unwrap_or_default())
    }
}

// ---------------------------------------------------------------------
// Fixtures
// ---------------------------------------------------------------------

fn lead(tenant_id: Uuid, owner: Uuid, first: &str, last: &str, company: &str) -> Lead {
    let now = Utc::now();
    Lead {
        id: Uuid::new_v4(),
        tenant_id,
        lead_owner: owner,
        first_name: first.into(),
        last_name: last.into(),
        email: format!("{}@example.com", first.to_lowercase()),
        phone: None,
        company: Some(company.into()),
        status: "New".into(),
        source: "Web".into(),
        is_deleted: false,
        created_by: owner,
        updated_by: owner,
        deleted_by: None,
        deleted_at: None,
        created_at: now,
        updated_at: now,
    }
}

fn subsidiary(tenant_id: Uuid, created_by: Uuid, name: &str) -> Subsidiary {
    let now = Utc::now();
    Subsidiary {
        id: Uuid::new_v4(),
        tenant_id,
        name: name.into(),
        region: "EMEA".into(),
        is_deleted: false,
        created_by,
        updated_by: created_by,
        deleted_by: None,
        deleted_at: None,
        created_at: now,
        updated_at: now,
    }
}

/// The reference scenario: tenant T1 with admin A, manager M, rep R1
/// reporting to M, unrelated rep R2; one live lead per user plus a
/// soft-deleted lead owned by R1.
struct Scenario {
    t1: Uuid,
    t2: Uuid,
    admin: Actor,
    manager: Actor,
    rep1: Actor,
    rep2: Actor,
    leads: Vec<Lead>,
    directory: MemDirectory,
}

fn scenario() -> Scenario {
    let t1 = Uuid::new_v4();
    let t2 = Uuid::new_v4();

    let admin = Actor::new(Uuid::new_v4(), t1, Role::Admin);
    let manager = Actor::new(Uuid::new_v4(), t1, Role::SalesManager);
    let rep1 = Actor::new(Uuid::new_v4(), t1, Role::SalesRep);
    let rep2 = Actor::new(Uuid::new_v4(), t1, Role::SalesRep);

    let mut deleted = lead(t1, rep1.user_id, "Dora", "Deleted", "Gone Inc");
    deleted.is_deleted = true;
    deleted.deleted_by = Some(rep1.user_id);
    deleted.deleted_at = Some(Utc::now());

    let leads = vec![
        lead(t1, admin.user_id, "Alice", "Austin", "Acme"),
        lead(t1, manager.user_id, "Mark", "Mills", "Macro Corp"),
        lead(t1, rep1.user_id, "Rita", "Reyes", "Retail Co"),
        lead(t1, rep2.user_id, "Rob", "Ruiz", "Retail Co"),
        deleted,
    ];

    let directory = MemDirectory::with_reports(manager.user_id, vec![rep1.user_id]);

    Scenario {
        t1,
        t2,
        admin,
        manager,
        rep1,
        rep2,
        leads,
        directory,
    }
}

// ---------------------------------------------------------------------
// Visibility
// ---------------------------------------------------------------------

#[tokio::test]
async fn scenario_visibility_per_role() {
    let s = scenario();
    let svc = lead_service(
        MemStore::new(s.leads.clone()),
        s.directory.clone(),
        Arc::new(AccessPolicy::standard()),
    );

    assert_eq!(svc.list_for_user(&s.admin).await.unwrap().len(), 4);
    assert_eq!(svc.list_for_user(&s.manager).await.unwrap().len(), 2);
    assert_eq!(svc.list_for_user(&s.rep1).await.unwrap().len(), 1);
    assert_eq!(svc.list_for_user(&s.rep2).await.unwrap().len(), 1);

    let t2_admin = Actor::new(Uuid::new_v4(), s.t2, Role::Admin);
    assert!(svc.list_for_user(&t2_admin).await.unwrap().is_empty());
}

#[tokio::test]
async fn include_deleted_lifts_only_the_liveness_clause() {
    let s = scenario();
    let svc = lead_service(
        MemStore::new(s.leads.clone()),
        s.directory.clone(),
        Arc::new(AccessPolicy::standard()),
    );

    let all = svc
        .list_for_user_with_deleted(&s.admin, true)
        .await
        .unwrap();
    assert_eq!(all.len(), 5);

    // Ownership still applies: rep2 gains nothing from the flag.
    let rep2_all = svc.list_for_user_with_deleted(&s.rep2, true).await.unwrap();
    assert_eq!(rep2_all.len(), 1);
}

#[tokio::test]
async fn manager_sees_exactly_own_and_subordinate_records() {
    let s = scenario();
    let svc = lead_service(
        MemStore::new(s.leads.clone()),
        s.directory.clone(),
        Arc::new(AccessPolicy::standard()),
    );

    let visible = svc.list_for_user(&s.manager).await.unwrap();
    let owners: Vec<Uuid> = visible.iter().map(|l| l.lead_owner).collect();
    assert!(owners.contains(&s.manager.user_id));
    assert!(owners.contains(&s.rep1.user_id));
    assert!(!owners.contains(&s.rep2.user_id));
    assert!(!owners.contains(&s.admin.user_id));
}

#[tokio::test]
async fn unknown_role_sees_nothing() {
    let s = scenario();
    let svc = lead_service(
        MemStore::new(s.leads.clone()),
        s.directory.clone(),
        Arc::new(AccessPolicy::standard()),
    );

    let ghost = Actor::from_claims(s.admin.user_id, s.t1, "superuser");
    assert!(svc.list_for_user(&ghost).await.unwrap().is_empty());
    assert!(
        svc.get_by_id_for_user(s.leads[0].id, &ghost)
            .await
            .unwrap()
            .is_none()
    );
}

// ---------------------------------------------------------------------
// Single-record fetches
// ---------------------------------------------------------------------

#[tokio::test]
async fn denial_is_indistinguishable_from_absence() {
    let s = scenario();
    let svc = lead_service(
        MemStore::new(s.leads.clone()),
        s.directory.clone(),
        Arc::new(AccessPolicy::standard()),
    );

    let rep1_lead_id = s.leads[2].id;

    // Exists but not rep2's: None, not an error.
    assert!(
        svc.get_by_id_for_user(rep1_lead_id, &s.rep2)
            .await
            .unwrap()
            .is_none()
    );
    // Does not exist at all: also None.
    assert!(
        svc.get_by_id_for_user(Uuid::new_v4(), &s.rep2)
            .await
            .unwrap()
            .is_none()
    );
    // The owner does see it.
    assert!(
        svc.get_by_id_for_user(rep1_lead_id, &s.rep1)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn get_by_id_never_crosses_tenants() {
    let s = scenario();
    let svc = lead_service(
        MemStore::new(s.leads.clone()),
        s.directory.clone(),
        Arc::new(AccessPolicy::standard()),
    );

    let t2_admin = Actor::new(Uuid::new_v4(), s.t2, Role::Admin);
    assert!(
        svc.get_by_id_for_user(s.leads[0].id, &t2_admin)
            .await
            .unwrap()
            .is_none()
    );
}

#[tokio::test]
async fn deleted_records_are_not_fetchable() {
    let s = scenario();
    let svc = lead_service(
        MemStore::new(s.leads.clone()),
        s.directory.clone(),
        Arc::new(AccessPolicy::standard()),
    );

    let deleted_id = s.leads[4].id;
    assert!(
        svc.get_by_id_for_user(deleted_id, &s.admin)
            .await
            .unwrap()
            .is_none()
    );
}

// ---------------------------------------------------------------------
// List by owner
// ---------------------------------------------------------------------

#[tokio::test]
async fn list_by_owner_honors_the_reporting_line() {
    let s = scenario();
    let svc = lead_service(
        MemStore::new(s.leads.clone()),
        s.directory.clone(),
        Arc::new(AccessPolicy::standard()),
    );

    // Manager may target a subordinate's records.
    let of_rep1 = svc
        .list_by_owner_for_user(s.rep1.user_id, &s.manager)
        .await
        .unwrap();
    assert_eq!(of_rep1.len(), 1);

    // But not an unrelated rep's — empty, not an error.
    assert!(
        svc.list_by_owner_for_user(s.rep2.user_id, &s.manager)
            .await
            .unwrap()
            .is_empty()
    );

    // A rep may only target themself.
    assert_eq!(
        svc.list_by_owner_for_user(s.rep1.user_id, &s.rep1)
            .await
            .unwrap()
            .len(),
        1
    );
    assert!(
        svc.list_by_owner_for_user(s.rep2.user_id, &s.rep1)
            .await
            .unwrap()
            .is_empty()
    );

    // Admin may target anyone in tenant.
    assert_eq!(
        svc.list_by_owner_for_user(s.rep2.user_id, &s.admin)
            .await
            .unwrap()
            .len(),
        1
    );
}

// ---------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------

#[tokio::test]
async fn search_is_a_case_insensitive_postfilter() {
    let s = scenario();
    let svc = lead_service(
        MemStore::new(s.leads.clone()),
        s.directory.clone(),
        Arc::new(AccessPolicy::standard()),
    );

    // "retail" matches the company on both rep leads, but the manager
    // only ever sees the accessible one.
    let hits = svc.search_for_user(&s.manager, "RETAIL").await.unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].lead_owner, s.rep1.user_id);

    // Admin sees both rep leads for the same term.
    let hits = svc.search_for_user(&s.admin, "retail").await.unwrap();
    assert_eq!(hits.len(), 2);

    // No match.
    assert!(
        svc.search_for_user(&s.admin, "zzz-no-such")
            .await
            .unwrap()
            .is_empty()
    );

    // Blank term returns the full accessible set.
    assert_eq!(svc.search_for_user(&s.admin, "  ").await.unwrap().len(), 4);
}

// ---------------------------------------------------------------------
// Failure semantics
// ---------------------------------------------------------------------

#[tokio::test]
async fn directory_failure_degrades_manager_to_self_only() {
    let s = scenario();
    let svc = lead_service(
        MemStore::new(s.leads.clone()),
        MemDirectory::failing(),
        Arc::new(AccessPolicy::standard()),
    );

    let visible = svc.list_for_user(&s.manager).await.unwrap();
    assert_eq!(visible.len(), 1);
    assert_eq!(visible[0].lead_owner, s.manager.user_id);
}

#[tokio::test]
async fn storage_failure_propagates_as_an_error() {
    let s = scenario();
    let svc = lead_service(
        MemStore::<Lead>::failing(),
        s.directory.clone(),
        Arc::new(AccessPolicy::standard()),
    );

    let result = svc.list_for_user(&s.admin).await;
    assert!(matches!(result, Err(VantageError::Database(_))));
}

// ---------------------------------------------------------------------
// Policy gating
// ---------------------------------------------------------------------

#[tokio::test]
async fn reps_are_policy_blocked_from_organizational_entities() {
    let s = scenario();
    let store = MemStore::new(vec![subsidiary(s.t1, s.rep1.user_id, "North Branch")]);
    let svc = subsidiary_service(store, s.directory.clone(), Arc::new(AccessPolicy::standard()));

    // The rep owns the record, but the capability table never lets the
    // ownership check run.
    assert!(svc.list_for_user(&s.rep1).await.unwrap().is_empty());

    // The manager can view it (created by a subordinate) but not create.
    assert_eq!(svc.list_for_user(&s.manager).await.unwrap().len(), 1);
    let result = svc
        .create_for_user(&s.manager, subsidiary(s.t1, s.manager.user_id, "South Branch"))
        .await;
    assert!(matches!(result, Err(VantageError::PermissionDenied { .. })));
}

// ---------------------------------------------------------------------
// Filter/guard equivalence
// ---------------------------------------------------------------------

#[tokio::test]
async fn guard_and_compiled_filter_always_agree() {
    let s = scenario();
    let compiler = OwnershipFilterCompiler::new(s.directory.clone());
    let guard = RecordAccessGuard::new(s.directory.clone());

    let mut records = s.leads.clone();
    records.push(lead(s.t2, Uuid::new_v4(), "Tess", "Tenant", "Other Org"));

    let actors = [
        s.admin.clone(),
        s.manager.clone(),
        s.rep1.clone(),
        s.rep2.clone(),
        Actor::from_claims(s.admin.user_id, s.t1, "superuser"),
        Actor::new(Uuid::new_v4(), s.t2, Role::Admin),
    ];

    for actor in &actors {
        let filter = compiler.compile::<Lead>(actor, false).await;
        for record in &records {
            assert_eq!(
                guard.can_access(record, actor).await,
                filter.matches(record),
                "guard and filter disagree for actor {:?} on lead owned by {}",
                actor.role,
                record.lead_owner,
            );
        }
    }
}

// ---------------------------------------------------------------------
// Lifecycle writes
// ---------------------------------------------------------------------

#[tokio::test]
async fn create_enforces_policy_and_tenant() {
    let s = scenario();
    let svc = lead_service(
        MemStore::new(vec![]),
        s.directory.clone(),
        Arc::new(AccessPolicy::standard()),
    );

    // Rep creates in own tenant.
    let created = svc
        .create_for_user(&s.rep1, lead(s.t1, s.rep1.user_id, "New", "Lead", "Acme"))
        .await
        .unwrap();
    assert_eq!(created.tenant_id, s.t1);

    // Wrong tenant on the record body is refused outright.
    let result = svc
        .create_for_user(&s.rep1, lead(s.t2, s.rep1.user_id, "Bad", "Tenant", "Acme"))
        .await;
    assert!(matches!(result, Err(VantageError::TenantContext)));

    // Unknown role cannot create at all.
    let ghost = Actor::from_claims(Uuid::new_v4(), s.t1, "intern");
    let result = svc
        .create_for_user(&ghost, lead(s.t1, ghost.user_id, "No", "Role", "Acme"))
        .await;
    assert!(matches!(result, Err(VantageError::PermissionDenied { .. })));
}

#[tokio::test]
async fn soft_delete_restore_and_hard_delete_flow() {
    let s = scenario();
    let store = MemStore::new(s.leads.clone());
    let svc = lead_service(
        store.clone(),
        s.directory.clone(),
        Arc::new(AccessPolicy::standard()),
    );

    let own_id = s.leads[2].id; // rep1's live lead

    // Rep cannot delete someone else's record — reported as NotFound,
    // exactly like a missing id.
    let result = svc.soft_delete_for_user(&s.rep2, own_id).await;
    assert!(matches!(result, Err(VantageError::NotFound { .. })));

    // Owner deletes their own.
    svc.soft_delete_for_user(&s.rep1, own_id).await.unwrap();
    assert!(svc.list_for_user(&s.rep1).await.unwrap().is_empty());

    // Restore is admin-only.
    let result = svc.restore_for_user(&s.rep1, own_id).await;
    assert!(matches!(result, Err(VantageError::PermissionDenied { .. })));

    svc.restore_for_user(&s.admin, own_id).await.unwrap();
    assert_eq!(svc.list_for_user(&s.rep1).await.unwrap().len(), 1);

    // Hard delete is admin-only and physical.
    let result = svc.hard_delete_for_user(&s.manager, own_id).await;
    assert!(matches!(result, Err(VantageError::PermissionDenied { .. })));

    svc.hard_delete_for_user(&s.admin, own_id).await.unwrap();
    let all = svc
        .list_for_user_with_deleted(&s.admin, true)
        .await
        .unwrap();
    assert!(all.iter().all(|l| l.id != own_id));
}
