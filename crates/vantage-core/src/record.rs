//! The shared shape of owned, tenant-partitioned records.

use uuid::Uuid;

use crate::filter::{DELETED_FIELD, FieldValue, Queryable, TENANT_FIELD};

/// Abstract shape shared by every owned business record.
///
/// Each entity names its own owner attribute (`lead_owner`,
/// `assigned_to`, ...); everything the RBAC engine needs is exposed here
/// so the filter compiler, the record guard, and the generic access
/// service are written exactly once.
pub trait OwnedRecord: Send + Sync {
    /// Storage table the entity lives in.
    const TABLE: &'static str;

    /// Attribute naming the responsible individual-contributor user.
    const OWNER_FIELD: &'static str;

    fn id(&self) -> Uuid;
    fn tenant_id(&self) -> Uuid;
    fn owner(&self) -> Uuid;
    fn is_deleted(&self) -> bool;

    /// The small fixed set of text fields the in-memory search scans.
    fn search_text(&self) -> Vec<&str>;
}

impl<R: OwnedRecord> Queryable for R {
    fn field(&self, name: &str) -> Option<FieldValue> {
        if name == TENANT_FIELD {
            Some(FieldValue::Uuid(self.tenant_id()))
        } else if name == DELETED_FIELD {
            Some(FieldValue::Bool(self.is_deleted()))
        } else if name == R::OWNER_FIELD {
            Some(FieldValue::Uuid(self.owner()))
        } else {
            None
        }
    }
}
