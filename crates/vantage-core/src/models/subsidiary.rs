//! Subsidiary domain model (organizational entity).

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::record::OwnedRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subsidiary {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub name: String,
    pub region: String,
    pub is_deleted: bool,
    /// Organizational records have no sales owner; the creator is the
    /// owner attribute for access purposes.
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub deleted_by: Option<Uuid>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OwnedRecord for Subsidiary {
    const TABLE: &'static str = "subsidiary";
    const OWNER_FIELD: &'static str = "created_by";

    fn id(&self) -> Uuid {
        self.id
    }

    fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }

    fn owner(&self) -> Uuid {
        self.created_by
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.region.as_str()]
    }
}
