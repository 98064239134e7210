//! Deal domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::record::OwnedRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Deal {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub deal_owner: Uuid,
    pub name: String,
    pub amount: f64,
    /// Pipeline stage, stored verbatim (tenant configurable).
    pub stage: String,
    pub close_date: Option<DateTime<Utc>>,
    pub is_deleted: bool,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub deleted_by: Option<Uuid>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OwnedRecord for Deal {
    const TABLE: &'static str = "deal";
    const OWNER_FIELD: &'static str = "deal_owner";

    fn id(&self) -> Uuid {
        self.id
    }

    fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }

    fn owner(&self) -> Uuid {
        self.deal_owner
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.name.as_str(), self.stage.as_str()]
    }
}
