//! Quote domain model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::record::OwnedRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub quote_owner: Uuid,
    pub quote_number: String,
    pub subject: String,
    pub total: f64,
    pub status: String,
    pub valid_until: Option<DateTime<Utc>>,
    pub is_deleted: bool,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub deleted_by: Option<Uuid>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OwnedRecord for Quote {
    const TABLE: &'static str = "quote";
    const OWNER_FIELD: &'static str = "quote_owner";

    fn id(&self) -> Uuid {
        self.id
    }

    fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }

    fn owner(&self) -> Uuid {
        self.quote_owner
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.quote_number.as_str(), self.subject.as_str()]
    }
}
