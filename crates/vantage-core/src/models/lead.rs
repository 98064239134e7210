//! Lead domain model.
//!
//! A lead is an unqualified prospect owned by a single sales user. The
//! `lead_owner` attribute drives all RBAC visibility decisions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::record::OwnedRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Lead {
    pub id: Uuid,
    pub tenant_id: Uuid,
    pub lead_owner: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub company: Option<String>,
    /// Pipeline status (`New`, `Contacted`, `Qualified`, ... — tenant
    /// configurable, stored verbatim).
    pub status: String,
    pub source: String,
    pub is_deleted: bool,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub deleted_by: Option<Uuid>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OwnedRecord for Lead {
    const TABLE: &'static str = "lead";
    const OWNER_FIELD: &'static str = "lead_owner";

    fn id(&self) -> Uuid {
        self.id
    }

    fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }

    fn owner(&self) -> Uuid {
        self.lead_owner
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    fn search_text(&self) -> Vec<&str> {
        let mut fields = vec![
            self.first_name.as_str(),
            self.last_name.as_str(),
            self.email.as_str(),
        ];
        if let Some(company) = &self.company {
            fields.push(company.as_str());
        }
        fields
    }
}
