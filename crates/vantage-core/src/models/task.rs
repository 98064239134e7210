//! Task domain model.
//!
//! Named `TaskItem` to avoid colliding with async task vocabulary at call
//! sites; the storage table is still `task`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::record::OwnedRecord;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskItem {
    pub id: Uuid,
    pub tenant_id: Uuid,
    /// Owner attribute for tasks — the assignee, not the creator.
    pub assigned_to: Uuid,
    pub subject: String,
    pub status: String,
    pub priority: String,
    pub due_date: Option<DateTime<Utc>>,
    pub is_deleted: bool,
    pub created_by: Uuid,
    pub updated_by: Uuid,
    pub deleted_by: Option<Uuid>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OwnedRecord for TaskItem {
    const TABLE: &'static str = "task";
    const OWNER_FIELD: &'static str = "assigned_to";

    fn id(&self) -> Uuid {
        self.id
    }

    fn tenant_id(&self) -> Uuid {
        self.tenant_id
    }

    fn owner(&self) -> Uuid {
        self.assigned_to
    }

    fn is_deleted(&self) -> bool {
        self.is_deleted
    }

    fn search_text(&self) -> Vec<&str> {
        vec![self.subject.as_str()]
    }
}
