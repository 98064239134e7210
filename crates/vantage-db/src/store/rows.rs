//! DB-side row types for every owned entity.
//!
//! UUIDs are stored as strings and parsed at this boundary. The shared
//! shape (tenant, owner, soft-delete marker, audit stamps) is identical
//! across entities, so the row pair and its conversions are stamped by
//! `owned_rows!` rather than hand-copied eight times.

use chrono::{DateTime, Utc};
use surrealdb_types::SurrealValue;
use uuid::Uuid;
use vantage_core::models::contact::Contact;
use vantage_core::models::deal::Deal;
use vantage_core::models::dealer::Dealer;
use vantage_core::models::lead::Lead;
use vantage_core::models::product::Product;
use vantage_core::models::quote::Quote;
use vantage_core::models::subsidiary::Subsidiary;
use vantage_core::models::task::TaskItem;

use crate::error::DbError;
use crate::store::records::SurrealOwnedRecord;

pub(crate) fn parse_uuid(value: &str, field: &str) -> Result<Uuid, DbError> {
    Uuid::parse_str(value).map_err(|e| DbError::Decode(format!("invalid UUID in {field}: {e}")))
}

/// Stamp the row pair and [`SurrealOwnedRecord`] bridge for one entity.
///
/// The owner attribute keeps its per-entity name in storage; payload
/// fields must exist on the domain struct under the same names and
/// types.
macro_rules! owned_rows {
    (
        $domain:ty => $row:ident, $row_with_id:ident;
        owner: $owner:ident;
        fields: { $($field:ident: $ty:ty),* $(,)? }
    ) => {
        /// DB-side row for queries where the UUID is already known.
        #[derive(Debug, SurrealValue)]
        pub struct $row {
            pub tenant_id: String,
            pub $owner: String,
            $(pub $field: $ty,)*
            pub is_deleted: bool,
            pub created_by: String,
            pub updated_by: String,
            pub deleted_by: Option<String>,
            pub deleted_at: Option<DateTime<Utc>>,
            pub created_at: DateTime<Utc>,
            pub updated_at: DateTime<Utc>,
        }

        /// DB-side row that includes the record ID via `meta::id(id)`.
        #[derive(Debug, SurrealValue)]
        pub struct $row_with_id {
            pub record_id: String,
            pub tenant_id: String,
            pub $owner: String,
            $(pub $field: $ty,)*
            pub is_deleted: bool,
            pub created_by: String,
            pub updated_by: String,
            pub deleted_by: Option<String>,
            pub deleted_at: Option<DateTime<Utc>>,
            pub created_at: DateTime<Utc>,
            pub updated_at: DateTime<Utc>,
        }

        impl SurrealOwnedRecord for $domain {
            type Row = $row;
            type RowWithId = $row_with_id;

            fn from_row(id: Uuid, row: $row) -> Result<Self, DbError> {
                Ok(Self {
                    id,
                    tenant_id: parse_uuid(&row.tenant_id, "tenant_id")?,
                    $owner: parse_uuid(&row.$owner, stringify!($owner))?,
                    $($field: row.$field,)*
                    is_deleted: row.is_deleted,
                    created_by: parse_uuid(&row.created_by, "created_by")?,
                    updated_by: parse_uuid(&row.updated_by, "updated_by")?,
                    deleted_by: match &row.deleted_by {
                        Some(v) => Some(parse_uuid(v, "deleted_by")?),
                        None => None,
                    },
                    deleted_at: row.deleted_at,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                })
            }

            fn from_row_with_id(row: $row_with_id) -> Result<Self, DbError> {
                Ok(Self {
                    id: parse_uuid(&row.record_id, "record_id")?,
                    tenant_id: parse_uuid(&row.tenant_id, "tenant_id")?,
                    $owner: parse_uuid(&row.$owner, stringify!($owner))?,
                    $($field: row.$field,)*
                    is_deleted: row.is_deleted,
                    created_by: parse_uuid(&row.created_by, "created_by")?,
                    updated_by: parse_uuid(&row.updated_by, "updated_by")?,
                    deleted_by: match &row.deleted_by {
                        Some(v) => Some(parse_uuid(v, "deleted_by")?),
                        None => None,
                    },
                    deleted_at: row.deleted_at,
                    created_at: row.created_at,
                    updated_at: row.updated_at,
                })
            }

            fn to_row(&self) -> $row {
                $row {
                    tenant_id: self.tenant_id.to_string(),
                    $owner: self.$owner.to_string(),
                    $($field: self.$field.clone(),)*
                    is_deleted: self.is_deleted,
                    created_by: self.created_by.to_string(),
                    updated_by: self.updated_by.to_string(),
                    deleted_by: self.deleted_by.map(|v| v.to_string()),
                    deleted_at: self.deleted_at,
                    created_at: self.created_at,
                    updated_at: self.updated_at,
                }
            }
        }
    };
}

owned_rows! {
    Lead => LeadRow, LeadRowWithId;
    owner: lead_owner;
    fields: {
        first_name: String,
        last_name: String,
        email: String,
        phone: Option<String>,
        company: Option<String>,
        status: String,
        source: String,
    }
}

owned_rows! {
    Contact => ContactRow, ContactRowWithId;
    owner: contact_owner;
    fields: {
        first_name: String,
        last_name: String,
        email: String,
        phone: Option<String>,
        company: Option<String>,
        title: Option<String>,
    }
}

owned_rows! {
    Deal => DealRow, DealRowWithId;
    owner: deal_owner;
    fields: {
        name: String,
        amount: f64,
        stage: String,
        close_date: Option<DateTime<Utc>>,
    }
}

owned_rows! {
    Product => ProductRow, ProductRowWithId;
    owner: product_owner;
    fields: {
        name: String,
        sku: String,
        unit_price: f64,
        active: bool,
    }
}

owned_rows! {
    Quote => QuoteRow, QuoteRowWithId;
    owner: quote_owner;
    fields: {
        quote_number: String,
        subject: String,
        total: f64,
        status: String,
        valid_until: Option<DateTime<Utc>>,
    }
}

owned_rows! {
    TaskItem => TaskRow, TaskRowWithId;
    owner: assigned_to;
    fields: {
        subject: String,
        status: String,
        priority: String,
        due_date: Option<DateTime<Utc>>,
    }
}

// Organizational entities are owned by their creator: `created_by` is
// both the audit stamp and the owner attribute, so their rows are
// written out rather than stamped (the macro would emit the field
// twice).

/// DB-side row for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
pub struct SubsidiaryRow {
    pub tenant_id: String,
    pub name: String,
    pub region: String,
    pub is_deleted: bool,
    pub created_by: String,
    pub updated_by: String,
    pub deleted_by: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DB-side row that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
pub struct SubsidiaryRowWithId {
    pub record_id: String,
    pub tenant_id: String,
    pub name: String,
    pub region: String,
    pub is_deleted: bool,
    pub created_by: String,
    pub updated_by: String,
    pub deleted_by: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SurrealOwnedRecord for Subsidiary {
    type Row = SubsidiaryRow;
    type RowWithId = SubsidiaryRowWithId;

    fn from_row(id: Uuid, row: SubsidiaryRow) -> Result<Self, DbError> {
        Ok(Self {
            id,
            tenant_id: parse_uuid(&row.tenant_id, "tenant_id")?,
            name: row.name,
            region: row.region,
            is_deleted: row.is_deleted,
            created_by: parse_uuid(&row.created_by, "created_by")?,
            updated_by: parse_uuid(&row.updated_by, "updated_by")?,
            deleted_by: match &row.deleted_by {
                Some(v) => Some(parse_uuid(v, "deleted_by")?),
                None => None,
            },
            deleted_at: row.deleted_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    fn from_row_with_id(row: SubsidiaryRowWithId) -> Result<Self, DbError> {
        Ok(Self {
            id: parse_uuid(&row.record_id, "record_id")?,
            tenant_id: parse_uuid(&row.tenant_id, "tenant_id")?,
            name: row.name,
            region: row.region,
            is_deleted: row.is_deleted,
            created_by: parse_uuid(&row.created_by, "created_by")?,
            updated_by: parse_uuid(&row.updated_by, "updated_by")?,
            deleted_by: match &row.deleted_by {
                Some(v) => Some(parse_uuid(v, "deleted_by")?),
                None => None,
            },
            deleted_at: row.deleted_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    fn to_row(&self) -> SubsidiaryRow {
        SubsidiaryRow {
            tenant_id: self.tenant_id.to_string(),
            name: self.name.clone(),
            region: self.region.clone(),
            is_deleted: self.is_deleted,
            created_by: self.created_by.to_string(),
            updated_by: self.updated_by.to_string(),
            deleted_by: self.deleted_by.map(|v| v.to_string()),
            deleted_at: self.deleted_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}

/// DB-side row for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
pub struct DealerRow {
    pub tenant_id: String,
    pub name: String,
    pub email: String,
    pub territory: String,
    pub is_deleted: bool,
    pub created_by: String,
    pub updated_by: String,
    pub deleted_by: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// DB-side row that includes the record ID via `meta::id(id)`.
#[derive(Debug, SurrealValue)]
pub struct DealerRowWithId {
    pub record_id: String,
    pub tenant_id: String,
    pub name: String,
    pub email: String,
    pub territory: String,
    pub is_deleted: bool,
    pub created_by: String,
    pub updated_by: String,
    pub deleted_by: Option<String>,
    pub deleted_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl SurrealOwnedRecord for Dealer {
    type Row = DealerRow;
    type RowWithId = DealerRowWithId;

    fn from_row(id: Uuid, row: DealerRow) -> Result<Self, DbError> {
        Ok(Self {
            id,
            tenant_id: parse_uuid(&row.tenant_id, "tenant_id")?,
            name: row.name,
            email: row.email,
            territory: row.territory,
            is_deleted: row.is_deleted,
            created_by: parse_uuid(&row.created_by, "created_by")?,
            updated_by: parse_uuid(&row.updated_by, "updated_by")?,
            deleted_by: match &row.deleted_by {
                Some(v) => Some(parse_uuid(v, "deleted_by")?),
                None => None,
            },
            deleted_at: row.deleted_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    fn from_row_with_id(row: DealerRowWithId) -> Result<Self, DbError> {
        Ok(Self {
            id: parse_uuid(&row.record_id, "record_id")?,
            tenant_id: parse_uuid(&row.tenant_id, "tenant_id")?,
            name: row.name,
            email: row.email,
            territory: row.territory,
            is_deleted: row.is_deleted,
            created_by: parse_uuid(&row.created_by, "created_by")?,
            updated_by: parse_uuid(&row.updated_by, "updated_by")?,
            deleted_by: match &row.deleted_by {
                Some(v) => Some(parse_uuid(v, "deleted_by")?),
                None => None,
            },
            deleted_at: row.deleted_at,
            created_at: row.created_at,
            updated_at: row.updated_at,
        })
    }

    fn to_row(&self) -> DealerRow {
        DealerRow {
            tenant_id: self.tenant_id.to_string(),
            name: self.name.clone(),
            email: self.email.clone(),
            territory: self.territory.clone(),
            is_deleted: self.is_deleted,
            created_by: self.created_by.to_string(),
            updated_by: self.updated_by.to_string(),
            deleted_by: self.deleted_by.map(|v| v.to_string()),
            deleted_at: self.deleted_at,
            created_at: self.created_at,
            updated_at: self.updated_at,
        }
    }
}
