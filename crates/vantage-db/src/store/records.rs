//! Generic SurrealDB implementation of [`RecordStore`].
//!
//! One implementation covers every owned entity. The per-entity part —
//! the DB-side row types and their conversions — is stamped out in
//! [`super::rows`]; everything here is written against the
//! [`SurrealOwnedRecord`] bridge trait.

use std::marker::PhantomData;

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;
use vantage_core::error::VantageResult;
use vantage_core::filter::Filter;
use vantage_core::record::OwnedRecord;
use vantage_core::repository::RecordStore;

use crate::error::DbError;
use crate::render::{BindValue, render_filter};

/// Bridge between a domain record and its SurrealDB row types.
///
/// `Row` carries the stored fields (UUIDs as strings); `RowWithId`
/// additionally carries the record id selected via `meta::id(id)`.
pub trait SurrealOwnedRecord: OwnedRecord + Sized {
    type Row: SurrealValue + Send + Sync + 'static;
    type RowWithId: SurrealValue + Send + Sync + 'static;

    fn from_row(id: Uuid, row: Self::Row) -> Result<Self, DbError>;
    fn from_row_with_id(row: Self::RowWithId) -> Result<Self, DbError>;
    fn to_row(&self) -> Self::Row;
}

/// SurrealDB record store for one owned entity type.
pub struct SurrealRecordStore<C: Connection, R: SurrealOwnedRecord> {
    db: Surreal<C>,
    _record: PhantomData<fn() -> R>,
}

impl<C: Connection, R: SurrealOwnedRecord> Clone for SurrealRecordStore<C, R> {
    fn clone(&self) -> Self {
        Self {
            db: self.db.clone(),
            _record: PhantomData,
        }
    }
}

impl<C: Connection, R: SurrealOwnedRecord> SurrealRecordStore<C, R> {
    pub fn new(db: Surreal<C>) -> Self {
        Self {
            db,
            _record: PhantomData,
        }
    }
}

impl<C: Connection, R: SurrealOwnedRecord> RecordStore<R> for SurrealRecordStore<C, R> {
    async fn create(&self, record: R) -> VantageResult<R> {
        let id = record.id();
        let id_str = id.to_string();
        let row = record.to_row();

        let result = self
            .db
            .query(format!(
                "CREATE type::record('{}', $id) CONTENT $data",
                R::TABLE
            ))
            .bind(("id", id_str.clone()))
            .bind(("data", row))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<R::Row> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: R::TABLE.into(),
            id: id_str,
        })?;

        Ok(R::from_row(id, row)?)
    }

    async fn get_by_id(&self, id: Uuid) -> VantageResult<Option<R>> {
        let mut result = self
            .db
            .query(format!("SELECT * FROM type::record('{}', $id)", R::TABLE))
            .bind(("id", id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<R::Row> = result.take(0).map_err(DbError::from)?;
        match rows.into_iter().next() {
            Some(row) => Ok(Some(R::from_row(id, row)?)),
            None => Ok(None),
        }
    }

    async fn query(&self, tenant_id: Uuid, filter: &Filter) -> VantageResult<Vec<R>> {
        let (clause, binds) = render_filter(filter);

        let sql = format!(
            "SELECT meta::id(id) AS record_id, * FROM {} \
             WHERE tenant_id = $tenant_id AND {clause} \
             ORDER BY created_at ASC",
            R::TABLE
        );

        let mut query = self.db.query(sql).bind(("tenant_id", tenant_id.to_string()));
        for (param, value) in binds {
            query = match value {
                BindValue::Str(v) => query.bind((param, v)),
                BindValue::Bool(v) => query.bind((param, v)),
                BindValue::StrList(v) => query.bind((param, v)),
            };
        }

        let mut result = query.await.map_err(DbError::from)?;
        let rows: Vec<R::RowWithId> = result.take(0).map_err(DbError::from)?;

        let records = rows
            .into_iter()
            .map(R::from_row_with_id)
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(records)
    }

    async fn soft_delete(&self, tenant_id: Uuid, id: Uuid, deleted_by: Uuid) -> VantageResult<()> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(format!(
                "UPDATE type::record('{}', $id) SET \
                 is_deleted = true, \
                 deleted_by = $actor, deleted_at = time::now(), \
                 updated_by = $actor, updated_at = time::now() \
                 WHERE tenant_id = $tenant_id",
                R::TABLE
            ))
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("actor", deleted_by.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;
        let rows: Vec<R::Row> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: R::TABLE.into(),
                id: id_str,
            }
            .into());
        }

        Ok(())
    }

    async fn restore(&self, tenant_id: Uuid, id: Uuid, restored_by: Uuid) -> VantageResult<()> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(format!(
                "UPDATE type::record('{}', $id) SET \
                 is_deleted = false, \
                 deleted_by = NONE, deleted_at = NONE, \
                 updated_by = $actor, updated_at = time::now() \
                 WHERE tenant_id = $tenant_id",
                R::TABLE
            ))
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("actor", restored_by.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;
        let rows: Vec<R::Row> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: R::TABLE.into(),
                id: id_str,
            }
            .into());
        }

        Ok(())
    }

    async fn hard_delete(&self, tenant_id: Uuid, id: Uuid) -> VantageResult<()> {
        self.db
            .query(format!(
                "DELETE type::record('{}', $id) WHERE tenant_id = $tenant_id",
                R::TABLE
            ))
            .bind(("id", id.to_string()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        Ok(())
    }
}
