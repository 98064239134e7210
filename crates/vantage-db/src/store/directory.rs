//! SurrealDB implementation of the user directory.

use chrono::{DateTime, Utc};
use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use uuid::Uuid;
use vantage_core::error::{VantageError, VantageResult};
use vantage_core::models::role::Role;
use vantage_core::models::user::{CreateUser, User};
use vantage_core::repository::{DirectoryRepository, UserDirectory};

use crate::error::DbError;
use crate::store::rows::parse_uuid;

/// Upper bound on reporting-chain walks during cycle checks.
const MAX_REPORTING_DEPTH: usize = 32;

/// DB-side row struct for queries where the UUID is already known.
#[derive(Debug, SurrealValue)]
struct UserRow {
    tenant_id: String,
    email: String,
    name: String,
    role: String,
    reporting_to: Option<String>,
    is_deleted: bool,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Row struct for id-only projections.
#[derive(Debug, SurrealValue)]
struct IdRow {
    record_id: String,
}

impl UserRow {
    fn into_user(self, id: Uuid) -> Result<User, DbError> {
        let role = Role::parse(&self.role)
            .ok_or_else(|| DbError::Decode(format!("unknown role: {}", self.role)))?;
        Ok(User {
            id,
            tenant_id: parse_uuid(&self.tenant_id, "tenant_id")?,
            email: self.email,
            name: self.name,
            role,
            reporting_to: match &self.reporting_to {
                Some(v) => Some(parse_uuid(v, "reporting_to")?),
                None => None,
            },
            is_deleted: self.is_deleted,
            created_at: self.created_at,
            updated_at: self.updated_at,
        })
    }
}

/// SurrealDB implementation of the user directory.
#[derive(Clone)]
pub struct SurrealUserDirectory<C: Connection> {
    db: Surreal<C>,
}

impl<C: Connection> SurrealUserDirectory<C> {
    pub fn new(db: Surreal<C>) -> Self {
        Self { db }
    }

    /// Soft-delete a user. Deactivated users drop out of reporting
    /// lookups immediately.
    pub async fn deactivate_user(&self, tenant_id: Uuid, id: Uuid) -> VantageResult<()> {
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('user', $id) SET \
                 is_deleted = true, updated_at = time::now() \
                 WHERE tenant_id = $tenant_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;
        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        if rows.is_empty() {
            return Err(DbError::NotFound {
                entity: "user".into(),
                id: id_str,
            }
            .into());
        }

        Ok(())
    }

    /// Walk the reporting chain upward from `start`, rejecting a line
    /// that would put `user_id` among its own ancestors.
    async fn ensure_no_cycle(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        start: Uuid,
    ) -> VantageResult<()> {
        let mut current = Some(start);
        let mut depth = 0;

        while let Some(ancestor_id) = current {
            if ancestor_id == user_id {
                return Err(VantageError::Validation {
                    message: "reporting line would create a cycle".into(),
                });
            }
            depth += 1;
            if depth > MAX_REPORTING_DEPTH {
                return Err(VantageError::Validation {
                    message: "reporting chain exceeds maximum depth".into(),
                });
            }

            let ancestor =
                self.get_user(tenant_id, ancestor_id)
                    .await
                    .map_err(|_| VantageError::Validation {
                        message: "reporting_to must reference an existing user in the same tenant"
                            .into(),
                    })?;
            if ancestor.is_deleted {
                return Err(VantageError::Validation {
                    message: "reporting_to must reference an active user".into(),
                });
            }

            current = ancestor.reporting_to;
        }

        Ok(())
    }
}

impl<C: Connection> DirectoryRepository for SurrealUserDirectory<C> {
    async fn find_reports(&self, manager_id: Uuid, tenant_id: Uuid) -> VantageResult<Vec<Uuid>> {
        let mut result = self
            .db
            .query(
                "SELECT meta::id(id) AS record_id FROM user \
                 WHERE tenant_id = $tenant_id \
                 AND reporting_to = $manager_id \
                 AND role = 'SALES_REP' \
                 AND is_deleted = false",
            )
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("manager_id", manager_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<IdRow> = result.take(0).map_err(DbError::from)?;

        let ids = rows
            .into_iter()
            .map(|row| parse_uuid(&row.record_id, "record_id"))
            .collect::<Result<Vec<_>, DbError>>()?;

        Ok(ids)
    }
}

impl<C: Connection> UserDirectory for SurrealUserDirectory<C> {
    async fn create_user(&self, input: CreateUser) -> VantageResult<User> {
        if let Some(manager_id) = input.reporting_to {
            let manager = self
                .get_user(input.tenant_id, manager_id)
                .await
                .map_err(|_| VantageError::Validation {
                    message: "reporting_to must reference an existing user in the same tenant"
                        .into(),
                })?;
            if manager.is_deleted {
                return Err(VantageError::Validation {
                    message: "reporting_to must reference an active user".into(),
                });
            }
        }

        let id = Uuid::new_v4();
        let id_str = id.to_string();

        let result = self
            .db
            .query(
                "CREATE type::record('user', $id) SET \
                 tenant_id = $tenant_id, \
                 email = $email, name = $name, \
                 role = $role, \
                 reporting_to = $reporting_to, \
                 is_deleted = false",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", input.tenant_id.to_string()))
            .bind(("email", input.email))
            .bind(("name", input.name))
            .bind(("role", input.role.as_str().to_string()))
            .bind(("reporting_to", input.reporting_to.map(|v| v.to_string())))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: id_str,
        })?;

        Ok(row.into_user(id)?)
    }

    async fn get_user(&self, tenant_id: Uuid, id: Uuid) -> VantageResult<User> {
        let id_str = id.to_string();

        let mut result = self
            .db
            .query(
                "SELECT * FROM type::record('user', $id) \
                 WHERE tenant_id = $tenant_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .await
            .map_err(DbError::from)?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: id_str,
        })?;

        Ok(row.into_user(id)?)
    }

    async fn set_reporting(
        &self,
        tenant_id: Uuid,
        user_id: Uuid,
        reporting_to: Option<Uuid>,
    ) -> VantageResult<User> {
        if let Some(manager_id) = reporting_to {
            self.ensure_no_cycle(tenant_id, user_id, manager_id).await?;
        }

        let id_str = user_id.to_string();

        let result = self
            .db
            .query(
                "UPDATE type::record('user', $id) SET \
                 reporting_to = $reporting_to, updated_at = time::now() \
                 WHERE tenant_id = $tenant_id",
            )
            .bind(("id", id_str.clone()))
            .bind(("tenant_id", tenant_id.to_string()))
            .bind(("reporting_to", reporting_to.map(|v| v.to_string())))
            .await
            .map_err(DbError::from)?;

        let mut result = result.check().map_err(|e| DbError::Query(e.to_string()))?;

        let rows: Vec<UserRow> = result.take(0).map_err(DbError::from)?;
        let row = rows.into_iter().next().ok_or_else(|| DbError::NotFound {
            entity: "user".into(),
            id: id_str,
        })?;

        Ok(row.into_user(user_id)?)
    }
}
