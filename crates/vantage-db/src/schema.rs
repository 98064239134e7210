//! Schema definitions and migration runner for SurrealDB.
//!
//! All table definitions use SCHEMAFULL mode for data integrity.
//! UUIDs are stored as strings. Enums are stored as strings with
//! ASSERT constraints for validation. Every record table carries the
//! tenant partition key, its owner attribute, and the soft-delete
//! marker, indexed together for the access-filter queries.

use surrealdb::{Connection, Surreal};
use surrealdb_types::SurrealValue;
use tracing::info;

use crate::error::DbError;

// -----------------------------------------------------------------------
// Migration tracking
// -----------------------------------------------------------------------

const MIGRATION_TABLE_DDL: &str = "\
DEFINE TABLE IF NOT EXISTS _migration SCHEMAFULL;
DEFINE FIELD IF NOT EXISTS version ON TABLE _migration TYPE int;
DEFINE FIELD IF NOT EXISTS name ON TABLE _migration TYPE string;
DEFINE FIELD IF NOT EXISTS applied_at ON TABLE _migration TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX IF NOT EXISTS idx_migration_version ON TABLE _migration \
    COLUMNS version UNIQUE;
";

#[derive(Debug, SurrealValue)]
struct MigrationRecord {
    version: u32,
    #[allow(dead_code)]
    name: String,
}

struct Migration {
    version: u32,
    name: &'static str,
    sql: &'static str,
}

static MIGRATIONS: &[Migration] = &[Migration {
    version: 1,
    name: "initial_schema",
    sql: SCHEMA_V1,
}];

// -----------------------------------------------------------------------
// Schema v1 — initial table definitions
// -----------------------------------------------------------------------

const SCHEMA_V1: &str = "\
-- =======================================================================
-- Users (tenant scope, with reporting line)
-- =======================================================================
DEFINE TABLE user SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE user TYPE string;
DEFINE FIELD email ON TABLE user TYPE string;
DEFINE FIELD name ON TABLE user TYPE string;
DEFINE FIELD role ON TABLE user TYPE string \
    ASSERT $value IN ['ADMIN', 'SALES_MANAGER', 'SALES_REP'];
DEFINE FIELD reporting_to ON TABLE user TYPE option<string>;
DEFINE FIELD is_deleted ON TABLE user TYPE bool DEFAULT false;
DEFINE FIELD created_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE user TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_user_tenant_email ON TABLE user \
    COLUMNS tenant_id, email UNIQUE;
DEFINE INDEX idx_user_tenant_reporting ON TABLE user \
    COLUMNS tenant_id, reporting_to;

-- =======================================================================
-- Leads (tenant scope, owned)
-- =======================================================================
DEFINE TABLE lead SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE lead TYPE string;
DEFINE FIELD lead_owner ON TABLE lead TYPE string;
DEFINE FIELD first_name ON TABLE lead TYPE string;
DEFINE FIELD last_name ON TABLE lead TYPE string;
DEFINE FIELD email ON TABLE lead TYPE string;
DEFINE FIELD phone ON TABLE lead TYPE option<string>;
DEFINE FIELD company ON TABLE lead TYPE option<string>;
DEFINE FIELD status ON TABLE lead TYPE string;
DEFINE FIELD source ON TABLE lead TYPE string;
DEFINE FIELD is_deleted ON TABLE lead TYPE bool DEFAULT false;
DEFINE FIELD created_by ON TABLE lead TYPE string;
DEFINE FIELD updated_by ON TABLE lead TYPE string;
DEFINE FIELD deleted_by ON TABLE lead TYPE option<string>;
DEFINE FIELD deleted_at ON TABLE lead TYPE option<datetime>;
DEFINE FIELD created_at ON TABLE lead TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE lead TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_lead_tenant ON TABLE lead COLUMNS tenant_id;
DEFINE INDEX idx_lead_tenant_owner ON TABLE lead \
    COLUMNS tenant_id, lead_owner;

-- =======================================================================
-- Contacts (tenant scope, owned)
-- =======================================================================
DEFINE TABLE contact SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE contact TYPE string;
DEFINE FIELD contact_owner ON TABLE contact TYPE string;
DEFINE FIELD first_name ON TABLE contact TYPE string;
DEFINE FIELD last_name ON TABLE contact TYPE string;
DEFINE FIELD email ON TABLE contact TYPE string;
DEFINE FIELD phone ON TABLE contact TYPE option<string>;
DEFINE FIELD company ON TABLE contact TYPE option<string>;
DEFINE FIELD title ON TABLE contact TYPE option<string>;
DEFINE FIELD is_deleted ON TABLE contact TYPE bool DEFAULT false;
DEFINE FIELD created_by ON TABLE contact TYPE string;
DEFINE FIELD updated_by ON TABLE contact TYPE string;
DEFINE FIELD deleted_by ON TABLE contact TYPE option<string>;
DEFINE FIELD deleted_at ON TABLE contact TYPE option<datetime>;
DEFINE FIELD created_at ON TABLE contact TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE contact TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_contact_tenant ON TABLE contact COLUMNS tenant_id;
DEFINE INDEX idx_contact_tenant_owner ON TABLE contact \
    COLUMNS tenant_id, contact_owner;

-- =======================================================================
-- Deals (tenant scope, owned)
-- =======================================================================
DEFINE TABLE deal SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE deal TYPE string;
DEFINE FIELD deal_owner ON TABLE deal TYPE string;
DEFINE FIELD name ON TABLE deal TYPE string;
DEFINE FIELD amount ON TABLE deal TYPE float;
DEFINE FIELD stage ON TABLE deal TYPE string;
DEFINE FIELD close_date ON TABLE deal TYPE option<datetime>;
DEFINE FIELD is_deleted ON TABLE deal TYPE bool DEFAULT false;
DEFINE FIELD created_by ON TABLE deal TYPE string;
DEFINE FIELD updated_by ON TABLE deal TYPE string;
DEFINE FIELD deleted_by ON TABLE deal TYPE option<string>;
DEFINE FIELD deleted_at ON TABLE deal TYPE option<datetime>;
DEFINE FIELD created_at ON TABLE deal TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE deal TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_deal_tenant ON TABLE deal COLUMNS tenant_id;
DEFINE INDEX idx_deal_tenant_owner ON TABLE deal \
    COLUMNS tenant_id, deal_owner;

-- =======================================================================
-- Products (tenant scope, owned)
-- =======================================================================
DEFINE TABLE product SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE product TYPE string;
DEFINE FIELD product_owner ON TABLE product TYPE string;
DEFINE FIELD name ON TABLE product TYPE string;
DEFINE FIELD sku ON TABLE product TYPE string;
DEFINE FIELD unit_price ON TABLE product TYPE float;
DEFINE FIELD active ON TABLE product TYPE bool DEFAULT true;
DEFINE FIELD is_deleted ON TABLE product TYPE bool DEFAULT false;
DEFINE FIELD created_by ON TABLE product TYPE string;
DEFINE FIELD updated_by ON TABLE product TYPE string;
DEFINE FIELD deleted_by ON TABLE product TYPE option<string>;
DEFINE FIELD deleted_at ON TABLE product TYPE option<datetime>;
DEFINE FIELD created_at ON TABLE product TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE product TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_product_tenant ON TABLE product COLUMNS tenant_id;
DEFINE INDEX idx_product_tenant_owner ON TABLE product \
    COLUMNS tenant_id, product_owner;
DEFINE INDEX idx_product_tenant_sku ON TABLE product \
    COLUMNS tenant_id, sku UNIQUE;

-- =======================================================================
-- Quotes (tenant scope, owned)
-- =======================================================================
DEFINE TABLE quote SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE quote TYPE string;
DEFINE FIELD quote_owner ON TABLE quote TYPE string;
DEFINE FIELD quote_number ON TABLE quote TYPE string;
DEFINE FIELD subject ON TABLE quote TYPE string;
DEFINE FIELD total ON TABLE quote TYPE float;
DEFINE FIELD status ON TABLE quote TYPE string;
DEFINE FIELD valid_until ON TABLE quote TYPE option<datetime>;
DEFINE FIELD is_deleted ON TABLE quote TYPE bool DEFAULT false;
DEFINE FIELD created_by ON TABLE quote TYPE string;
DEFINE FIELD updated_by ON TABLE quote TYPE string;
DEFINE FIELD deleted_by ON TABLE quote TYPE option<string>;
DEFINE FIELD deleted_at ON TABLE quote TYPE option<datetime>;
DEFINE FIELD created_at ON TABLE quote TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE quote TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_quote_tenant ON TABLE quote COLUMNS tenant_id;
DEFINE INDEX idx_quote_tenant_owner ON TABLE quote \
    COLUMNS tenant_id, quote_owner;
DEFINE INDEX idx_quote_tenant_number ON TABLE quote \
    COLUMNS tenant_id, quote_number UNIQUE;

-- =======================================================================
-- Tasks (tenant scope, owned by assignee)
-- =======================================================================
DEFINE TABLE task SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE task TYPE string;
DEFINE FIELD assigned_to ON TABLE task TYPE string;
DEFINE FIELD subject ON TABLE task TYPE string;
DEFINE FIELD status ON TABLE task TYPE string;
DEFINE FIELD priority ON TABLE task TYPE string;
DEFINE FIELD due_date ON TABLE task TYPE option<datetime>;
DEFINE FIELD is_deleted ON TABLE task TYPE bool DEFAULT false;
DEFINE FIELD created_by ON TABLE task TYPE string;
DEFINE FIELD updated_by ON TABLE task TYPE string;
DEFINE FIELD deleted_by ON TABLE task TYPE option<string>;
DEFINE FIELD deleted_at ON TABLE task TYPE option<datetime>;
DEFINE FIELD created_at ON TABLE task TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE task TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_task_tenant ON TABLE task COLUMNS tenant_id;
DEFINE INDEX idx_task_tenant_owner ON TABLE task \
    COLUMNS tenant_id, assigned_to;

-- =======================================================================
-- Subsidiaries (tenant scope, organizational)
-- =======================================================================
DEFINE TABLE subsidiary SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE subsidiary TYPE string;
DEFINE FIELD name ON TABLE subsidiary TYPE string;
DEFINE FIELD region ON TABLE subsidiary TYPE string;
DEFINE FIELD is_deleted ON TABLE subsidiary TYPE bool DEFAULT false;
DEFINE FIELD created_by ON TABLE subsidiary TYPE string;
DEFINE FIELD updated_by ON TABLE subsidiary TYPE string;
DEFINE FIELD deleted_by ON TABLE subsidiary TYPE option<string>;
DEFINE FIELD deleted_at ON TABLE subsidiary TYPE option<datetime>;
DEFINE FIELD created_at ON TABLE subsidiary TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE subsidiary TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_subsidiary_tenant ON TABLE subsidiary COLUMNS tenant_id;
DEFINE INDEX idx_subsidiary_tenant_owner ON TABLE subsidiary \
    COLUMNS tenant_id, created_by;

-- =======================================================================
-- Dealers (tenant scope, organizational)
-- =======================================================================
DEFINE TABLE dealer SCHEMAFULL;
DEFINE FIELD tenant_id ON TABLE dealer TYPE string;
DEFINE FIELD name ON TABLE dealer TYPE string;
DEFINE FIELD email ON TABLE dealer TYPE string;
DEFINE FIELD territory ON TABLE dealer TYPE string;
DEFINE FIELD is_deleted ON TABLE dealer TYPE bool DEFAULT false;
DEFINE FIELD created_by ON TABLE dealer TYPE string;
DEFINE FIELD updated_by ON TABLE dealer TYPE string;
DEFINE FIELD deleted_by ON TABLE dealer TYPE option<string>;
DEFINE FIELD deleted_at ON TABLE dealer TYPE option<datetime>;
DEFINE FIELD created_at ON TABLE dealer TYPE datetime \
    DEFAULT time::now();
DEFINE FIELD updated_at ON TABLE dealer TYPE datetime \
    DEFAULT time::now();
DEFINE INDEX idx_dealer_tenant ON TABLE dealer COLUMNS tenant_id;
DEFINE INDEX idx_dealer_tenant_owner ON TABLE dealer \
    COLUMNS tenant_id, created_by;
";

// -----------------------------------------------------------------------
// Public API
// -----------------------------------------------------------------------

/// Run all pending migrations against the given SurrealDB client.
///
/// Creates a `_migration` tracking table on first run, then applies
/// each migration whose version exceeds the current maximum.
/// All DEFINE statements are idempotent so re-running is safe.
pub async fn run_migrations<C: Connection>(db: &Surreal<C>) -> Result<(), DbError> {
    // Ensure migration tracking table exists (idempotent).
    db.query(MIGRATION_TABLE_DDL)
        .await?
        .check()
        .map_err(|e| DbError::Migration(e.to_string()))?;

    // Determine current schema version.
    let mut result = db
        .query("SELECT * FROM _migration ORDER BY version DESC LIMIT 1")
        .await?;
    let records: Vec<MigrationRecord> = result.take(0)?;
    let current_version = records.first().map(|m| m.version).unwrap_or(0);

    for migration in MIGRATIONS {
        if migration.version > current_version {
            info!(
                version = migration.version,
                name = migration.name,
                "Applying migration"
            );
            db.query(migration.sql).await?.check().map_err(|e| {
                DbError::Migration(format!(
                    "Migration v{} '{}' failed: {}",
                    migration.version, migration.name, e,
                ))
            })?;

            // Record the applied migration.
            db.query(
                "CREATE _migration SET version = $version, \
                 name = $name",
            )
            .bind(("version", migration.version))
            .bind(("name", migration.name))
            .await?
            .check()
            .map_err(|e| {
                DbError::Migration(format!(
                    "Failed to record migration v{}: {}",
                    migration.version, e,
                ))
            })?;

            info!(
                version = migration.version,
                "Migration applied successfully"
            );
        }
    }

    Ok(())
}

/// Returns the raw schema DDL for version 1.
///
/// Exposed for testing with in-memory SurrealDB instances that
/// bypass the migration runner.
pub fn schema_v1() -> &'static str {
    SCHEMA_V1
}
