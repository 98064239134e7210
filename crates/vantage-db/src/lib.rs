//! Vantage Database — SurrealDB connection management and storage
//! implementations.
//!
//! This crate provides:
//! - Connection management ([`DbManager`], [`DbConfig`])
//! - Schema initialization and migrations ([`run_migrations`])
//! - Filter-AST rendering into SurrealQL ([`render_filter`])
//! - The generic record store and the user directory ([`store`])
//! - Error types ([`DbError`])

mod connection;
mod error;
mod render;
mod schema;
pub mod store;

pub use connection::{DbConfig, DbManager};
pub use error::DbError;
pub use render::{BindValue, render_filter};
pub use schema::{run_migrations, schema_v1};
pub use store::{SurrealOwnedRecord, SurrealRecordStore, SurrealUserDirectory};
