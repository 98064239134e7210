//! Vantage Core — domain models, the access-filter AST, and the
//! collaborator traits shared across all crates.

pub mod error;
pub mod filter;
pub mod models;
pub mod record;
pub mod repository;
