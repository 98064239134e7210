//! Vantage RBAC — the role-based access control filter engine.
//!
//! Given an actor's role, tenant, and reporting-line position, compute
//! which records that actor may see and express the answer as a
//! storage-pushable [`vantage_core::filter::Filter`]. One generic
//! compiler, guard, and access service cover every owned entity.

pub mod compiler;
pub mod directory;
pub mod entities;
pub mod guard;
pub mod policy;
pub mod service;

pub use compiler::OwnershipFilterCompiler;
pub use directory::DirectoryResolver;
pub use guard::RecordAccessGuard;
pub use policy::{AccessPolicy, Action, ResourceKind};
pub use service::RecordAccessService;
