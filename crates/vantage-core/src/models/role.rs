//! Role enumeration and normalization.
//!
//! The deployment history left two spellings of the same three-tier
//! hierarchy in circulation: the canonical uppercase forms and a legacy
//! lowercase set (`admin`/`manager`/`rep`). Both normalize through the
//! single [`Role::parse`] function; anything else is `None`, and every
//! consumer treats `None` as deny-everything.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    Admin,
    SalesManager,
    SalesRep,
}

impl Role {
    /// Normalize a raw role string to the three-tier hierarchy.
    ///
    /// Accepts the canonical forms (`ADMIN`, `SALES_MANAGER`, `SALES_REP`)
    /// and the legacy forms (`admin`, `manager`, `rep`), case-insensitively.
    /// Unrecognized input yields `None` — least privilege, not a guess.
    pub fn parse(raw: &str) -> Option<Role> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "admin" => Some(Role::Admin),
            "sales_manager" | "manager" => Some(Role::SalesManager),
            "sales_rep" | "rep" => Some(Role::SalesRep),
            _ => None,
        }
    }

    /// Canonical storage form.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "ADMIN",
            Role::SalesManager => "SALES_MANAGER",
            Role::SalesRep => "SALES_REP",
        }
    }
}
