//! Per-request access context.

use uuid::Uuid;

use crate::models::role::Role;

/// The identity on whose behalf an access decision is made.
///
/// Ephemeral — built from verified request claims, never persisted. The
/// role is `None` when the inbound claim failed normalization; the RBAC
/// engine denies everything for such actors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    pub user_id: Uuid,
    pub tenant_id: Uuid,
    pub role: Option<Role>,
}

impl Actor {
    pub fn new(user_id: Uuid, tenant_id: Uuid, role: Role) -> Self {
        Self {
            user_id,
            tenant_id,
            role: Some(role),
        }
    }

    /// Build an actor from a raw role claim, normalizing through
    /// [`Role::parse`].
    pub fn from_claims(user_id: Uuid, tenant_id: Uuid, raw_role: &str) -> Self {
        Self {
            user_id,
            tenant_id,
            role: Role::parse(raw_role),
        }
    }
}
