//! Static role capability table.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use vantage_core::models::role::Role;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Action {
    View,
    Create,
    Edit,
    Delete,
}

impl Action {
    pub const ALL: [Action; 4] = [Action::View, Action::Create, Action::Edit, Action::Delete];
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ResourceKind {
    Leads,
    Contacts,
    Deals,
    Products,
    Quotes,
    Tasks,
    Subsidiaries,
    Dealers,
    Users,
}

impl ResourceKind {
    /// Sales-facing entities every sales role works with.
    pub const BUSINESS: [ResourceKind; 6] = [
        ResourceKind::Leads,
        ResourceKind::Contacts,
        ResourceKind::Deals,
        ResourceKind::Products,
        ResourceKind::Quotes,
        ResourceKind::Tasks,
    ];

    /// Organizational entities — read-only below Admin.
    pub const ORGANIZATIONAL: [ResourceKind; 2] =
        [ResourceKind::Subsidiaries, ResourceKind::Dealers];

    pub const ALL: [ResourceKind; 9] = [
        ResourceKind::Leads,
        ResourceKind::Contacts,
        ResourceKind::Deals,
        ResourceKind::Products,
        ResourceKind::Quotes,
        ResourceKind::Tasks,
        ResourceKind::Subsidiaries,
        ResourceKind::Dealers,
        ResourceKind::Users,
    ];
}

/// Immutable role × resource × action grant table.
///
/// Built once at startup and injected into services. Consulted before
/// any ownership logic — a role without the capability never reaches a
/// record-level check. Pure lookup, no side effects; an unknown role
/// holds no grants at all.
#[derive(Debug, Clone)]
pub struct AccessPolicy {
    grants: HashSet<(Role, ResourceKind, Action)>,
}

impl AccessPolicy {
    /// The standard three-tier capability table.
    ///
    /// Admin: everything. SalesManager: full CRUD on business entities,
    /// view-only on organizational entities, no user management.
    /// SalesRep: full CRUD on business entities, nothing else.
    pub fn standard() -> Self {
        let mut grants = HashSet::new();

        for resource in ResourceKind::ALL {
            for action in Action::ALL {
                grants.insert((Role::Admin, resource, action));
            }
        }

        for resource in ResourceKind::BUSINESS {
            for action in Action::ALL {
                grants.insert((Role::SalesManager, resource, action));
                grants.insert((Role::SalesRep, resource, action));
            }
        }

        for resource in ResourceKind::ORGANIZATIONAL {
            grants.insert((Role::SalesManager, resource, Action::View));
        }

        Self { grants }
    }

    pub fn is_permitted(
        &self,
        role: Option<Role>,
        action: Action,
        resource: ResourceKind,
    ) -> bool {
        match role {
            Some(role) => self.grants.contains(&(role, resource, action)),
            None => false,
        }
    }
}
