//! Ownership filter compilation.

use std::collections::BTreeSet;

use uuid::Uuid;
use vantage_core::filter::{DELETED_FIELD, FieldValue, Filter, TENANT_FIELD};
use vantage_core::models::actor::Actor;
use vantage_core::models::role::Role;
use vantage_core::record::OwnedRecord;
use vantage_core::repository::DirectoryRepository;

use crate::directory::DirectoryResolver;

/// Compiles an actor's visibility into a declarative [`Filter`].
///
/// One routine for every entity, parameterized by
/// [`OwnedRecord::OWNER_FIELD`]. The result always conjoins the tenant
/// clause first, then (unless lifted) the soft-delete exclusion, then
/// the role-dependent ownership clause. Admins get no ownership clause;
/// an unrecognized role gets a clause no stored record can satisfy —
/// never an unconstrained query.
#[derive(Debug, Clone)]
pub struct OwnershipFilterCompiler<D: DirectoryRepository> {
    directory: DirectoryResolver<D>,
}

impl<D: DirectoryRepository> OwnershipFilterCompiler<D> {
    pub fn new(directory: D) -> Self {
        Self {
            directory: DirectoryResolver::new(directory),
        }
    }

    pub async fn compile<R: OwnedRecord>(&self, actor: &Actor, include_deleted: bool) -> Filter {
        let mut clauses = vec![Filter::eq(TENANT_FIELD, actor.tenant_id)];

        if !include_deleted {
            clauses.push(Filter::eq(DELETED_FIELD, false));
        }

        match actor.role {
            // Full tenant visibility.
            Some(Role::Admin) => {}
            Some(Role::SalesManager) => {
                let mut owners: BTreeSet<Uuid> = self
                    .directory
                    .subordinates_of(actor.user_id, actor.tenant_id)
                    .await
                    .into_iter()
                    .collect();
                owners.insert(actor.user_id);

                if owners.len() == 1 {
                    clauses.push(Filter::eq(R::OWNER_FIELD, actor.user_id));
                } else {
                    clauses.push(Filter::is_in(
                        R::OWNER_FIELD,
                        owners.into_iter().map(FieldValue::Uuid).collect(),
                    ));
                }
            }
            Some(Role::SalesRep) => {
                clauses.push(Filter::eq(R::OWNER_FIELD, actor.user_id));
            }
            // The nil UUID matches no stored record: deny-all.
            None => {
                clauses.push(Filter::eq(R::OWNER_FIELD, Uuid::nil()));
            }
        }

        Filter::all(clauses)
    }
}
