//! Per-entity instantiations of the generic access service.
//!
//! The only per-entity wiring: a type alias pinning the record type and
//! a constructor pinning the [`ResourceKind`] consulted by the policy.

use std::sync::Arc;

use vantage_core::models::contact::Contact;
use vantage_core::models::deal::Deal;
use vantage_core::models::dealer::Dealer;
use vantage_core::models::lead::Lead;
use vantage_core::models::product::Product;
use vantage_core::models::quote::Quote;
use vantage_core::models::subsidiary::Subsidiary;
use vantage_core::models::task::TaskItem;
use vantage_core::repository::{DirectoryRepository, RecordStore};

use crate::policy::{AccessPolicy, ResourceKind};
use crate::service::RecordAccessService;

pub type LeadService<S, D> = RecordAccessService<Lead, S, D>;
pub type ContactService<S, D> = RecordAccessService<Contact, S, D>;
pub type DealService<S, D> = RecordAccessService<Deal, S, D>;
pub type ProductService<S, D> = RecordAccessService<Product, S, D>;
pub type QuoteService<S, D> = RecordAccessService<Quote, S, D>;
pub type TaskService<S, D> = RecordAccessService<TaskItem, S, D>;
pub type SubsidiaryService<S, D> = RecordAccessService<Subsidiary, S, D>;
pub type DealerService<S, D> = RecordAccessService<Dealer, S, D>;

pub fn lead_service<S, D>(store: S, directory: D, policy: Arc<AccessPolicy>) -> LeadService<S, D>
where
    S: RecordStore<Lead>,
    D: DirectoryRepository + Clone,
{
    RecordAccessService::new(store, directory, policy, ResourceKind::Leads)
}

pub fn contact_service<S, D>(
    store: S,
    directory: D,
    policy: Arc<AccessPolicy>,
) -> ContactService<S, D>
where
    S: RecordStore<Contact>,
    D: DirectoryRepository + Clone,
{
    RecordAccessService::new(store, directory, policy, ResourceKind::Contacts)
}

pub fn deal_service<S, D>(store: S, directory: D, policy: Arc<AccessPolicy>) -> DealService<S, D>
where
    S: RecordStore<Deal>,
    D: DirectoryRepository + Clone,
{
    RecordAccessService::new(store, directory, policy, ResourceKind::Deals)
}

pub fn product_service<S, D>(
    store: S,
    directory: D,
    policy: Arc<AccessPolicy>,
) -> ProductService<S, D>
where
    S: RecordStore<Product>,
    D: DirectoryRepository + Clone,
{
    RecordAccessService::new(store, directory, policy, ResourceKind::Products)
}

pub fn quote_service<S, D>(store: S, directory: D, policy: Arc<AccessPolicy>) -> QuoteService<S, D>
where
    S: RecordStore<Quote>,
    D: DirectoryRepository + Clone,
{
    RecordAccessService::new(store, directory, policy, ResourceKind::Quotes)
}

pub fn task_service<S, D>(store: S, directory: D, policy: Arc<AccessPolicy>) -> TaskService<S, D>
where
    S: RecordStore<TaskItem>,
    D: DirectoryRepository + Clone,
{
    RecordAccessService::new(store, directory, policy, ResourceKind::Tasks)
}

pub fn subsidiary_service<S, D>(
    store: S,
    directory: D,
    policy: Arc<AccessPolicy>,
) -> SubsidiaryService<S, D>
where
    S: RecordStore<Subsidiary>,
    D: DirectoryRepository + Clone,
{
    RecordAccessService::new(store, directory, policy, ResourceKind::Subsidiaries)
}

pub fn dealer_service<S, D>(
    store: S,
    directory: D,
    policy: Arc<AccessPolicy>,
) -> DealerService<S, D>
where
    S: RecordStore<Dealer>,
    D: DirectoryRepository + Clone,
{
    RecordAccessService::new(store, directory, policy, ResourceKind::Dealers)
}
