//! Fail-soft subordinate resolution over the user directory.

use std::collections::HashSet;

use tracing::warn;
use uuid::Uuid;
use vantage_core::repository::DirectoryRepository;

/// Resolves a manager's direct reports.
///
/// A failed directory lookup degrades to the empty set: the manager's
/// effective access shrinks to exactly their own records, which is the
/// safe (restrictive) default. Callers never see an error from here.
/// Resolution is single-level only — direct reports, no transitive
/// walk — so a malformed reporting graph cannot cause unbounded work.
#[derive(Debug, Clone)]
pub struct DirectoryResolver<D: DirectoryRepository> {
    directory: D,
}

impl<D: DirectoryRepository> DirectoryResolver<D> {
    pub fn new(directory: D) -> Self {
        Self { directory }
    }

    pub async fn subordinates_of(&self, manager_id: Uuid, tenant_id: Uuid) -> HashSet<Uuid> {
        match self.directory.find_reports(manager_id, tenant_id).await {
            Ok(ids) => ids.into_iter().collect(),
            Err(err) => {
                warn!(
                    %manager_id,
                    %tenant_id,
                    error = %err,
                    "directory lookup failed, treating manager as having no reports"
                );
                HashSet::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vantage_core::error::{VantageError, VantageResult};

    #[derive(Clone)]
    struct StubDirectory {
        reports: Vec<Uuid>,
        fail: bool,
    }

    impl DirectoryRepository for StubDirectory {
        async fn find_reports(&self, _manager: Uuid, _tenant: Uuid) -> VantageResult<Vec<Uuid>> {
            if self.fail {
                Err(VantageError::Database("directory offline".into()))
            } else {
                Ok(self.reports.clone())
            }
        }
    }

    #[tokio::test]
    async fn collects_reports_into_a_set() {
        let a = Uuid::new_v4();
        let b = Uuid::new_v4();
        let resolver = DirectoryResolver::new(StubDirectory {
            reports: vec![a, b, a],
            fail: false,
        });

        let subs = resolver.subordinates_of(Uuid::new_v4(), Uuid::new_v4()).await;
        assert_eq!(subs, HashSet::from([a, b]));
    }

    #[tokio::test]
    async fn lookup_failure_degrades_to_empty_set() {
        let resolver = DirectoryResolver::new(StubDirectory {
            reports: vec![Uuid::new_v4()],
            fail: true,
        });

        let subs = resolver.subordinates_of(Uuid::new_v4(), Uuid::new_v4()).await;
        assert!(subs.is_empty());
    }
}
