//! Storage-agnostic access filters.
//!
//! The RBAC engine compiles an actor's visibility into a [`Filter`] — a
//! small conjunction of equality and set-membership clauses. The same
//! value can be evaluated in memory against any [`Queryable`] record or
//! rendered by a storage backend into its native query language.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Attribute name of the tenant partition key on every stored record.
pub const TENANT_FIELD: &str = "tenant_id";

/// Attribute name of the soft-delete marker on every stored record.
pub const DELETED_FIELD: &str = "is_deleted";

/// A single typed attribute value referenced by a filter clause.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldValue {
    Uuid(Uuid),
    Str(String),
    Bool(bool),
}

impl From<Uuid> for FieldValue {
    fn from(value: Uuid) -> Self {
        FieldValue::Uuid(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Str(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Str(value)
    }
}

/// Declarative access predicate over record attributes.
///
/// Backends render this into their own query syntax; callers that already
/// hold a record evaluate it with [`Filter::matches`]. Both views must
/// agree — the guard/compiler equivalence tests in `vantage-rbac` pin
/// that down.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Filter {
    /// Conjunction of sub-filters. An empty conjunction matches everything.
    And(Vec<Filter>),
    /// Attribute equality.
    Eq { field: String, value: FieldValue },
    /// Attribute set-membership.
    In {
        field: String,
        values: Vec<FieldValue>,
    },
}

impl Filter {
    pub fn eq(field: impl Into<String>, value: impl Into<FieldValue>) -> Self {
        Filter::Eq {
            field: field.into(),
            value: value.into(),
        }
    }

    pub fn is_in(field: impl Into<String>, values: Vec<FieldValue>) -> Self {
        Filter::In {
            field: field.into(),
            values,
        }
    }

    pub fn all(clauses: Vec<Filter>) -> Self {
        Filter::And(clauses)
    }

    /// Evaluate the filter in memory against a record.
    ///
    /// A field the record does not expose never matches — an unknown
    /// attribute denies rather than admits.
    pub fn matches<Q: Queryable + ?Sized>(&self, record: &Q) -> bool {
        match self {
            Filter::And(clauses) => clauses.iter().all(|c| c.matches(record)),
            Filter::Eq { field, value } => record.field(field).as_ref() == Some(value),
            Filter::In { field, values } => match record.field(field) {
                Some(actual) => values.contains(&actual),
                None => false,
            },
        }
    }
}

/// Field lookup by attribute name, for in-memory filter evaluation.
///
/// Blanket-implemented for every [`crate::record::OwnedRecord`] over the
/// attributes the RBAC engine filters on (tenant, soft-delete marker,
/// owner).
pub trait Queryable {
    fn field(&self, name: &str) -> Option<FieldValue>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::record::OwnedRecord;

    struct TestRecord {
        tenant: Uuid,
        owner: Uuid,
        deleted: bool,
    }

    // Queryable arrives through the blanket impl for owned records.
    impl OwnedRecord for TestRecord {
        const TABLE: &'static str = "test_record";
        const OWNER_FIELD: &'static str = "owner";

        fn id(&self) -> Uuid {
            self.owner
        }

        fn tenant_id(&self) -> Uuid {
            self.tenant
        }

        fn owner(&self) -> Uuid {
            self.owner
        }

        fn is_deleted(&self) -> bool {
            self.deleted
        }

        fn search_text(&self) -> Vec<&str> {
            Vec::new()
        }
    }

    fn record() -> (TestRecord, Uuid, Uuid) {
        let tenant = Uuid::new_v4();
        let owner = Uuid::new_v4();
        (
            TestRecord {
                tenant,
                owner,
                deleted: false,
            },
            tenant,
            owner,
        )
    }

    #[test]
    fn eq_matches_on_value() {
        let (rec, tenant, _) = record();
        assert!(Filter::eq(TENANT_FIELD, tenant).matches(&rec));
        assert!(!Filter::eq(TENANT_FIELD, Uuid::new_v4()).matches(&rec));
    }

    #[test]
    fn in_matches_on_membership() {
        let (rec, _, owner) = record();
        let hit = Filter::is_in("owner", vec![Uuid::new_v4().into(), owner.into()]);
        let miss = Filter::is_in("owner", vec![Uuid::new_v4().into()]);
        assert!(hit.matches(&rec));
        assert!(!miss.matches(&rec));
    }

    #[test]
    fn and_requires_every_clause() {
        let (rec, tenant, owner) = record();
        let both = Filter::all(vec![
            Filter::eq(TENANT_FIELD, tenant),
            Filter::eq("owner", owner),
        ]);
        let one_wrong = Filter::all(vec![
            Filter::eq(TENANT_FIELD, tenant),
            Filter::eq("owner", Uuid::new_v4()),
        ]);
        assert!(both.matches(&rec));
        assert!(!one_wrong.matches(&rec));
    }

    #[test]
    fn empty_conjunction_matches_everything() {
        let (rec, _, _) = record();
        assert!(Filter::all(vec![]).matches(&rec));
    }

    #[test]
    fn unknown_field_never_matches() {
        let (rec, _, _) = record();
        assert!(!Filter::eq("no_such_field", true).matches(&rec));
        assert!(!Filter::is_in("no_such_field", vec![true.into()]).matches(&rec));
    }
}
