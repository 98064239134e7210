//! Rendering of the access [`Filter`] AST into SurrealQL.
//!
//! Field names are crate-controlled constants; attribute values are
//! always bound as parameters, never interpolated into the statement.
//! UUID values render as strings, matching how the schema stores them.

use vantage_core::filter::{FieldValue, Filter};

/// A value to bind to a rendered query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    Str(String),
    Bool(bool),
    StrList(Vec<String>),
}

/// Render a filter into a SurrealQL condition and its parameter binds.
///
/// Parameters are named `f0`, `f1`, ... in clause order. An empty
/// conjunction renders as `true`.
pub fn render_filter(filter: &Filter) -> (String, Vec<(String, BindValue)>) {
    let mut binds = Vec::new();
    let clause = render(filter, &mut binds);
    (clause, binds)
}

fn render(filter: &Filter, binds: &mut Vec<(String, BindValue)>) -> String {
    match filter {
        Filter::And(clauses) => {
            if clauses.is_empty() {
                return "true".into();
            }
            let parts: Vec<String> = clauses.iter().map(|c| render(c, binds)).collect();
            format!("({})", parts.join(" AND "))
        }
        Filter::Eq { field, value } => {
            debug_assert!(is_identifier(field), "field name must be an identifier");
            let param = format!("f{}", binds.len());
            let expr = format!("{field} = ${param}");
            binds.push((param, scalar(value)));
            expr
        }
        Filter::In { field, values } => {
            debug_assert!(is_identifier(field), "field name must be an identifier");
            let param = format!("f{}", binds.len());
            let expr = format!("{field} IN ${param}");
            binds.push((param, BindValue::StrList(values.iter().map(text).collect())));
            expr
        }
    }
}

fn scalar(value: &FieldValue) -> BindValue {
    match value {
        FieldValue::Uuid(v) => BindValue::Str(v.to_string()),
        FieldValue::Str(v) => BindValue::Str(v.clone()),
        FieldValue::Bool(v) => BindValue::Bool(*v),
    }
}

fn text(value: &FieldValue) -> String {
    match value {
        FieldValue::Uuid(v) => v.to_string(),
        FieldValue::Str(v) => v.clone(),
        FieldValue::Bool(v) => v.to_string(),
    }
}

fn is_identifier(field: &str) -> bool {
    !field.is_empty()
        && field
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '_')
}
