//! Evaluate a [`CompiledQuery`]'s constraints against individual records. This is for backends
//! that scan records themselves rather than delegating to a hosted index, and for checking what
//! a compiled query admits.
//!
//! Only the facet groups and numeric clauses are evaluated here. Matching the search term and
//! ordering by index replica are the backend's concern.

use serde_json::{Map, Value};

use crate::query::{CompiledQuery, FacetClause, FacetGroup, NumericClause};

/// A record that can answer facet and numeric lookups
pub trait Facetable {
    /// Every facet value the record holds for `field`. Multi-valued attributes (a listing
    /// offered in several sizes) yield one entry per value.
    fn facet_values(&self, field: &str) -> Vec<String>;

    fn numeric_value(&self, field: &str) -> Option<f64>;
}

pub fn clause_matches<R: Facetable>(record: &R, clause: &FacetClause) -> bool {
    record.facet_values(&clause.field).iter().any(|value| *value == clause.value)
}

/// Any clause in the group matching admits the record
pub fn group_matches<R: Facetable>(record: &R, group: &FacetGroup) -> bool { group.clauses.iter().any(|clause| clause_matches(record, clause)) }

/// A record without the attribute never satisfies a numeric bound
pub fn numeric_matches<R: Facetable>(record: &R, clause: &NumericClause) -> bool {
    record.numeric_value(&clause.field).is_some_and(|actual| clause.operator.admits(actual, clause.value))
}

pub fn evaluate<R: Facetable>(record: &R, query: &CompiledQuery) -> bool {
    query.facet_groups.iter().all(|group| group_matches(record, group))
        && query.numeric_clauses.iter().all(|clause| numeric_matches(record, clause))
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

impl Facetable for Map<String, Value> {
    fn facet_values(&self, field: &str) -> Vec<String> {
        match self.get(field) {
            Some(Value::Array(items)) => items.iter().filter_map(scalar_text).collect(),
            Some(value) => scalar_text(value).into_iter().collect(),
            None => Vec::new(),
        }
    }

    fn numeric_value(&self, field: &str) -> Option<f64> { self.get(field).and_then(Value::as_f64) }
}

pub struct QueryFilter<'a, I> {
    iter: I,
    query: &'a CompiledQuery,
}

impl<'a, I> QueryFilter<'a, I> {
    pub fn new(iter: I, query: &'a CompiledQuery) -> Self { Self { iter, query } }
}

impl<I, R> Iterator for QueryFilter<'_, I>
where
    I: Iterator<Item = R>,
    R: Facetable,
{
    type Item = R;

    fn next(&mut self) -> Option<Self::Item> { self.iter.by_ref().find(|record| evaluate(record, self.query)) }
}
