//! Document store seam used by the owner-scoped lookups.
//!
//! Lookups are expressed as [`StoreQuery`] values: equality and `IN` filters on (possibly
//! dotted) field paths, and an optional single-field sort. A store evaluates them however its
//! backend allows.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::StoreError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Direction {
    Asc,
    Desc,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderBy {
    pub field: String,
    pub direction: Direction,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldFilter {
    Eq { field: String, value: Value },
    In { field: String, values: Vec<Value> },
}

impl FieldFilter {
    pub fn field(&self) -> &str {
        match self {
            FieldFilter::Eq { field, .. } | FieldFilter::In { field, .. } => field,
        }
    }

    pub fn admits(&self, document: &Map<String, Value>) -> bool {
        match (self, field_at(document, self.field())) {
            (FieldFilter::Eq { value, .. }, Some(actual)) => actual == value,
            (FieldFilter::In { values, .. }, Some(actual)) => values.contains(actual),
            (_, None) => false,
        }
    }
}

/// Filters are AND'ed
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoreQuery {
    pub collection: String,
    pub filters: Vec<FieldFilter>,
    pub order_by: Option<OrderBy>,
}

impl StoreQuery {
    pub fn collection(name: impl Into<String>) -> Self { Self { collection: name.into(), filters: Vec::new(), order_by: None } }

    pub fn where_eq(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filters.push(FieldFilter::Eq { field: field.into(), value: value.into() });
        self
    }

    pub fn where_in<V: Into<Value>>(mut self, field: impl Into<String>, values: impl IntoIterator<Item = V>) -> Self {
        self.filters.push(FieldFilter::In { field: field.into(), values: values.into_iter().map(Into::into).collect() });
        self
    }

    pub fn order_by(mut self, field: impl Into<String>, direction: Direction) -> Self {
        self.order_by = Some(OrderBy { field: field.into(), direction });
        self
    }

    pub fn admits(&self, document: &Map<String, Value>) -> bool { self.filters.iter().all(|filter| filter.admits(document)) }
}

/// Resolve a dotted path such as `buyerInfo.id` inside a document
pub fn field_at<'a>(document: &'a Map<String, Value>, path: &str) -> Option<&'a Value> {
    let mut steps = path.split('.');
    let mut current = document.get(steps.next()?)?;
    for step in steps {
        current = current.as_object()?.get(step)?;
    }
    Some(current)
}

/// A stored document: the store-assigned identifier and the payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub data: Map<String, Value>,
}

impl Document {
    pub fn new(id: impl Into<String>, data: Map<String, Value>) -> Self { Self { id: id.into(), data } }

    /// The payload with the identifier merged in under `id`
    pub fn into_record(self) -> Map<String, Value> {
        let mut record = self.data;
        record.insert("id".to_string(), Value::String(self.id));
        record
    }
}

#[async_trait]
pub trait DocumentStore: Send + Sync {
    /// Documents in `query.collection` admitted by every filter, sorted by `query.order_by`
    async fn query(&self, query: &StoreQuery) -> Result<Vec<Document>, StoreError>;
}
