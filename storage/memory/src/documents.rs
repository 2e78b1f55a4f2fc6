use std::collections::BTreeMap;

use async_trait::async_trait;
use dashmap::DashMap;
use serde_json::{Map, Value};
use shoppe_core::store::field_at;
use shoppe_core::{Direction, Document, DocumentStore, StoreError, StoreQuery};
use tracing::debug;

use crate::ordering::compare_sort_keys;

/// Collections of JSON documents keyed by id.
///
/// Querying a collection that was never created or written to fails with
/// [`StoreError::CollectionNotFound`]. A sort field also acts as an existence filter:
/// documents lacking it are not returned.
#[derive(Debug, Default)]
pub struct MemoryDocumentStore {
    collections: DashMap<String, BTreeMap<String, Map<String, Value>>>,
}

impl MemoryDocumentStore {
    pub fn new() -> Self { Self::default() }

    pub fn create_collection(&self, name: impl Into<String>) { self.collections.entry(name.into()).or_default(); }

    /// Insert or replace a document, creating its collection on demand
    pub fn insert(&self, collection: &str, id: impl Into<String>, data: Map<String, Value>) -> Option<Map<String, Value>> {
        self.collections.entry(collection.to_string()).or_default().insert(id.into(), data)
    }

    pub fn remove(&self, collection: &str, id: &str) -> Option<Map<String, Value>> { self.collections.get_mut(collection)?.remove(id) }

    pub fn len(&self, collection: &str) -> usize { self.collections.get(collection).map(|c| c.len()).unwrap_or(0) }
}

#[async_trait]
impl DocumentStore for MemoryDocumentStore {
    async fn query(&self, query: &StoreQuery) -> Result<Vec<Document>, StoreError> {
        let collection = self.collections.get(&query.collection).ok_or_else(|| StoreError::CollectionNotFound(query.collection.clone()))?;

        let mut documents: Vec<Document> = collection
            .iter()
            .filter(|(_, data)| query.admits(data))
            .filter(|(_, data)| query.order_by.as_ref().map_or(true, |order| field_at(data, &order.field).is_some()))
            .map(|(id, data)| Document::new(id.clone(), data.clone()))
            .collect();
        drop(collection);

        if let Some(order) = &query.order_by {
            let descending = order.direction == Direction::Desc;
            // stable, so equal keys keep id order
            documents.sort_by(|a, b| compare_sort_keys(field_at(&a.data, &order.field), field_at(&b.data, &order.field), descending));
        }

        debug!("MemoryDocumentStore.query({}) -> {} documents", query.collection, documents.len());
        Ok(documents)
    }
}
