use async_trait::async_trait;
use serde_json::Value;
use shoppe_core::product::OBJECT_ID;
use shoppe_core::{RawHit, SearchBackend, SearchError};
use shoppe_query::evaluate::QueryFilter;
use shoppe_query::{CompiledQuery, QueryCompiler};
use tokio::sync::RwLock;
use tracing::debug;

use crate::ordering::compare_sort_keys;

/// A product catalog held in memory, searchable through the base index and its sorted replicas.
///
/// Text matching is deliberately simple: every whitespace-separated term of the search string
/// must occur, case-insensitively, in some string attribute of the record.
#[derive(Debug)]
pub struct MemorySearchBackend {
    compiler: QueryCompiler,
    records: RwLock<Vec<RawHit>>,
}

impl Default for MemorySearchBackend {
    fn default() -> Self { Self::new(QueryCompiler::default()) }
}

impl MemorySearchBackend {
    /// Resolves index names the way `compiler` derives them
    pub fn new(compiler: QueryCompiler) -> Self { Self { compiler, records: RwLock::new(Vec::new()) } }

    /// Add a record, replacing the one with the same `objectID`
    pub async fn insert(&self, record: RawHit) {
        let mut records = self.records.write().await;
        let id = record.get(OBJECT_ID).cloned();
        match records.iter_mut().find(|existing| id.is_some() && existing.get(OBJECT_ID) == id.as_ref()) {
            Some(existing) => *existing = record,
            None => records.push(record),
        }
    }

    pub async fn extend(&self, records: impl IntoIterator<Item = RawHit>) {
        for record in records {
            self.insert(record).await;
        }
    }

    pub async fn len(&self) -> usize { self.records.read().await.len() }

    pub async fn is_empty(&self) -> bool { self.records.read().await.is_empty() }
}

fn text_matches(record: &RawHit, search_term: &str) -> bool {
    let terms: Vec<String> = search_term.split_whitespace().map(str::to_lowercase).collect();
    if terms.is_empty() {
        return true;
    }

    let mut haystack = Vec::new();
    for value in record.values() {
        match value {
            Value::String(s) => haystack.push(s.to_lowercase()),
            Value::Array(items) => haystack.extend(items.iter().filter_map(Value::as_str).map(str::to_lowercase)),
            _ => {}
        }
    }
    terms.iter().all(|term| haystack.iter().any(|text| text.contains(term.as_str())))
}

#[async_trait]
impl SearchBackend for MemorySearchBackend {
    async fn search(&self, query: &CompiledQuery) -> Result<Vec<RawHit>, SearchError> {
        let order = self
            .compiler
            .order_of_index(&query.index_selector)
            .ok_or_else(|| SearchError::backend(format!("index {} does not exist", query.index_selector)))?;

        let records = self.records.read().await;
        let mut hits: Vec<RawHit> =
            QueryFilter::new(records.iter().cloned(), query).filter(|record| text_matches(record, &query.search_term)).collect();
        drop(records);

        if let Some(order) = order {
            let field = order.sort_field();
            hits.sort_by(|a, b| compare_sort_keys(a.get(field), b.get(field), order.is_descending()));
        }

        debug!("MemorySearchBackend.search({}) {:?} -> {} hits", query.index_selector, query.search_term, hits.len());
        Ok(hits)
    }
}
