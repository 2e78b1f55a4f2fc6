use std::str::FromStr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Map, Value};
use shoppe_core::{ProductSearch, RawHit, SearchBackend, SearchError, ToolRegistry};
use shoppe_query::{CompiledQuery, QueryCompiler};
use shoppe_storage_memory::{MemoryDocumentStore, MemorySearchBackend};
use tracing::Level;

// Initialize tracing for tests
#[ctor::ctor]
fn init_tracing() {
    // if LOG_LEVEL env var is set, use it
    if let Ok(level) = std::env::var("LOG_LEVEL") {
        tracing_subscriber::fmt().with_max_level(Level::from_str(&level).unwrap()).with_test_writer().init();
    } else {
        tracing_subscriber::fmt().with_max_level(Level::INFO).with_test_writer().init();
    }
}

pub fn object(value: Value) -> Map<String, Value> { value.as_object().cloned().expect("fixture must be an object") }

#[allow(unused)]
pub fn catalog_records() -> Vec<RawHit> {
    vec![
        object(json!({"objectID": "p-1", "name": "Canvas sneakers", "status": "available", "category": "Shoes", "subCategory": "Sneakers", "size": ["42", "43"], "gender": "Unisex", "condition": "new", "currency": "₦ NGN", "price": 6000, "discountPercentage": 10, "popular": 12, "createdAt": 300, "sellerId": "u-9"})),
        object(json!({"objectID": "p-2", "name": "Suede sneakers", "status": "available", "category": "Shoes", "subCategory": "Sneakers", "size": ["44"], "gender": "Men", "condition": "used", "currency": "₦ NGN", "price": 7500, "popular": 40, "createdAt": 100, "sellerId": "u-9"})),
        object(json!({"objectID": "p-3", "name": "Budget sneakers", "status": "available", "category": "Shoes", "size": ["42"], "gender": "Women", "condition": "new", "currency": "₦ NGN", "price": 4000, "createdAt": 200, "sellerId": "u-8"})),
        object(json!({"objectID": "p-4", "name": "Sold sneakers", "status": "sold", "category": "Shoes", "size": ["42"], "currency": "₦ NGN", "price": 9000, "createdAt": 50, "sellerId": "u-8"})),
        object(json!({"objectID": "p-5", "name": "Linen shirt", "status": "available", "category": "Tops", "size": "M", "gender": "Men", "condition": "new", "currency": "$ USD", "price": 30, "discountPercentage": 25, "createdAt": 400, "sellerId": "u-9"})),
    ]
}

#[allow(unused)]
pub async fn catalog() -> Arc<MemorySearchBackend> {
    let backend = Arc::new(MemorySearchBackend::default());
    backend.extend(catalog_records()).await;
    backend
}

#[allow(unused)]
pub fn document_store() -> Arc<MemoryDocumentStore> {
    let store = MemoryDocumentStore::new();
    let orders = [
        ("o-1", json!({"buyerInfo": {"id": "u-1"}, "sellerInfo": {"id": "u-9"}, "status": "pending", "createdAt": 100})),
        ("o-2", json!({"buyerInfo": {"id": "u-1"}, "sellerInfo": {"id": "u-9"}, "status": "delivered", "createdAt": 300})),
        ("o-3", json!({"buyerInfo": {"id": "u-1"}, "sellerInfo": {"id": "u-8"}, "status": "completed", "createdAt": 200})),
        ("o-4", json!({"buyerInfo": {"id": "u-1"}, "sellerInfo": {"id": "u-8"}, "status": "cancelled", "createdAt": 250})),
        ("o-5", json!({"buyerInfo": {"id": "u-2"}, "sellerInfo": {"id": "u-1"}, "status": "pending", "createdAt": 150})),
        ("o-6", json!({"buyerInfo": {"id": "u-2"}, "sellerInfo": {"id": "u-1"}, "status": "completed", "createdAt": 500})),
    ];
    for (id, data) in orders {
        store.insert("orders", id, object(data));
    }
    for record in catalog_records() {
        let mut record = record;
        let id = record.remove("objectID").and_then(|id| id.as_str().map(str::to_string)).expect("fixture id");
        store.insert("products", id, record);
    }
    Arc::new(store)
}

#[allow(unused)]
pub async fn registry() -> ToolRegistry {
    let search = ProductSearch::new(catalog().await, QueryCompiler::default());
    ToolRegistry::marketplace(search, document_store())
}

/// Counts calls and always fails with the configured error
#[allow(unused)]
pub struct FailingBackend {
    pub error: SearchError,
    pub calls: AtomicUsize,
}

#[allow(unused)]
impl FailingBackend {
    pub fn new(error: SearchError) -> Arc<Self> { Arc::new(Self { error, calls: AtomicUsize::new(0) }) }

    pub fn calls(&self) -> usize { self.calls.load(Ordering::SeqCst) }
}

#[async_trait]
impl SearchBackend for FailingBackend {
    async fn search(&self, _query: &CompiledQuery) -> Result<Vec<RawHit>, SearchError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(self.error.clone())
    }
}

#[allow(unused)]
pub fn ids(value: &Value) -> Vec<String> {
    value.as_array().into_iter().flatten().filter_map(|record| record.get("id").and_then(Value::as_str).map(str::to_string)).collect()
}
