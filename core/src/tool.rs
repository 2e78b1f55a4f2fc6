//! Callable tools exposed to the assistant, and the registry that dispatches them.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{json, Value};
use shoppe_query::{Category, Condition, Currency, Gender, LetteredSize, SortOrder, SubCategory};
use tracing::debug;

use crate::context::{ActorId, ToolContext};
use crate::error::ToolError;
use crate::lookup::{available_products, fetch_records, OwnerLookup};
use crate::search::ProductSearch;
use crate::store::DocumentStore;

#[async_trait]
pub trait Tool: Send + Sync {
    fn id(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// JSON Schema of the accepted input object
    fn input_schema(&self) -> Value;

    /// JSON Schema of the value `call` answers with
    fn output_schema(&self) -> Value;

    async fn call(&self, context: &ToolContext, input: Value) -> Result<Value, ToolError>;
}

fn literals<T: std::fmt::Display>(values: &[T]) -> Vec<String> { values.iter().map(|v| v.to_string()).collect() }

fn record_list_schema() -> Value { json!({"type": "array", "items": {"type": "object", "properties": {"id": {"type": "string"}}, "required": ["id"]}}) }

fn empty_input_schema() -> Value { json!({"type": "object", "properties": {}}) }

pub struct SearchProductsTool {
    search: ProductSearch,
}

impl SearchProductsTool {
    pub fn new(search: ProductSearch) -> Self { Self { search } }
}

#[async_trait]
impl Tool for SearchProductsTool {
    fn id(&self) -> &'static str { "search-products" }

    fn description(&self) -> &'static str { "Search available products by text, category, price range, discount, size, gender, condition and currency" }

    fn input_schema(&self) -> Value {
        let mut sizes = literals(LetteredSize::ALL);
        sizes.push("numeric sizes such as 42".to_string());
        json!({
            "type": "object",
            "properties": {
                "query": {"type": "string", "description": "Free-text search term"},
                "category": {
                    "anyOf": [
                        {"type": "string", "enum": literals(Category::ALL)},
                        {"type": "array", "items": {"type": "string", "enum": literals(Category::ALL)}}
                    ]
                },
                "subCategory": {"type": "string", "enum": literals(SubCategory::ALL)},
                "minPrice": {"type": "number", "minimum": 0},
                "maxPrice": {"type": "number", "minimum": 0},
                "discountPercentage": {"type": "number", "minimum": 0, "description": "Minimum discount percentage"},
                "size": {
                    "type": "array",
                    "items": {"type": "string", "pattern": "^(One Size|XS|S|M|L|XL|XXL|[0-9]+)$"},
                    "description": format!("Any of: {}", sizes.join(", "))
                },
                "gender": {"type": "string", "enum": literals(Gender::ALL)},
                "condition": {"type": "string", "enum": literals(Condition::ALL)},
                "currency": {"type": ["string", "null"], "enum": [Value::Null, Currency::Usd.as_str(), Currency::Euro.as_str(), Currency::Ngn.as_str()], "default": Currency::default().as_str()},
                "order": {"type": "string", "enum": literals(SortOrder::ALL)}
            }
        })
    }

    fn output_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "success": {"type": "boolean"},
                "count": {"type": "integer", "minimum": 0},
                "products": {"type": "array", "items": {"type": "object", "properties": {"id": {"type": "string"}, "name": {"type": "string"}, "price": {"type": "number"}}, "required": ["id", "name", "price"]}},
                "message": {"type": "string"}
            },
            "required": ["success", "count"]
        })
    }

    async fn call(&self, _context: &ToolContext, input: Value) -> Result<Value, ToolError> {
        let envelope = self.search.search_input(&input).await?;
        Ok(serde_json::to_value(envelope)?)
    }
}

/// One of the signed-in user's own order, sale or listing lookups
pub struct LookupTool {
    lookup: OwnerLookup,
    store: Arc<dyn DocumentStore>,
}

impl LookupTool {
    pub fn new(lookup: OwnerLookup, store: Arc<dyn DocumentStore>) -> Self { Self { lookup, store } }

    pub fn lookup(&self) -> OwnerLookup { self.lookup }

    fn actor<'a>(&self, context: &'a ToolContext) -> Result<&'a ActorId, ToolError> {
        context.actor().ok_or_else(|| {
            debug!("{} called without an actor", self.id());
            ToolError::MissingActor
        })
    }
}

#[async_trait]
impl Tool for LookupTool {
    fn id(&self) -> &'static str {
        match self.lookup {
            OwnerLookup::PendingOrders => "get-pending-orders",
            OwnerLookup::CompletedOrders => "get-completed-orders",
            OwnerLookup::PendingSales => "get-pending-sales",
            OwnerLookup::CompletedSales => "get-completed-sales",
            OwnerLookup::ListedProducts => "get-user-products",
        }
    }

    fn description(&self) -> &'static str {
        match self.lookup {
            OwnerLookup::PendingOrders => "Orders the user has placed that are pending or delivered, newest first",
            OwnerLookup::CompletedOrders => "Orders the user has placed that are completed, newest first",
            OwnerLookup::PendingSales => "Orders for the user's listings that are pending or delivered, newest first",
            OwnerLookup::CompletedSales => "Orders for the user's listings that are completed, newest first",
            OwnerLookup::ListedProducts => "Products the user has listed, newest first",
        }
    }

    fn input_schema(&self) -> Value { empty_input_schema() }

    fn output_schema(&self) -> Value { record_list_schema() }

    async fn call(&self, context: &ToolContext, _input: Value) -> Result<Value, ToolError> {
        let actor = self.actor(context)?;
        let records = fetch_records(&self.store, self.lookup.name(), &self.lookup.query(actor)).await?;
        Ok(Value::Array(records.into_iter().map(Value::Object).collect()))
    }
}

/// Every available listing; needs no signed-in user
pub struct AvailableProductsTool {
    store: Arc<dyn DocumentStore>,
}

impl AvailableProductsTool {
    pub fn new(store: Arc<dyn DocumentStore>) -> Self { Self { store } }
}

#[async_trait]
impl Tool for AvailableProductsTool {
    fn id(&self) -> &'static str { "get-products" }

    fn description(&self) -> &'static str { "All products currently available for sale" }

    fn input_schema(&self) -> Value { empty_input_schema() }

    fn output_schema(&self) -> Value { record_list_schema() }

    async fn call(&self, _context: &ToolContext, _input: Value) -> Result<Value, ToolError> {
        let records = fetch_records(&self.store, "available products", &available_products()).await?;
        Ok(Value::Array(records.into_iter().map(Value::Object).collect()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolDescriptor {
    pub id: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
    pub output_schema: Value,
}

/// Tools keyed by their unique id
#[derive(Default, Clone)]
pub struct ToolRegistry {
    tools: BTreeMap<&'static str, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self { Self::default() }

    /// The full marketplace tool set over one search pipeline and one document store
    pub fn marketplace(search: ProductSearch, store: Arc<dyn DocumentStore>) -> Self {
        let mut registry = Self::new();
        registry.register(SearchProductsTool::new(search));
        registry.register(AvailableProductsTool::new(store.clone()));
        for lookup in OwnerLookup::ALL {
            registry.register(LookupTool::new(lookup, store.clone()));
        }
        registry
    }

    /// Add a tool, replacing any tool already registered under the same id
    pub fn register<T: Tool + 'static>(&mut self, tool: T) -> Option<Arc<dyn Tool>> { self.tools.insert(tool.id(), Arc::new(tool)) }

    pub fn get(&self, id: &str) -> Option<&Arc<dyn Tool>> { self.tools.get(id) }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ { self.tools.keys().copied() }

    pub fn list(&self) -> Vec<ToolDescriptor> {
        self.tools
            .values()
            .map(|tool| ToolDescriptor { id: tool.id(), description: tool.description(), input_schema: tool.input_schema(), output_schema: tool.output_schema() })
            .collect()
    }

    pub fn len(&self) -> usize { self.tools.len() }

    pub fn is_empty(&self) -> bool { self.tools.is_empty() }

    pub async fn call(&self, id: &str, context: &ToolContext, input: Value) -> Result<Value, ToolError> {
        let tool = self.get(id).ok_or_else(|| ToolError::UnknownTool(id.to_string()))?;
        debug!("ToolRegistry.call({}) actor={:?}", id, context.actor().map(ActorId::as_str));
        tool.call(context, input).await
    }
}

impl std::fmt::Debug for ToolRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.debug_set().entries(self.tools.keys()).finish() }
}
