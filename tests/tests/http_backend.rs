mod common;

use std::collections::HashMap;
use std::sync::Arc;

use anyhow::Result;
use serde_json::json;
use shoppe_core::config::{SEARCH_API_KEY, SEARCH_APP_ID, SEARCH_ENDPOINT, SEARCH_TIMEOUT_MS};
use shoppe_core::{ProductSearch, ShoppeConfig, ToolContext, ToolRegistry};
use shoppe_query::QueryCompiler;
use shoppe_search_http::HttpSearchBackend;

use common::*;

#[tokio::test]
async fn unreachable_backend_reports_failure() -> Result<()> {
    let vars: HashMap<&str, &str> = HashMap::from([(SEARCH_APP_ID, "APP"), (SEARCH_API_KEY, "key"), (SEARCH_ENDPOINT, "http://127.0.0.1:1"), (SEARCH_TIMEOUT_MS, "500")]);
    let config = ShoppeConfig::from_lookup(|name| vars.get(name).map(|v| v.to_string()))?;

    let backend = Arc::new(HttpSearchBackend::new(&config.search)?);
    let search = ProductSearch::new(backend, QueryCompiler::new(config.search.index_name.clone()));
    let registry = ToolRegistry::marketplace(search, document_store());

    let output = registry.call("search-products", &ToolContext::anonymous(), json!({"query": "sneakers"})).await?;
    assert_eq!(output, json!({"success": false, "count": 0, "message": "search backend unavailable"}));
    Ok(())
}
