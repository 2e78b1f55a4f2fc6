mod common;

use anyhow::Result;
use serde_json::{json, Value};
use shoppe_core::{ProductSearch, SearchEnvelope, SearchError, ToolContext, ToolError, ToolRegistry};
use shoppe_query::{FilterError, FilterSpec, QueryCompiler};

use common::*;

async fn search(input: Value) -> Result<SearchEnvelope> {
    let output = registry().await.call("search-products", &ToolContext::anonymous(), input).await?;
    Ok(serde_json::from_value(output)?)
}

fn product_ids(envelope: &SearchEnvelope) -> Vec<&str> { envelope.products().iter().map(|p| p.id.as_str()).collect() }

#[tokio::test]
async fn sneakers_under_price_floor_sorted_by_price() -> Result<()> {
    let envelope = search(json!({"query": "sneakers", "category": ["Shoes"], "minPrice": 5000, "order": "PriceLowToHigh"})).await?;

    assert!(envelope.success);
    assert_eq!(envelope.count, 2);
    assert_eq!(product_ids(&envelope), vec!["p-1", "p-2"]);
    assert_eq!(envelope.products()[0].price, 6000.0);
    assert_eq!(envelope.products()[0].size, vec!["42", "43"]);
    Ok(())
}

#[tokio::test]
async fn sizes_are_alternatives() -> Result<()> {
    let envelope = search(json!({"size": ["42", "44"]})).await?;
    assert_eq!(product_ids(&envelope), vec!["p-1", "p-2", "p-3"]);
    Ok(())
}

#[tokio::test]
async fn sold_listings_never_match() -> Result<()> {
    let envelope = search(json!({"query": "sold"})).await?;
    assert!(envelope.success);
    assert_eq!(envelope.count, 0);
    Ok(())
}

#[tokio::test]
async fn discount_and_currency() -> Result<()> {
    assert_eq!(product_ids(&search(json!({"discountPercentage": 20})).await?), vec!["p-5"]);
    assert_eq!(product_ids(&search(json!({"currency": "$ USD"})).await?), vec!["p-5"]);
    // an explicit null currency means NGN
    assert_eq!(product_ids(&search(json!({"currency": null, "order": "Newest"})).await?), vec!["p-1", "p-3", "p-2"]);
    Ok(())
}

#[tokio::test]
async fn gender_and_condition() -> Result<()> {
    assert_eq!(product_ids(&search(json!({"gender": "Men", "condition": "new"})).await?), vec!["p-5"]);
    assert_eq!(product_ids(&search(json!({"gender": "Men", "order": "Popular"})).await?), vec!["p-2", "p-5"]);
    Ok(())
}

#[tokio::test]
async fn sub_category_does_not_narrow() -> Result<()> {
    let with_sub = search(json!({"category": "Shoes", "subCategory": "Boots"})).await?;
    let without = search(json!({"category": "Shoes"})).await?;
    assert_eq!(with_sub, without);
    assert_eq!(product_ids(&with_sub), vec!["p-1", "p-2", "p-3"]);
    Ok(())
}

#[tokio::test]
async fn invalid_gender_is_rejected() -> Result<()> {
    let err = registry().await.call("search-products", &ToolContext::anonymous(), json!({"query": "shirt", "gender": "Other"})).await.unwrap_err();
    match err {
        ToolError::InvalidInput(FilterError::InvalidFilterValue { field, value }) => {
            assert_eq!(field, "gender");
            assert_eq!(value, "Other");
        }
        other => panic!("expected InvalidInput, got {:?}", other),
    }
    Ok(())
}

#[tokio::test]
async fn backend_failure_becomes_failed_envelope() -> Result<()> {
    let backend = FailingBackend::new(SearchError::BackendUnavailable);
    let search = ProductSearch::new(backend.clone(), QueryCompiler::default());
    let registry = ToolRegistry::marketplace(search, document_store());

    let output = registry.call("search-products", &ToolContext::anonymous(), json!({"query": "bag"})).await?;
    assert_eq!(output["success"], json!(false));
    assert_eq!(output["count"], json!(0));
    assert!(output.get("products").is_none());
    assert!(!output["message"].as_str().unwrap_or_default().is_empty());
    assert_eq!(backend.calls(), 1);

    // invalid input never reaches the backend
    assert!(registry.call("search-products", &ToolContext::anonymous(), json!({"minPrice": -1})).await.is_err());
    assert_eq!(backend.calls(), 1);
    Ok(())
}

#[tokio::test]
async fn compiled_scenario_shape() -> Result<()> {
    let spec = FilterSpec::try_from(r#"{"query": "sneakers", "category": ["Shoes"], "minPrice": 5000, "order": "PriceLowToHigh"}"#)?;
    let compiled = QueryCompiler::default().compile(&spec);
    assert_eq!(compiled.search_term, "sneakers");
    assert_eq!(compiled.facet_filters(), vec![vec!["status:available"], vec!["category:Shoes"]]);
    assert_eq!(compiled.numeric_filters(), vec!["price>=5000"]);
    assert_eq!(compiled.index_selector, "products_price_asc");
    Ok(())
}
