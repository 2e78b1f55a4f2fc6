mod common;

use anyhow::Result;
use serde_json::json;
use shoppe_core::{ToolContext, ToolError};

use common::*;

#[tokio::test]
async fn lists_every_tool_once() -> Result<()> {
    let registry = registry().await;
    let mut ids: Vec<&str> = registry.list().iter().map(|descriptor| descriptor.id).collect();
    ids.sort();
    assert_eq!(
        ids,
        vec!["get-completed-orders", "get-completed-sales", "get-pending-orders", "get-pending-sales", "get-products", "get-user-products", "search-products"]
    );
    Ok(())
}

#[tokio::test]
async fn schemas_describe_inputs_and_outputs() -> Result<()> {
    let registry = registry().await;
    for descriptor in registry.list() {
        assert_eq!(descriptor.input_schema["type"], json!("object"), "{}", descriptor.id);
        assert!(descriptor.output_schema.is_object(), "{}", descriptor.id);
    }

    let search = registry.get("search-products").expect("search tool");
    let input = search.input_schema();
    assert_eq!(input["properties"]["order"]["enum"], json!(["Popular", "Newest", "Oldest", "PriceHighToLow", "PriceLowToHigh"]));
    assert_eq!(input["properties"]["condition"]["enum"], json!(["new", "used"]));
    assert_eq!(search.output_schema()["required"], json!(["success", "count"]));
    Ok(())
}

#[tokio::test]
async fn unknown_tool_is_an_error() -> Result<()> {
    let registry = registry().await;
    let err = registry.call("delete-everything", &ToolContext::for_actor("u-1"), json!({})).await.unwrap_err();
    assert!(matches!(err, ToolError::UnknownTool(ref id) if id == "delete-everything"));
    assert_eq!(err.to_string(), "unknown tool: delete-everything");
    Ok(())
}

#[tokio::test]
async fn malformed_search_input() -> Result<()> {
    let registry = registry().await;
    let err = registry.call("search-products", &ToolContext::anonymous(), json!(["not", "an", "object"])).await.unwrap_err();
    assert!(matches!(err, ToolError::InvalidInput(_)), "{:?}", err);
    Ok(())
}
