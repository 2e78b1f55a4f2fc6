mod common;

use anyhow::Result;
use serde_json::json;
use shoppe_core::{OwnerLookup, StoreError, StoreQuery, ToolContext, ToolError, ToolRegistry};
use shoppe_core::{DocumentStore, ProductSearch};
use shoppe_query::QueryCompiler;
use shoppe_storage_memory::{MemoryDocumentStore, MemorySearchBackend};
use std::sync::Arc;

use common::*;

#[tokio::test]
async fn buyer_orders() -> Result<()> {
    let registry = registry().await;
    let buyer = ToolContext::for_actor("u-1");

    assert_eq!(ids(&registry.call("get-pending-orders", &buyer, json!({})).await?), vec!["o-2", "o-1"]);
    assert_eq!(ids(&registry.call("get-completed-orders", &buyer, json!({})).await?), vec!["o-3"]);
    Ok(())
}

#[tokio::test]
async fn seller_sales() -> Result<()> {
    let registry = registry().await;
    let seller = ToolContext::for_actor("u-1");

    assert_eq!(ids(&registry.call("get-pending-sales", &seller, json!({})).await?), vec!["o-5"]);
    assert_eq!(ids(&registry.call("get-completed-sales", &seller, json!({})).await?), vec!["o-6"]);

    let u9 = ToolContext::for_actor("u-9");
    assert_eq!(ids(&registry.call("get-pending-sales", &u9, json!({})).await?), vec!["o-2", "o-1"]);
    Ok(())
}

#[tokio::test]
async fn cancelled_orders_are_never_listed() -> Result<()> {
    let registry = registry().await;
    let buyer = ToolContext::for_actor("u-1");
    for id in ["get-pending-orders", "get-completed-orders"] {
        assert!(!ids(&registry.call(id, &buyer, json!({})).await?).contains(&"o-4".to_string()));
    }
    Ok(())
}

#[tokio::test]
async fn listed_products_newest_first() -> Result<()> {
    let registry = registry().await;
    let output = registry.call("get-user-products", &ToolContext::for_actor("u-9"), json!({})).await?;
    assert_eq!(ids(&output), vec!["p-5", "p-1", "p-2"]);
    assert_eq!(output[0]["sellerId"], json!("u-9"));
    Ok(())
}

#[tokio::test]
async fn available_products_for_anyone() -> Result<()> {
    let registry = registry().await;
    let output = registry.call("get-products", &ToolContext::anonymous(), json!({})).await?;
    assert_eq!(ids(&output), vec!["p-1", "p-2", "p-3", "p-5"]);
    Ok(())
}

#[tokio::test]
async fn owner_lookups_need_an_actor() -> Result<()> {
    let registry = registry().await;
    for lookup in OwnerLookup::ALL {
        let id = match lookup {
            OwnerLookup::PendingOrders => "get-pending-orders",
            OwnerLookup::CompletedOrders => "get-completed-orders",
            OwnerLookup::PendingSales => "get-pending-sales",
            OwnerLookup::CompletedSales => "get-completed-sales",
            OwnerLookup::ListedProducts => "get-user-products",
        };
        let err = registry.call(id, &ToolContext::anonymous(), json!({})).await.unwrap_err();
        assert!(matches!(err, ToolError::MissingActor), "{}: {:?}", id, err);
    }
    Ok(())
}

#[tokio::test]
async fn unknown_actor_gets_nothing() -> Result<()> {
    let registry = registry().await;
    let stranger = ToolContext::for_actor("u-404");
    assert!(ids(&registry.call("get-pending-orders", &stranger, json!({})).await?).is_empty());
    assert!(ids(&registry.call("get-user-products", &stranger, json!({})).await?).is_empty());
    Ok(())
}

#[tokio::test]
async fn store_errors_propagate() -> Result<()> {
    // no collections at all
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryDocumentStore::new());
    let registry = ToolRegistry::marketplace(ProductSearch::new(Arc::new(MemorySearchBackend::default()), QueryCompiler::default()), store.clone());

    let err = registry.call("get-completed-orders", &ToolContext::for_actor("u-1"), json!({})).await.unwrap_err();
    assert!(matches!(err, ToolError::Store(StoreError::CollectionNotFound(ref name)) if name == "orders"), "{:?}", err);

    assert!(store.query(&StoreQuery::collection("products")).await.is_err());
    Ok(())
}
