//! Owner-scoped lookups over orders and listings.
//!
//! An order document is shared by both parties: the buyer sees it as an order, the seller as a
//! sale. Orders move through `pending`, `delivered`, `completed` and `cancelled`; an order that
//! has not reached the buyer's hands yet (`pending` or `delivered`) is still pending.

use std::sync::Arc;

use serde_json::{Map, Value};
use tracing::{debug, error};

use crate::context::ActorId;
use crate::error::StoreError;
use crate::store::{Direction, DocumentStore, StoreQuery};

pub const ORDERS: &str = "orders";
pub const PRODUCTS: &str = "products";
pub const CREATED_AT: &str = "createdAt";

const PENDING_STATUSES: [&str; 2] = ["pending", "delivered"];
const COMPLETED_STATUS: &str = "completed";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OwnerLookup {
    PendingOrders,
    CompletedOrders,
    PendingSales,
    CompletedSales,
    ListedProducts,
}

impl OwnerLookup {
    pub const ALL: [OwnerLookup; 5] =
        [OwnerLookup::PendingOrders, OwnerLookup::CompletedOrders, OwnerLookup::PendingSales, OwnerLookup::CompletedSales, OwnerLookup::ListedProducts];

    pub fn query(&self, actor: &ActorId) -> StoreQuery {
        let query = match self {
            OwnerLookup::PendingOrders => StoreQuery::collection(ORDERS).where_eq("buyerInfo.id", actor.as_str()).where_in("status", PENDING_STATUSES),
            OwnerLookup::CompletedOrders => StoreQuery::collection(ORDERS).where_eq("buyerInfo.id", actor.as_str()).where_eq("status", COMPLETED_STATUS),
            OwnerLookup::PendingSales => StoreQuery::collection(ORDERS).where_eq("sellerInfo.id", actor.as_str()).where_in("status", PENDING_STATUSES),
            OwnerLookup::CompletedSales => StoreQuery::collection(ORDERS).where_eq("sellerInfo.id", actor.as_str()).where_eq("status", COMPLETED_STATUS),
            OwnerLookup::ListedProducts => StoreQuery::collection(PRODUCTS).where_eq("sellerId", actor.as_str()),
        };
        query.order_by(CREATED_AT, Direction::Desc)
    }

    pub fn name(&self) -> &'static str {
        match self {
            OwnerLookup::PendingOrders => "pending orders",
            OwnerLookup::CompletedOrders => "completed orders",
            OwnerLookup::PendingSales => "pending sales",
            OwnerLookup::CompletedSales => "completed sales",
            OwnerLookup::ListedProducts => "listed products",
        }
    }
}

/// Every listing currently up for sale, in store order
pub fn available_products() -> StoreQuery { StoreQuery::collection(PRODUCTS).where_eq("status", "available") }

/// Run a store query and merge each document's identifier into its record.
/// Store failures are logged and handed back to the caller.
pub async fn fetch_records(store: &Arc<dyn DocumentStore>, name: &str, query: &StoreQuery) -> Result<Vec<Map<String, Value>>, StoreError> {
    debug!("fetch_records({}): {:?}", name, query);
    match store.query(query).await {
        Ok(documents) => Ok(documents.into_iter().map(|document| document.into_record()).collect()),
        Err(err) => {
            error!("Error fetching {}: {}", name, err);
            Err(err)
        }
    }
}
