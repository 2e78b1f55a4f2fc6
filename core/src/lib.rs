//! # Shoppe core
//!
//! The tools a marketplace assistant calls during a conversation, and the two seams they run
//! against: a faceted [`SearchBackend`] for catalog search and a [`DocumentStore`] for the
//! signed-in user's own orders, sales and listings.

pub mod config;
pub mod context;
pub mod error;
pub mod lookup;
pub mod product;
pub mod search;
pub mod store;
pub mod tool;

pub use config::{SearchConfig, ShoppeConfig};
pub use context::{ActorId, ToolContext};
pub use error::{ConfigError, SearchError, StoreError, ToolError};
pub use lookup::OwnerLookup;
pub use product::{Product, RawHit, SearchEnvelope};
pub use search::{ProductSearch, SearchBackend};
pub use store::{Direction, Document, DocumentStore, FieldFilter, OrderBy, StoreQuery};
pub use tool::{Tool, ToolDescriptor, ToolRegistry};

pub use shoppe_query as query;
