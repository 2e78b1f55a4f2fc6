//! [`SearchBackend`](shoppe_core::SearchBackend) over the hosted engine's multi-query REST
//! endpoint, speaking the facetFilters/numericFilters dialect directly.

mod client;
mod wire;

pub use client::*;
