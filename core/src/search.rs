use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use shoppe_query::{CompiledQuery, FilterError, FilterSpec, QueryCompiler};
use tracing::{debug, info, warn};

use crate::error::SearchError;
use crate::product::{map_hits, RawHit, SearchEnvelope};

/// Executes compiled queries against a faceted search backend.
///
/// One call is one backend request; implementations do not retry. A single instance is built
/// at startup and shared by every request.
#[async_trait]
pub trait SearchBackend: Send + Sync {
    /// Hits for `query` from the index named by `query.index_selector`, in backend order
    async fn search(&self, query: &CompiledQuery) -> Result<Vec<RawHit>, SearchError>;
}

/// The validate → compile → execute → map pipeline behind the product search tool
#[derive(Clone)]
pub struct ProductSearch {
    backend: Arc<dyn SearchBackend>,
    compiler: QueryCompiler,
}

impl ProductSearch {
    pub fn new(backend: Arc<dyn SearchBackend>, compiler: QueryCompiler) -> Self { Self { backend, compiler } }

    pub fn compiler(&self) -> &QueryCompiler { &self.compiler }

    /// Search with a spec built in code. Out-of-range bounds and backend failures are folded
    /// into the envelope; the backend is not called for the former.
    pub async fn search(&self, spec: &FilterSpec) -> SearchEnvelope {
        if let Err(err) = spec.validate() {
            warn!("ProductSearch.search rejected {:?}: {}", spec, err);
            return SearchEnvelope::failed(err.to_string());
        }
        let query = self.compiler.compile(spec);
        let result = match self.backend.search(&query).await {
            Ok(hits) => map_hits(hits),
            Err(err) => Err(err),
        };

        match &result {
            Ok(products) => info!("ProductSearch({}).search {:?}: {} products", query.index_selector, query.search_term, products.len()),
            Err(err) => warn!("ProductSearch({}).search {:?} failed: {}", query.index_selector, query.search_term, err),
        }
        result.into()
    }

    /// Validate raw tool input, then search. Invalid input is rejected before any backend call.
    pub async fn search_input(&self, input: &Value) -> Result<SearchEnvelope, FilterError> {
        let spec = FilterSpec::try_from(input).inspect_err(|err| debug!("ProductSearch.search_input rejected: {}", err))?;
        Ok(self.search(&spec).await)
    }
}

impl std::fmt::Debug for ProductSearch {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProductSearch").field("base_index", &self.compiler.base_index()).finish_non_exhaustive()
    }
}
