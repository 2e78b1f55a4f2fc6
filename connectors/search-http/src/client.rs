use async_trait::async_trait;
use reqwest::StatusCode;
use shoppe_core::{RawHit, SearchBackend, SearchConfig, SearchError};
use shoppe_query::CompiledQuery;
use tracing::{debug, warn};
use url::Url;

use crate::wire::{MultiQueryRequest, MultiQueryResponse};

const APPLICATION_ID_HEADER: &str = "X-Algolia-Application-Id";
const API_KEY_HEADER: &str = "X-Algolia-API-Key";
const QUERIES_PATH: &str = "1/indexes/*/queries";

/// Search client holding one pooled HTTP connection set for the life of the process.
///
/// Every call is a single multi-query request carrying one query; there are no retries.
#[derive(Clone)]
pub struct HttpSearchBackend {
    client: reqwest::Client,
    queries_url: Url,
    app_id: String,
    api_key: String,
}

impl HttpSearchBackend {
    pub fn new(config: &SearchConfig) -> Result<Self, SearchError> {
        let queries_url = Self::queries_url(&config.endpoint)?;
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| SearchError::backend(format!("failed to build http client: {}", e)))?;
        debug!("HttpSearchBackend::new {} (timeout {:?})", queries_url, config.timeout);
        Ok(Self { client, queries_url, app_id: config.app_id.clone(), api_key: config.api_key.clone() })
    }

    fn queries_url(endpoint: &str) -> Result<Url, SearchError> {
        let mut base = Url::parse(endpoint).map_err(|e| SearchError::backend(format!("invalid search endpoint {:?}: {}", endpoint, e)))?;
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }
        base.join(QUERIES_PATH).map_err(|e| SearchError::backend(format!("invalid search endpoint {:?}: {}", endpoint, e)))
    }

    pub fn url(&self) -> &Url { &self.queries_url }
}

fn request_error(err: reqwest::Error) -> SearchError {
    if err.is_connect() || err.is_timeout() {
        warn!("search backend unreachable: {}", err);
        SearchError::BackendUnavailable
    } else {
        SearchError::backend(err.to_string())
    }
}

#[async_trait]
impl SearchBackend for HttpSearchBackend {
    async fn search(&self, query: &CompiledQuery) -> Result<Vec<RawHit>, SearchError> {
        debug!("HttpSearchBackend.search {} {:?}", query.index_selector, query.search_term);
        let response = self
            .client
            .post(self.queries_url.clone())
            .header(APPLICATION_ID_HEADER, &self.app_id)
            .header(API_KEY_HEADER, &self.api_key)
            .json(&MultiQueryRequest::from(query))
            .send()
            .await
            .map_err(request_error)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!("search backend answered {} for {}: {}", status, query.index_selector, body);
            return Err(match status {
                StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT => SearchError::BackendUnavailable,
                _ => SearchError::backend(format!("status {}: {}", status, body)),
            });
        }

        let body: MultiQueryResponse = response.json().await.map_err(|e| SearchError::backend(format!("unreadable response: {}", e)))?;
        body.into_hits().ok_or_else(|| SearchError::backend("response carried no results"))
    }
}

impl std::fmt::Debug for HttpSearchBackend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HttpSearchBackend").field("queries_url", &self.queries_url.as_str()).field("app_id", &self.app_id).finish_non_exhaustive()
    }
}
