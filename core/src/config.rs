//! Process configuration, supplied through the environment.
//!
//! Credentials and identifiers are read once at startup; the search client built from them
//! lives for the whole process.

use std::time::Duration;

use shoppe_query::DEFAULT_INDEX_NAME;

use crate::error::ConfigError;

pub const SEARCH_APP_ID: &str = "SHOPPE_SEARCH_APP_ID";
pub const SEARCH_API_KEY: &str = "SHOPPE_SEARCH_API_KEY";
pub const SEARCH_ENDPOINT: &str = "SHOPPE_SEARCH_ENDPOINT";
pub const SEARCH_INDEX: &str = "SHOPPE_SEARCH_INDEX";
pub const SEARCH_TIMEOUT_MS: &str = "SHOPPE_SEARCH_TIMEOUT_MS";
pub const STORE_URL: &str = "SHOPPE_STORE_URL";

const DEFAULT_TIMEOUT: Duration = Duration::from_millis(5000);

#[derive(Debug, Clone, PartialEq)]
pub struct ShoppeConfig {
    pub search: SearchConfig,
    /// Connection string for the document store, when one is configured
    pub store_url: Option<String>,
}

#[derive(Clone, PartialEq)]
pub struct SearchConfig {
    pub app_id: String,
    pub api_key: String,
    pub endpoint: String,
    /// Base catalog index; sorted replicas are derived from it
    pub index_name: String,
    pub timeout: Duration,
}

impl std::fmt::Debug for SearchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchConfig")
            .field("app_id", &self.app_id)
            .field("api_key", &"<redacted>")
            .field("endpoint", &self.endpoint)
            .field("index_name", &self.index_name)
            .field("timeout", &self.timeout)
            .finish()
    }
}

impl SearchConfig {
    pub fn new(app_id: impl Into<String>, api_key: impl Into<String>) -> Self {
        let app_id = app_id.into();
        Self {
            endpoint: default_endpoint(&app_id),
            app_id,
            api_key: api_key.into(),
            index_name: DEFAULT_INDEX_NAME.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

fn default_endpoint(app_id: &str) -> String { format!("https://{}-dsn.algolia.net", app_id.to_lowercase()) }

impl ShoppeConfig {
    pub fn from_env() -> Result<Self, ConfigError> { Self::from_lookup(|name| std::env::var(name).ok()) }

    /// Build from any variable source; empty values count as unset
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).filter(|value| !value.trim().is_empty());
        let required = |name: &'static str| var(name).ok_or(ConfigError::Missing(name));

        let app_id = required(SEARCH_APP_ID)?;
        let api_key = required(SEARCH_API_KEY)?;
        let mut search = SearchConfig::new(app_id, api_key);
        if let Some(endpoint) = var(SEARCH_ENDPOINT) {
            search.endpoint = endpoint.trim_end_matches('/').to_string();
        }
        if let Some(index_name) = var(SEARCH_INDEX) {
            search.index_name = index_name;
        }
        if let Some(timeout) = var(SEARCH_TIMEOUT_MS) {
            let millis = timeout.trim().parse::<u64>().map_err(|_| ConfigError::Invalid { name: SEARCH_TIMEOUT_MS, value: timeout.clone() })?;
            search.timeout = Duration::from_millis(millis);
        }

        Ok(Self { search, store_url: var(STORE_URL) })
    }
}
