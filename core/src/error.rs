use shoppe_query::FilterError;
use thiserror::Error;

/// Failure while executing a compiled query against the search backend
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SearchError {
    #[error("search backend unavailable")]
    BackendUnavailable,

    #[error("search backend error: {message}")]
    BackendError { message: String },
}

impl SearchError {
    pub fn backend(message: impl Into<String>) -> Self { SearchError::BackendError { message: message.into() } }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("document store unavailable")]
    Unavailable,

    #[error("collection not found: {0}")]
    CollectionNotFound(String),

    #[error("backend error: {0}")]
    Backend(Box<dyn std::error::Error + Send + Sync + 'static>),
}

impl StoreError {
    pub fn backend<E: std::error::Error + Send + Sync + 'static>(err: E) -> Self { StoreError::Backend(Box::new(err)) }
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("invalid input: {0}")]
    InvalidInput(FilterError),

    #[error("store error: {0}")]
    Store(StoreError),

    #[error("no actor in tool context")]
    MissingActor,

    #[error("unknown tool: {0}")]
    UnknownTool(String),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl From<FilterError> for ToolError {
    fn from(err: FilterError) -> Self { ToolError::InvalidInput(err) }
}

impl From<StoreError> for ToolError {
    fn from(err: StoreError) -> Self { ToolError::Store(err) }
}

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ConfigError {
    #[error("missing environment variable: {0}")]
    Missing(&'static str),

    #[error("invalid value for {name}: {value:?}")]
    Invalid { name: &'static str, value: String },
}
