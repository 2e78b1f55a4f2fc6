use thiserror::Error;

/// Errors raised while turning raw tool input into a [`crate::FilterSpec`].
///
/// The compiler itself is total; only validation fails.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum FilterError {
    #[error("invalid value for {field}: {value}")]
    InvalidFilterValue { field: &'static str, value: String },
    #[error("malformed filter input: {0}")]
    MalformedInput(String),
}

impl FilterError {
    pub(crate) fn invalid(field: &'static str, value: impl Into<String>) -> Self {
        FilterError::InvalidFilterValue { field, value: value.into() }
    }

    /// The input field the error refers to, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            FilterError::InvalidFilterValue { field, .. } => Some(*field),
            FilterError::MalformedInput(_) => None,
        }
    }
}

impl From<serde_json::Error> for FilterError {
    fn from(err: serde_json::Error) -> Self { FilterError::MalformedInput(err.to_string()) }
}
