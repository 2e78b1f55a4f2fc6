//! The backend-agnostic compiled query and its wire encoding.

use serde::Serialize;

/// Attribute names in the catalog index
pub mod fields {
    pub const STATUS: &str = "status";
    pub const CURRENCY: &str = "currency";
    pub const GENDER: &str = "gender";
    pub const CONDITION: &str = "condition";
    pub const SIZE: &str = "size";
    pub const CATEGORY: &str = "category";
    pub const PRICE: &str = "price";
    pub const DISCOUNT_PERCENTAGE: &str = "discountPercentage";
}

/// `field == value` on a categorical attribute
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct FacetClause {
    pub field: String,
    pub value: String,
}

impl FacetClause {
    pub fn new(field: impl Into<String>, value: impl Into<String>) -> Self { Self { field: field.into(), value: value.into() } }

    /// `field:value`
    pub fn encode(&self) -> String { format!("{}:{}", self.field, self.value) }
}

impl std::fmt::Display for FacetClause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}:{}", self.field, self.value) }
}

/// Clauses OR'ed together. Groups are AND'ed with one another.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct FacetGroup {
    pub clauses: Vec<FacetClause>,
}

impl FacetGroup {
    pub fn single(field: &str, value: impl Into<String>) -> Self { Self { clauses: vec![FacetClause::new(field, value)] } }

    pub fn any_of<I, V>(field: &str, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<String>,
    {
        Self { clauses: values.into_iter().map(|value| FacetClause::new(field, value)).collect() }
    }

    pub fn len(&self) -> usize { self.clauses.len() }

    pub fn is_empty(&self) -> bool { self.clauses.is_empty() }

    pub fn encode(&self) -> Vec<String> { self.clauses.iter().map(FacetClause::encode).collect() }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NumericOperator {
    #[serde(rename = ">=")]
    GreaterThanOrEqual,
    #[serde(rename = "<=")]
    LessThanOrEqual,
}

impl NumericOperator {
    pub fn as_str(&self) -> &'static str {
        match self {
            NumericOperator::GreaterThanOrEqual => ">=",
            NumericOperator::LessThanOrEqual => "<=",
        }
    }

    /// Inclusive comparison of a record value against the clause bound
    pub fn admits(&self, actual: f64, bound: f64) -> bool {
        match self {
            NumericOperator::GreaterThanOrEqual => actual >= bound,
            NumericOperator::LessThanOrEqual => actual <= bound,
        }
    }
}

/// `field <op> value` on a numeric attribute
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NumericClause {
    pub field: String,
    pub operator: NumericOperator,
    pub value: f64,
}

impl NumericClause {
    pub fn at_least(field: &str, value: f64) -> Self { Self { field: field.to_string(), operator: NumericOperator::GreaterThanOrEqual, value } }

    pub fn at_most(field: &str, value: f64) -> Self { Self { field: field.to_string(), operator: NumericOperator::LessThanOrEqual, value } }

    /// `field>=value`. Integral values render without a fractional part (`price>=5000`).
    pub fn encode(&self) -> String { self.to_string() }
}

impl std::fmt::Display for NumericClause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { write!(f, "{}{}{}", self.field, self.operator.as_str(), self.value) }
}

/// A query ready for a faceted search backend: facet groups in conjunctive normal form,
/// AND'ed numeric clauses, and the index replica that provides the requested order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompiledQuery {
    pub search_term: String,
    pub facet_groups: Vec<FacetGroup>,
    pub numeric_clauses: Vec<NumericClause>,
    pub index_selector: String,
}

impl CompiledQuery {
    /// Outer list AND'ed, inner lists OR'ed, each entry `field:value`
    pub fn facet_filters(&self) -> Vec<Vec<String>> { self.facet_groups.iter().map(FacetGroup::encode).collect() }

    /// Each entry `field<op><value>`, all AND'ed
    pub fn numeric_filters(&self) -> Vec<String> { self.numeric_clauses.iter().map(NumericClause::encode).collect() }
}
