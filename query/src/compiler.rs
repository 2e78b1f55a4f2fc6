use tracing::debug;

use crate::filter::{FilterSpec, SortOrder};
use crate::query::{fields, CompiledQuery, FacetGroup, NumericClause};

/// Base name of the catalog index; sorted replicas are addressed by suffix.
pub const DEFAULT_INDEX_NAME: &str = "products";

/// Only listings in this status are ever returned to a shopper
pub const AVAILABLE_STATUS: &str = "available";

/// Compiles [`FilterSpec`]s against one catalog index and its sorted replicas.
///
/// Compilation is a pure function of the spec: it cannot fail, and equal specs always produce
/// equal queries, including the order of facet groups and numeric clauses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryCompiler {
    base_index: String,
}

impl Default for QueryCompiler {
    fn default() -> Self { Self::new(DEFAULT_INDEX_NAME) }
}

impl QueryCompiler {
    pub fn new(base_index: impl Into<String>) -> Self { Self { base_index: base_index.into() } }

    pub fn base_index(&self) -> &str { &self.base_index }

    /// Name of the index replica serving `order`; the base index when no order is requested.
    pub fn index_for(&self, order: Option<SortOrder>) -> String {
        match order {
            Some(order) => format!("{}{}", self.base_index, order.index_suffix()),
            None => self.base_index.clone(),
        }
    }

    /// Reverse of [`QueryCompiler::index_for`]. `None` when the name addresses neither the base
    /// index nor one of its replicas.
    pub fn order_of_index(&self, index_name: &str) -> Option<Option<SortOrder>> {
        let suffix = index_name.strip_prefix(self.base_index.as_str())?;
        if suffix.is_empty() {
            return Some(None);
        }
        SortOrder::ALL.iter().find(|order| order.index_suffix() == suffix).map(|order| Some(*order))
    }

    /// `spec` must hold finite, non-negative bounds; see [`FilterSpec::validate`].
    pub fn compile(&self, spec: &FilterSpec) -> CompiledQuery {
        debug_assert!(spec.validate().is_ok(), "compiling unvalidated bounds: {:?}", spec.validate());
        // Destructured so that a new field cannot be added without deciding how it compiles
        let FilterSpec {
            query,
            category,
            sub_category: _,
            min_price,
            max_price,
            discount_percentage,
            size,
            gender,
            condition,
            currency,
            order,
        } = spec;

        let mut facet_groups = vec![FacetGroup::single(fields::STATUS, AVAILABLE_STATUS)];
        if let Some(currency) = currency {
            facet_groups.push(FacetGroup::single(fields::CURRENCY, currency.as_str()));
        }
        if let Some(gender) = gender {
            facet_groups.push(FacetGroup::single(fields::GENDER, gender.as_str()));
        }
        if let Some(condition) = condition {
            facet_groups.push(FacetGroup::single(fields::CONDITION, condition.as_str()));
        }
        if let Some(sizes) = size.as_ref().filter(|sizes| !sizes.is_empty()) {
            facet_groups.push(FacetGroup::any_of(fields::SIZE, sizes.iter().map(|size| size.as_str())));
        }
        if let Some(categories) = category.as_ref().filter(|categories| !categories.is_empty()) {
            facet_groups.push(FacetGroup::any_of(fields::CATEGORY, categories.iter().map(|category| category.as_str())));
        }

        let mut numeric_clauses = Vec::new();
        if let Some(min_price) = min_price {
            numeric_clauses.push(NumericClause::at_least(fields::PRICE, *min_price));
        }
        if let Some(max_price) = max_price {
            numeric_clauses.push(NumericClause::at_most(fields::PRICE, *max_price));
        }
        if let Some(discount) = discount_percentage {
            numeric_clauses.push(NumericClause::at_least(fields::DISCOUNT_PERCENTAGE, *discount));
        }

        let compiled = CompiledQuery {
            search_term: query.clone().unwrap_or_default(),
            facet_groups,
            numeric_clauses,
            index_selector: self.index_for(*order),
        };
        debug!("QueryCompiler.compile: {:?} -> {:?}", spec, compiled);
        compiled
    }
}

/// Compile against [`DEFAULT_INDEX_NAME`]
pub fn compile(spec: &FilterSpec) -> CompiledQuery { QueryCompiler::default().compile(spec) }
