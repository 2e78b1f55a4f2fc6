//! # Shoppe query compiler
//!
//! Turns the product search criteria an assistant collects from a conversation into the
//! constrained query shape a faceted search backend accepts:
//!
//! - conjunctive groups of facet equality clauses (OR inside a group, AND across groups)
//! - numeric range clauses, all AND'ed
//! - the name of the pre-sorted index replica to query
//!
//! ```rust
//! use shoppe_query::{FilterSpec, QueryCompiler};
//!
//! let spec = FilterSpec::try_from(r#"{"query": "sneakers", "category": ["Shoes"], "minPrice": 5000, "order": "PriceLowToHigh"}"#)?;
//! let compiled = QueryCompiler::default().compile(&spec);
//!
//! assert_eq!(compiled.facet_filters(), vec![vec!["status:available"], vec!["category:Shoes"]]);
//! assert_eq!(compiled.numeric_filters(), vec!["price>=5000"]);
//! assert_eq!(compiled.index_selector, "products_price_asc");
//! # Ok::<(), shoppe_query::FilterError>(())
//! ```

pub mod compiler;
pub mod error;
pub mod evaluate;
pub mod filter;
pub mod query;
pub mod validation;

pub use compiler::{QueryCompiler, DEFAULT_INDEX_NAME};
pub use error::FilterError;
pub use filter::{Category, Condition, Currency, FilterSpec, Gender, LetteredSize, Size, SortOrder, SubCategory};
pub use query::{fields, CompiledQuery, FacetClause, FacetGroup, NumericClause, NumericOperator};
