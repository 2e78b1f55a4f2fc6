//! In-process implementations of the Shoppe storage seams, for tests and local runs.
//!
//! [`MemoryDocumentStore`] answers owner-scoped lookups; [`MemorySearchBackend`] evaluates
//! compiled catalog queries the way the hosted faceted engine does, including the pre-sorted
//! index replicas.

mod catalog;
mod documents;
mod ordering;

pub use catalog::MemorySearchBackend;
pub use documents::MemoryDocumentStore;
