//! Business Services
//!
//! This module contains the catalog editing and query logic:
//!
//! - `CatalogService` - one editing session: model lifecycle, tree
//!   mutations, page flow and fire-and-forget persistence
//! - `PagePool` - the ordered working set of unassigned source pages
//! - `provenance` - pure reclamation walks used by the delete operations
//! - `CatalogQuery` - read-only lookups for the catalog browser
//!
//! Services coordinate between the data model and the store, implementing
//! the editing rules: order-preserving mutations, page exclusivity and
//! provenance-safe deletion.

pub mod catalog_service;
pub mod error;
pub mod page_pool;
pub mod provenance;
pub mod query_service;

pub use catalog_service::{CatalogService, DeleteOutcome};
pub use error::CatalogError;
pub use page_pool::PagePool;
pub use query_service::{CatalogQuery, PartHit};
