//! Service Layer Error Types
//!
//! Errors for catalog operations. Every variant is informational: an error
//! means the operation did not mutate anything, never that state was left
//! half-applied. Persistence failures are not represented here - a failed
//! save is surfaced through the service's save-error latch while the
//! in-memory tree stays authoritative.

use thiserror::Error;

/// Catalog operation errors
#[derive(Error, Debug)]
pub enum CatalogError {
    /// Model not found by id
    #[error("Model not found: {id}")]
    ModelNotFound { id: String },

    /// Aggregate not found by id
    #[error("Aggregate not found: {id}")]
    AggregateNotFound { id: String },

    /// Node not found by id
    #[error("Node not found: {id}")]
    NodeNotFound { id: String },

    /// Part not found by id
    #[error("Part not found: {id}")]
    PartNotFound { id: String },

    /// Page not found in the pool or among a node's sheets
    #[error("Page not found: {id}")]
    PageNotFound { id: String },

    /// Empty or whitespace-only name
    #[error("Name must not be empty")]
    EmptyName,

    /// Reorder indices outside the current sequence
    #[error("Reorder index out of range: {from} -> {to} in a sequence of {len}")]
    IndexOutOfRange { from: usize, to: usize, len: usize },
}

impl CatalogError {
    /// Create a model not found error
    pub fn model_not_found(id: impl Into<String>) -> Self {
        Self::ModelNotFound { id: id.into() }
    }

    /// Create an aggregate not found error
    pub fn aggregate_not_found(id: impl Into<String>) -> Self {
        Self::AggregateNotFound { id: id.into() }
    }

    /// Create a node not found error
    pub fn node_not_found(id: impl Into<String>) -> Self {
        Self::NodeNotFound { id: id.into() }
    }

    /// Create a part not found error
    pub fn part_not_found(id: impl Into<String>) -> Self {
        Self::PartNotFound { id: id.into() }
    }

    /// Create a page not found error
    pub fn page_not_found(id: impl Into<String>) -> Self {
        Self::PageNotFound { id: id.into() }
    }
}
