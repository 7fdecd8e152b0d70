//! ModelStore Trait - Persistence Abstraction Layer
//!
//! The store keeps whole `Model` documents keyed by id; the editing
//! session writes through it after every structural change. The trait
//! sits between `CatalogService` (business logic) and the backend so
//! sessions can run against a directory of JSON files, an in-memory map,
//! or whatever a host application brings.
//!
//! # Design Decisions
//!
//! 1. **Synchronous**: the editing model is single-threaded and saves are
//!    fire-and-forget; there is nothing to await
//! 2. **Whole-document writes**: `put` replaces the stored model, matching
//!    the replace-subtree mutation semantics of the in-memory tree
//! 3. **Error Handling**: `anyhow::Result` for flexible backend context;
//!    the caller decides whether a failure is fatal (loads) or merely
//!    reportable (saves)
//! 4. **Idempotent deletes**: removing an absent model succeeds

use anyhow::Result;

use crate::models::Model;

/// Abstraction layer for catalog persistence.
///
/// Implementations must be `Send + Sync`; the handle is shared behind an
/// `Arc` between the editing session and any read-only consumers.
pub trait ModelStore: Send + Sync {
    /// Load all stored models.
    fn list(&self) -> Result<Vec<Model>>;

    /// Store or replace one model, keyed by its id.
    fn put(&self, model: &Model) -> Result<()>;

    /// Remove a model. Removing an absent model is not an error.
    fn delete(&self, model_id: &str) -> Result<()>;

    /// Rename a stored model in place. Renaming an absent model is a
    /// no-op.
    fn rename(&self, model_id: &str, name: &str) -> Result<()>;
}
