//! Persistence Layer
//!
//! This module defines the store abstraction the editing session writes
//! through, plus two backends:
//!
//! - `JsonFileStore` - one JSON document per model under a directory,
//!   the embedded default
//! - `MemoryStore` - ephemeral map, for tests and throwaway sessions
//!
//! The store holds whole `Model` documents keyed by id; saves are
//! fire-and-forget from the session's point of view, so backends should
//! fail fast rather than retry.

mod json_store;
mod memory_store;
mod model_store;

pub use json_store::JsonFileStore;
pub use memory_store::MemoryStore;
pub use model_store::ModelStore;
