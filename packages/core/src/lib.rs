//! Partdesk Core Catalog Logic
//!
//! This crate provides the data model, parsing and editing engine for
//! decomposing a scanned parts-catalog document into a structured catalog.
//!
//! # Architecture
//!
//! - **Owned tree**: one `Model` → `Aggregate` → `Node` → `Part` hierarchy,
//!   mutated in place by a single-threaded editing session
//! - **Provenance**: every source page attached to the tree is tracked, and
//!   deletion returns non-synthetic pages to the unassigned pool
//! - **Heuristic parsing**: page text becomes part records via a strict
//!   scheme-number scan that degrades instead of guessing
//! - **Fire-and-forget persistence**: the in-memory tree is authoritative;
//!   the store is written after every structural change
//!
//! # Modules
//!
//! - [`models`] - Data structures (Model, Aggregate, Node, Part, PdfPage)
//! - [`parser`] - Page text to part records
//! - [`services`] - Editing session, page pool, provenance, queries
//! - [`db`] - Store abstraction with JSON-file and in-memory backends

pub mod db;
pub mod models;
pub mod parser;
pub mod services;

// Re-export commonly used types
pub use models::*;
pub use services::*;
