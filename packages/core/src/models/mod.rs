//! Data Models
//!
//! This module contains the catalog entity tree and its supporting types:
//!
//! - `Model` → `Aggregate` → `Node` → `Part`, each owning an ordered list
//!   of its children
//! - `PdfPage` - one page of extracted source-document content
//! - `PartUpdate` - field-level patch for part edits
//!
//! All entities serialize with serde using camelCase field names; the
//! persisted catalog shape is exactly the `Model` tree.

mod aggregate;
mod model;
mod node;
mod page;
mod part;

pub use aggregate::{Aggregate, DEFAULT_AGGREGATE_NAME};
pub use model::Model;
pub use node::{Node, DEFAULT_NODE_NAME};
pub use page::{PdfPage, SYNTHETIC_PAGE_PREFIX};
pub use part::{Part, PartUpdate};
