//! Aggregate Data Structures
//!
//! An [`Aggregate`] is a sub-assembly grouping under a Model, owning an
//! ordered list of [`Node`]s. Like nodes, an aggregate can be created by
//! dropping a source page, in which case the page image is retained and the
//! page text (first 80 characters) becomes the name.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::node::normalize_name;
use super::{Node, PdfPage};

/// Fallback name for aggregates created without usable text.
pub const DEFAULT_AGGREGATE_NAME: &str = "Новый агрегат";

/// Page text is long; only this many characters become the aggregate name.
const PAGE_NAME_MAX_CHARS: usize = 80;

/// A sub-assembly grouping under a Model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Aggregate {
    /// Unique identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Component groupings, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub nodes: Vec<Node>,

    /// Whether this aggregate was created by dropping a source page
    #[serde(default)]
    pub created_from_page: bool,

    /// Overview image references, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,
}

impl Aggregate {
    /// Create a manually added aggregate. Whitespace-only names fall back
    /// to [`DEFAULT_AGGREGATE_NAME`].
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: normalize_name(name, DEFAULT_AGGREGATE_NAME),
            nodes: Vec::new(),
            created_from_page: false,
            images: Vec::new(),
        }
    }

    /// Create an aggregate from a dropped source page.
    pub fn from_page(page: &PdfPage) -> Self {
        let truncated: String = page.text.chars().take(PAGE_NAME_MAX_CHARS).collect();
        let mut aggregate = Self::new(&truncated);
        aggregate.created_from_page = true;
        if !page.image.is_empty() {
            aggregate.images.push(page.image.clone());
        }
        aggregate
    }

    /// Look up a node by id.
    pub fn node(&self, node_id: &str) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == node_id)
    }

    /// Look up a node by id, mutably.
    pub fn node_mut(&mut self, node_id: &str) -> Option<&mut Node> {
        self.nodes.iter_mut().find(|n| n.id == node_id)
    }
}
