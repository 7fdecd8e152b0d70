//! Node Data Structures
//!
//! A [`Node`] is a specific component grouping under an Aggregate. It owns
//! an ordered list of [`Part`]s, an ordered list of diagram image
//! references, and the provenance record of every source page that was ever
//! merged into it.
//!
//! `contributing_pages` is both the provenance record and the owning store
//! for attached pages: parts reference their sheet by page id only. A page
//! that contributed zero parts (an emptied manual sheet) is still present
//! here, so deleting the node can return it to the unassigned pool.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Part, PdfPage};

/// Fallback name for nodes created without usable text.
pub const DEFAULT_NODE_NAME: &str = "Новый узел";

/// Collapse whitespace runs and trim; fall back when nothing is left.
pub(crate) fn normalize_name(raw: &str, fallback: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if collapsed.is_empty() {
        fallback.to_string()
    } else {
        collapsed
    }
}

/// A component grouping holding parts and diagram sheets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    /// Unique identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Catalog line items, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub parts: Vec<Part>,

    /// Diagram image references, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub images: Vec<String>,

    /// Whether this node was created by dropping a source page
    #[serde(default)]
    pub created_from_page: bool,

    /// Provenance record: every page whose text or image was merged into
    /// this node, id-deduplicated, in attachment order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub contributing_pages: Vec<PdfPage>,
}

impl Node {
    /// Create a manually added node. Whitespace-only names fall back to
    /// [`DEFAULT_NODE_NAME`].
    pub fn new(name: &str) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            name: normalize_name(name, DEFAULT_NODE_NAME),
            parts: Vec::new(),
            images: Vec::new(),
            created_from_page: false,
            contributing_pages: Vec::new(),
        }
    }

    /// Create a node from a dropped source page: the page text becomes the
    /// name and the page image is kept as the first diagram sheet. The page
    /// itself is consumed; on deletion it is reconstructed from the image.
    pub fn from_page(page: &PdfPage) -> Self {
        let mut node = Self::new(&page.text);
        node.created_from_page = true;
        if !page.image.is_empty() {
            node.images.push(page.image.clone());
        }
        node
    }

    /// Record a page as contributing to this node. Id-deduplicated; returns
    /// `false` when the page was already attached.
    pub fn attach_page(&mut self, page: PdfPage) -> bool {
        if self.contributing_pages.iter().any(|p| p.id == page.id) {
            return false;
        }
        self.contributing_pages.push(page);
        true
    }

    /// Remove and return an attached page by id.
    pub fn detach_page(&mut self, page_id: &str) -> Option<PdfPage> {
        let idx = self.contributing_pages.iter().position(|p| p.id == page_id)?;
        Some(self.contributing_pages.remove(idx))
    }

    /// Look up an attached page by id.
    pub fn contributing_page(&self, page_id: &str) -> Option<&PdfPage> {
        self.contributing_pages.iter().find(|p| p.id == page_id)
    }

    /// Look up a part by id.
    pub fn part(&self, part_id: &str) -> Option<&Part> {
        self.parts.iter().find(|p| p.id == part_id)
    }
}
