//! Source Page Data Structures
//!
//! A [`PdfPage`] is one page of extracted source-document content: the raw
//! text pulled out of the page plus a rendered image reference. Pages are
//! produced by the ingestion collaborator (out of scope for this crate) and
//! flow between the unassigned pool and the catalog tree; they are never
//! mutated after creation.
//!
//! Synthetic pages are user-created blank sheets. They carry no real document
//! content, which is why provenance reclamation discards them instead of
//! returning them to the pool.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Id prefix for synthetically created pages.
///
/// The `is_synthetic` flag is authoritative; the prefix is kept in the id so
/// persisted documents remain readable at a glance.
pub const SYNTHETIC_PAGE_PREFIX: &str = "manual-";

/// One page of source-document content, or a user-created blank sheet.
///
/// # Examples
///
/// ```rust
/// use partdesk_core::models::PdfPage;
///
/// let page = PdfPage::new("1 ABC-1 Кольцо Ring 2", "data:image/png;base64,...");
/// assert!(!page.is_synthetic);
///
/// let sheet = PdfPage::synthetic("");
/// assert!(sheet.is_synthetic);
/// assert!(sheet.id.starts_with("manual-"));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfPage {
    /// Unique identifier, stable for the page's lifetime
    pub id: String,

    /// Raw text extracted from the page (single-column, space-tokenizable)
    pub text: String,

    /// Rendered page image reference (data URL or asset key)
    pub image: String,

    /// Whether this page was created by the operator rather than extracted
    /// from the source document
    #[serde(default)]
    pub is_synthetic: bool,
}

impl PdfPage {
    /// Create a page with an auto-generated id.
    pub fn new(text: impl Into<String>, image: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text: text.into(),
            image: image.into(),
            is_synthetic: false,
        }
    }

    /// Create a page with an explicit id (ingestion collaborators bring
    /// their own ids).
    pub fn with_id(
        id: impl Into<String>,
        text: impl Into<String>,
        image: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            image: image.into(),
            is_synthetic: false,
        }
    }

    /// Create a synthetic blank sheet.
    pub fn synthetic(text: impl Into<String>) -> Self {
        Self {
            id: format!("{}{}", SYNTHETIC_PAGE_PREFIX, Uuid::new_v4()),
            text: text.into(),
            image: String::new(),
            is_synthetic: true,
        }
    }

    /// Reconstruct a page from an image that was consumed into a catalog
    /// entity. The entity's name becomes the page text; the id is fresh.
    pub fn from_image(text: impl Into<String>, image: impl Into<String>) -> Self {
        Self::new(text, image)
    }
}
