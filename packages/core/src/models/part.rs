//! Part Data Structures
//!
//! A [`Part`] is one catalog line item: scheme position, part number,
//! interchangeable alternate numbers, bilingual descriptions and a quantity.
//! Parts are owned exclusively by their [`Node`](super::Node); the optional
//! `source_page_id` is a non-owning back-reference into the node's
//! contributing pages, used only for sheet grouping and provenance
//! reclamation.
//!
//! `scheme_number` and `part_number` are operator-editable display strings:
//! the parser writes digits into `scheme_number`, manually added parts leave
//! it empty.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One catalog line item within a Node.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Part {
    /// Unique identifier
    pub id: String,

    /// Position label on the diagram sheet ("1", "2", ...); locally
    /// meaningful only, empty for manually added parts
    pub scheme_number: String,

    /// Primary part number
    pub part_number: String,

    /// Interchangeable part numbers, operator-maintained
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub alternate_part_numbers: Vec<String>,

    /// Russian description
    pub description_ru: String,

    /// Ukrainian description
    pub description_uk: String,

    /// Quantity per assembly
    pub quantity: u32,

    /// Id of the source page this part was extracted from, resolved against
    /// the owning node's contributing pages
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_page_id: Option<String>,
}

impl Part {
    /// Create a blank part, optionally attached to an existing sheet.
    ///
    /// All text fields are empty and the quantity starts at 1, ready for the
    /// operator to fill in.
    pub fn blank(source_page_id: Option<String>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            scheme_number: String::new(),
            part_number: String::new(),
            alternate_part_numbers: Vec::new(),
            description_ru: String::new(),
            description_uk: String::new(),
            quantity: 1,
            source_page_id,
        }
    }

    /// Apply a partial update. Only fields present in the patch change.
    pub fn apply(&mut self, patch: &PartUpdate) {
        if let Some(scheme_number) = &patch.scheme_number {
            self.scheme_number = scheme_number.clone();
        }
        if let Some(part_number) = &patch.part_number {
            self.part_number = part_number.clone();
        }
        if let Some(alternates) = &patch.alternate_part_numbers {
            self.alternate_part_numbers = alternates.clone();
        }
        if let Some(description_ru) = &patch.description_ru {
            self.description_ru = description_ru.clone();
        }
        if let Some(description_uk) = &patch.description_uk {
            self.description_uk = description_uk.clone();
        }
        if let Some(quantity) = patch.quantity {
            self.quantity = quantity;
        }
    }
}

/// Partial part update for field-level edits.
///
/// All fields are optional; only provided fields are applied. The source
/// page reference is deliberately not patchable: a part keeps its page of
/// origin until the whole sheet or entity is removed.
///
/// # Examples
///
/// ```rust
/// use partdesk_core::models::{Part, PartUpdate};
///
/// let mut part = Part::blank(None);
/// let patch = PartUpdate::new()
///     .with_part_number("ABC-123".to_string())
///     .with_quantity(4);
/// part.apply(&patch);
///
/// assert_eq!(part.part_number, "ABC-123");
/// assert_eq!(part.quantity, 4);
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartUpdate {
    /// Update the scheme position label
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scheme_number: Option<String>,

    /// Update the primary part number
    #[serde(skip_serializing_if = "Option::is_none")]
    pub part_number: Option<String>,

    /// Replace the alternate part number list
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alternate_part_numbers: Option<Vec<String>>,

    /// Update the Russian description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_ru: Option<String>,

    /// Update the Ukrainian description
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description_uk: Option<String>,

    /// Update the quantity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub quantity: Option<u32>,
}

impl PartUpdate {
    /// Create an empty update
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the scheme position label
    pub fn with_scheme_number(mut self, scheme_number: String) -> Self {
        self.scheme_number = Some(scheme_number);
        self
    }

    /// Set the primary part number
    pub fn with_part_number(mut self, part_number: String) -> Self {
        self.part_number = Some(part_number);
        self
    }

    /// Replace the alternate part number list
    pub fn with_alternate_part_numbers(mut self, alternates: Vec<String>) -> Self {
        self.alternate_part_numbers = Some(alternates);
        self
    }

    /// Set the Russian description
    pub fn with_description_ru(mut self, description_ru: String) -> Self {
        self.description_ru = Some(description_ru);
        self
    }

    /// Set the Ukrainian description
    pub fn with_description_uk(mut self, description_uk: String) -> Self {
        self.description_uk = Some(description_uk);
        self
    }

    /// Set the quantity
    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = Some(quantity);
        self
    }

    /// Check whether the update contains any changes
    pub fn is_empty(&self) -> bool {
        self.scheme_number.is_none()
            && self.part_number.is_none()
            && self.alternate_part_numbers.is_none()
            && self.description_ru.is_none()
            && self.description_uk.is_none()
            && self.quantity.is_none()
    }
}
