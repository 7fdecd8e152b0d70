//! Model Data Structures
//!
//! A [`Model`] is a top-level catalog entry (one machine or vehicle model)
//! owning an ordered list of [`Aggregate`]s. The persisted shape of the
//! whole catalog is exactly this tree, serialized with camelCase field
//! names and keyed by model id in the store.
//!
//! The lookup helpers here walk the owned tree; ids are unique within their
//! containing collection, so the first match is the only match.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Aggregate, Node, Part};

/// A top-level catalog entry.
///
/// # Examples
///
/// ```rust
/// use partdesk_core::models::{Aggregate, Model};
///
/// let mut model = Model::new("КрАЗ-255");
/// model.aggregates.push(Aggregate::new("Двигатель"));
///
/// let id = model.aggregates[0].id.clone();
/// assert!(model.aggregate(&id).is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    /// Unique identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Sub-assembly groupings, in display order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub aggregates: Vec<Aggregate>,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last structural modification timestamp
    pub modified_at: DateTime<Utc>,
}

impl Model {
    /// Create an empty model.
    pub fn new(name: impl Into<String>) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            name: name.into(),
            aggregates: Vec::new(),
            created_at: now,
            modified_at: now,
        }
    }

    /// Record a structural modification.
    pub fn touch(&mut self) {
        self.modified_at = Utc::now();
    }

    /// Look up an aggregate by id.
    pub fn aggregate(&self, aggregate_id: &str) -> Option<&Aggregate> {
        self.aggregates.iter().find(|a| a.id == aggregate_id)
    }

    /// Look up an aggregate by id, mutably.
    pub fn aggregate_mut(&mut self, aggregate_id: &str) -> Option<&mut Aggregate> {
        self.aggregates.iter_mut().find(|a| a.id == aggregate_id)
    }

    /// Look up a node anywhere in the model, mutably.
    pub fn node_mut(&mut self, node_id: &str) -> Option<&mut Node> {
        self.aggregates
            .iter_mut()
            .find_map(|a| a.node_mut(node_id))
    }

    /// Look up a node anywhere in the model, together with its parent
    /// aggregate.
    pub fn node_with_aggregate(&self, node_id: &str) -> Option<(&Aggregate, &Node)> {
        self.aggregates
            .iter()
            .find_map(|a| a.node(node_id).map(|n| (a, n)))
    }

    /// Find the node owning a given part, mutably.
    pub fn node_of_part_mut(&mut self, part_id: &str) -> Option<&mut Node> {
        self.aggregates
            .iter_mut()
            .flat_map(|a| a.nodes.iter_mut())
            .find(|n| n.part(part_id).is_some())
    }

    /// Look up a part anywhere in the model, mutably.
    pub fn part_mut(&mut self, part_id: &str) -> Option<&mut Part> {
        self.node_of_part_mut(part_id)?
            .parts
            .iter_mut()
            .find(|p| p.id == part_id)
    }
}
