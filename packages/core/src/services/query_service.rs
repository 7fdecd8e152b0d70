//! Catalog Query Surface
//!
//! Read-only lookups for the catalog browser: resolving a node together
//! with its parent aggregate's name, and searching parts by number. The
//! browser reads whatever model list it has (usually straight from the
//! store), so the query type borrows a slice instead of owning a session.

use serde::{Deserialize, Serialize};

use crate::models::{Aggregate, Model, Node};

/// One part-number search hit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PartHit {
    /// Model containing the part
    pub model_id: String,
    /// Node containing the part
    pub node_id: String,
    /// The part itself
    pub part_id: String,
    /// The primary or alternate number that matched
    pub matched_number: String,
}

/// Read-only queries over a list of models.
///
/// # Examples
///
/// ```rust
/// use partdesk_core::models::{Aggregate, Model, Node, Part};
/// use partdesk_core::services::CatalogQuery;
///
/// let mut model = Model::new("КрАЗ-255");
/// let mut aggregate = Aggregate::new("Двигатель");
/// let mut node = Node::new("Насос");
/// let mut part = Part::blank(None);
/// part.part_number = "240-1307216".to_string();
/// node.parts.push(part);
/// aggregate.nodes.push(node);
/// model.aggregates.push(aggregate);
///
/// let models = vec![model];
/// let query = CatalogQuery::new(&models);
/// assert_eq!(query.search_part_number("1307216").len(), 1);
/// ```
pub struct CatalogQuery<'a> {
    models: &'a [Model],
}

impl<'a> CatalogQuery<'a> {
    /// Create a query surface over the given models.
    pub fn new(models: &'a [Model]) -> Self {
        Self { models }
    }

    /// Look up a node and its parent aggregate within a model.
    pub fn node_with_aggregate(
        &self,
        model_id: &str,
        node_id: &str,
    ) -> Option<(&'a Aggregate, &'a Node)> {
        self.models
            .iter()
            .find(|m| m.id == model_id)?
            .node_with_aggregate(node_id)
    }

    /// Find every part whose primary or alternate number contains the
    /// query, case-insensitively. Whitespace-only queries match nothing.
    pub fn search_part_number(&self, query: &str) -> Vec<PartHit> {
        let needle = query.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }

        let mut hits = Vec::new();
        for model in self.models {
            for aggregate in &model.aggregates {
                for node in &aggregate.nodes {
                    for part in &node.parts {
                        let matched = std::iter::once(&part.part_number)
                            .chain(part.alternate_part_numbers.iter())
                            .find(|number| number.to_lowercase().contains(&needle));
                        if let Some(number) = matched {
                            hits.push(PartHit {
                                model_id: model.id.clone(),
                                node_id: node.id.clone(),
                                part_id: part.id.clone(),
                                matched_number: number.clone(),
                            });
                        }
                    }
                }
            }
        }
        hits
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Part;

    fn sample_models() -> Vec<Model> {
        let mut model = Model::new("КрАЗ-255");
        let mut aggregate = Aggregate::new("Двигатель");
        let mut node = Node::new("Водяной насос");

        let mut pump = Part::blank(None);
        pump.part_number = "240-1307216-А".to_string();
        pump.alternate_part_numbers.push("236-1307216".to_string());
        let mut ring = Part::blank(None);
        ring.part_number = "УК-210".to_string();

        node.parts.push(pump);
        node.parts.push(ring);
        aggregate.nodes.push(node);
        model.aggregates.push(aggregate);
        vec![model]
    }

    #[test]
    fn test_node_with_aggregate() {
        let models = sample_models();
        let node_id = models[0].aggregates[0].nodes[0].id.clone();

        let query = CatalogQuery::new(&models);
        let (aggregate, node) = query.node_with_aggregate(&models[0].id, &node_id).unwrap();
        assert_eq!(aggregate.name, "Двигатель");
        assert_eq!(node.name, "Водяной насос");

        assert!(query.node_with_aggregate("missing", &node_id).is_none());
        assert!(query.node_with_aggregate(&models[0].id, "missing").is_none());
    }

    #[test]
    fn test_search_is_case_insensitive_substring() {
        let models = sample_models();
        let query = CatalogQuery::new(&models);

        assert_eq!(query.search_part_number("1307216").len(), 1);
        assert_eq!(query.search_part_number("240-1307216-а").len(), 1);
        assert_eq!(query.search_part_number("ук-210").len(), 1);
        assert!(query.search_part_number("998877").is_empty());
    }

    #[test]
    fn test_search_matches_alternate_numbers() {
        let models = sample_models();
        let query = CatalogQuery::new(&models);

        let hits = query.search_part_number("236-");
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].matched_number, "236-1307216");
        assert_eq!(hits[0].model_id, models[0].id);
    }

    #[test]
    fn test_blank_query_matches_nothing() {
        let models = sample_models();
        let query = CatalogQuery::new(&models);
        assert!(query.search_part_number("   ").is_empty());
    }
}
