//! Provenance Reclamation
//!
//! When a catalog entity is deleted, the source pages that went into it
//! must not disappear with it. The functions here walk the subtree being
//! deleted and collect every reclaimable page, deduplicated, in first-seen
//! order, ready for the caller to return to the unassigned pool.
//!
//! Reclamation is a pure read: nothing here mutates the tree or the pool.
//!
//! Two kinds of pages come back:
//!
//! - attached pages, straight from each node's `contributing_pages` - this
//!   covers sheets that contributed zero parts;
//! - pages consumed into an entity at creation time, which survive only as
//!   the entity's images. These are reconstructed with a fresh id and the
//!   entity's name as text, so deduplication for them keys on the image
//!   reference itself.
//!
//! Synthetic sheets had no document content to preserve and are discarded.

use std::collections::HashSet;

use crate::models::{Aggregate, Node, PdfPage};

/// Collect the reclaimable pages of a node being deleted.
pub fn reclaim_node(node: &Node) -> Vec<PdfPage> {
    let mut pages = Vec::new();
    let mut seen = HashSet::new();
    collect_node(node, &mut pages, &mut seen);
    pages
}

/// Collect the reclaimable pages of an aggregate and all its nodes.
pub fn reclaim_aggregate(aggregate: &Aggregate) -> Vec<PdfPage> {
    let mut pages = Vec::new();
    let mut seen = HashSet::new();

    if aggregate.created_from_page {
        collect_images(&aggregate.name, &aggregate.images, &mut pages, &mut seen);
    }
    for node in &aggregate.nodes {
        collect_node(node, &mut pages, &mut seen);
    }

    pages
}

fn collect_node(node: &Node, pages: &mut Vec<PdfPage>, seen: &mut HashSet<String>) {
    if node.created_from_page {
        collect_images(&node.name, &node.images, pages, seen);
    }
    for page in &node.contributing_pages {
        if page.is_synthetic {
            continue;
        }
        if seen.insert(page.id.clone()) {
            pages.push(page.clone());
        }
    }
}

fn collect_images(
    name: &str,
    images: &[String],
    pages: &mut Vec<PdfPage>,
    seen: &mut HashSet<String>,
) {
    for image in images {
        if seen.insert(image.clone()) {
            pages.push(PdfPage::from_image(name, image));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn page(id: &str) -> PdfPage {
        PdfPage::with_id(id, "page text", "img")
    }

    #[test]
    fn test_contributing_pages_come_back_once() {
        let mut node = Node::new("n");
        node.attach_page(page("p-1"));
        node.attach_page(page("p-2"));

        let reclaimed = reclaim_node(&node);
        let ids: Vec<&str> = reclaimed.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["p-1", "p-2"]);
    }

    #[test]
    fn test_synthetic_sheets_are_discarded() {
        let mut node = Node::new("n");
        node.attach_page(PdfPage::synthetic(""));
        node.attach_page(page("p-1"));

        let reclaimed = reclaim_node(&node);
        assert_eq!(reclaimed.len(), 1);
        assert_eq!(reclaimed[0].id, "p-1");
    }

    #[test]
    fn test_zero_part_sheet_is_still_reclaimed() {
        // A page can be attached without having contributed any part; it
        // must survive the node's deletion all the same.
        let mut node = Node::new("n");
        node.attach_page(page("empty-sheet"));

        let reclaimed = reclaim_node(&node);
        assert_eq!(reclaimed.len(), 1);
        assert_eq!(reclaimed[0].id, "empty-sheet");
    }

    #[test]
    fn test_page_consumed_at_creation_is_reconstructed() {
        let source = PdfPage::with_id("p-1", "Масляный насос", "img-1");
        let node = Node::from_page(&source);

        let reclaimed = reclaim_node(&node);
        assert_eq!(reclaimed.len(), 1);
        // Fresh id, entity name as text, same image.
        assert_ne!(reclaimed[0].id, "p-1");
        assert_eq!(reclaimed[0].text, "Масляный насос");
        assert_eq!(reclaimed[0].image, "img-1");
    }

    #[test]
    fn test_images_without_page_origin_are_not_reclaimed() {
        let mut node = Node::new("n");
        node.images.push("uploaded-img".to_string());

        assert!(reclaim_node(&node).is_empty());
    }

    #[test]
    fn test_aggregate_walk_order_and_dedup() {
        let source = PdfPage::with_id("agg-page", "Двигатель в сборе", "agg-img");
        let mut aggregate = Aggregate::from_page(&source);

        let mut first = Node::new("first");
        first.attach_page(page("p-1"));
        let mut second = Node::new("second");
        second.attach_page(page("p-1"));
        second.attach_page(page("p-2"));
        aggregate.nodes.push(first);
        aggregate.nodes.push(second);

        let reclaimed = reclaim_aggregate(&aggregate);
        let keys: Vec<&str> = reclaimed
            .iter()
            .map(|p| {
                if p.image == "agg-img" {
                    p.image.as_str()
                } else {
                    p.id.as_str()
                }
            })
            .collect();
        assert_eq!(keys, vec!["agg-img", "p-1", "p-2"]);
    }
}
