//! Catalog Service - Core Mutation Engine
//!
//! This module provides the main business logic layer for catalog editing:
//!
//! - Model lifecycle (create, rename, delete, load from the store)
//! - Tree mutations (aggregates, nodes, parts, sheets, images, reorder)
//! - Page flow between the unassigned pool and the tree, with provenance
//!   reclamation on every delete
//!
//! One `CatalogService` is one editing session: it owns the in-memory
//! model list and the page pool, and holds the store handle. Every
//! operation is synchronous and atomic over the in-memory state.
//!
//! # Persistence
//!
//! A save is triggered after each structural change, fire-and-forget: the
//! in-memory tree is the source of truth for the session, and a failed
//! save never rolls back or blocks a mutation. Failures are logged and
//! latched in [`CatalogService::last_save_error`] for the operator surface.
//!
//! # Page exclusivity
//!
//! Operations that assign a page always take it from the pool, and
//! reclamation always goes back through the pool, so a page id is either
//! in the pool or attached to exactly one entity - never both.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::db::ModelStore;
use crate::models::{Aggregate, Model, Node, Part, PartUpdate, PdfPage};
use crate::parser::parse_parts;
use crate::services::error::CatalogError;
use crate::services::page_pool::PagePool;
use crate::services::provenance;

/// Result of a delete operation.
///
/// Deletes are idempotent: deleting an absent entity succeeds, and
/// `existed` provides visibility without breaking that.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DeleteOutcome {
    /// Whether the entity existed before deletion
    pub existed: bool,

    /// Number of source pages collected for reclamation into the pool
    pub reclaimed_pages: usize,
}

impl DeleteOutcome {
    fn existed(reclaimed_pages: usize) -> Self {
        Self {
            existed: true,
            reclaimed_pages,
        }
    }

    fn not_found() -> Self {
        Self {
            existed: false,
            reclaimed_pages: 0,
        }
    }
}

/// One catalog editing session: the in-memory model tree, the unassigned
/// page pool and the persistence handle.
///
/// # Examples
///
/// ```rust
/// use std::sync::Arc;
/// use partdesk_core::db::MemoryStore;
/// use partdesk_core::models::PdfPage;
/// use partdesk_core::services::CatalogService;
///
/// let mut catalog = CatalogService::new(Arc::new(MemoryStore::new()));
/// catalog.seed_pages(vec![PdfPage::with_id("p-1", "1 A1 Кольцо Ring 2", "img")]);
///
/// let model_id = catalog.create_model("КрАЗ-255").unwrap();
/// let aggregate_id = catalog.create_aggregate(&model_id, "Двигатель").unwrap();
/// let node_id = catalog.create_node(&model_id, &aggregate_id, "Насос").unwrap();
///
/// let added = catalog.add_parts_from_page(&model_id, &node_id, "p-1").unwrap();
/// assert_eq!(added, 1);
/// assert!(catalog.pool().is_empty());
/// ```
pub struct CatalogService {
    models: Vec<Model>,
    pool: PagePool,
    store: Arc<dyn ModelStore>,
    last_save_error: Option<String>,
}

impl CatalogService {
    /// Create an empty session over the given store.
    pub fn new(store: Arc<dyn ModelStore>) -> Self {
        Self {
            models: Vec::new(),
            pool: PagePool::new(),
            store,
            last_save_error: None,
        }
    }

    /// Load the persisted models into the session, replacing its current
    /// list. Returns the number of models loaded.
    ///
    /// This is the one store call whose failure is propagated: a session
    /// that cannot read its catalog has nothing to edit.
    pub fn load_models(&mut self) -> anyhow::Result<usize> {
        self.models = self.store.list()?;
        Ok(self.models.len())
    }

    /// The models of this session, in display order.
    pub fn models(&self) -> &[Model] {
        &self.models
    }

    /// Look up a model by id.
    pub fn model(&self, model_id: &str) -> Option<&Model> {
        self.models.iter().find(|m| m.id == model_id)
    }

    /// The unassigned page pool.
    pub fn pool(&self) -> &PagePool {
        &self.pool
    }

    /// Seed the pool from a freshly ingested document.
    pub fn seed_pages(&mut self, pages: Vec<PdfPage>) {
        self.pool.seed(pages);
    }

    /// Reorder the pool (splice semantics). Returns `false` on
    /// out-of-range indices, without mutating.
    pub fn move_page(&mut self, from: usize, to: usize) -> bool {
        self.pool.move_page(from, to)
    }

    /// Permanently discard an unassigned page.
    pub fn discard_page(&mut self, page_id: &str) -> Option<PdfPage> {
        self.pool.discard(page_id)
    }

    /// The latest save failure, if the most recent store write failed.
    pub fn last_save_error(&self) -> Option<&str> {
        self.last_save_error.as_deref()
    }

    //
    // MODEL LIFECYCLE
    //

    /// Create a new model. Empty names are rejected.
    pub fn create_model(&mut self, name: &str) -> Result<String, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }

        let model = Model::new(name);
        let model_id = model.id.clone();
        self.models.push(model);
        self.persist(self.models.len() - 1);
        Ok(model_id)
    }

    /// Rename a model. Returns `Ok(false)` when the name is unchanged.
    pub fn rename_model(&mut self, model_id: &str, name: &str) -> Result<bool, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }

        let idx = self.model_index(model_id)?;
        if self.models[idx].name == name {
            return Ok(false);
        }
        self.models[idx].name = name.to_string();
        self.models[idx].touch();

        let result = self.store.rename(model_id, name);
        self.record_store_result(result, "rename model", model_id);
        Ok(true)
    }

    /// Delete a model. Idempotent; does not touch the page pool.
    pub fn delete_model(&mut self, model_id: &str) -> DeleteOutcome {
        let Some(pos) = self.models.iter().position(|m| m.id == model_id) else {
            return DeleteOutcome::not_found();
        };
        self.models.remove(pos);

        let result = self.store.delete(model_id);
        self.record_store_result(result, "delete model", model_id);
        tracing::info!("Deleted model {}", model_id);
        DeleteOutcome::existed(0)
    }

    //
    // AGGREGATES
    //

    /// Append a manually created aggregate. Empty names fall back to the
    /// default.
    pub fn create_aggregate(
        &mut self,
        model_id: &str,
        name: &str,
    ) -> Result<String, CatalogError> {
        let idx = self.model_index(model_id)?;
        let aggregate = Aggregate::new(name);
        let aggregate_id = aggregate.id.clone();
        self.models[idx].aggregates.push(aggregate);
        self.models[idx].touch();
        self.persist(idx);
        Ok(aggregate_id)
    }

    /// Append an aggregate created from an unassigned page. The page is
    /// consumed: its text (truncated) becomes the name, its image is kept.
    pub fn create_aggregate_from_page(
        &mut self,
        model_id: &str,
        page_id: &str,
    ) -> Result<String, CatalogError> {
        let idx = self.model_index(model_id)?;
        let page = self
            .pool
            .take(page_id)
            .ok_or_else(|| CatalogError::page_not_found(page_id))?;

        let aggregate = Aggregate::from_page(&page);
        let aggregate_id = aggregate.id.clone();
        self.models[idx].aggregates.push(aggregate);
        self.models[idx].touch();
        self.persist(idx);
        Ok(aggregate_id)
    }

    /// Rename an aggregate. Returns `Ok(false)` when the name is
    /// unchanged.
    pub fn rename_aggregate(
        &mut self,
        model_id: &str,
        aggregate_id: &str,
        name: &str,
    ) -> Result<bool, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }

        let idx = self.model_index(model_id)?;
        let model = &mut self.models[idx];
        let aggregate = model
            .aggregate_mut(aggregate_id)
            .ok_or_else(|| CatalogError::aggregate_not_found(aggregate_id))?;
        if aggregate.name == name {
            return Ok(false);
        }
        aggregate.name = name.to_string();
        model.touch();
        self.persist(idx);
        Ok(true)
    }

    /// Move an aggregate within the model's sequence (splice semantics).
    /// Out-of-range indices are rejected without mutation; equal indices
    /// are a no-op.
    pub fn reorder_aggregates(
        &mut self,
        model_id: &str,
        from: usize,
        to: usize,
    ) -> Result<bool, CatalogError> {
        let idx = self.model_index(model_id)?;
        let moved = move_element(&mut self.models[idx].aggregates, from, to)?;
        if moved {
            self.models[idx].touch();
            self.persist(idx);
        }
        Ok(moved)
    }

    /// Delete an aggregate and all its nodes, reclaiming every
    /// non-synthetic source page in the subtree to the front of the pool.
    pub fn delete_aggregate(
        &mut self,
        model_id: &str,
        aggregate_id: &str,
    ) -> Result<DeleteOutcome, CatalogError> {
        let idx = self.model_index(model_id)?;
        let model = &mut self.models[idx];
        let Some(pos) = model.aggregates.iter().position(|a| a.id == aggregate_id) else {
            return Ok(DeleteOutcome::not_found());
        };

        let aggregate = model.aggregates.remove(pos);
        let pages = provenance::reclaim_aggregate(&aggregate);
        let reclaimed = pages.len();
        model.touch();
        self.pool.offer(pages);
        self.persist(idx);
        tracing::info!(
            "Deleted aggregate {}, reclaimed {} page(s)",
            aggregate_id,
            reclaimed
        );
        Ok(DeleteOutcome::existed(reclaimed))
    }

    //
    // NODES
    //

    /// Append a manually created node under an aggregate. Empty names fall
    /// back to the default.
    pub fn create_node(
        &mut self,
        model_id: &str,
        aggregate_id: &str,
        name: &str,
    ) -> Result<String, CatalogError> {
        let idx = self.model_index(model_id)?;
        let model = &mut self.models[idx];
        let aggregate = model
            .aggregate_mut(aggregate_id)
            .ok_or_else(|| CatalogError::aggregate_not_found(aggregate_id))?;

        let node = Node::new(name);
        let node_id = node.id.clone();
        aggregate.nodes.push(node);
        model.touch();
        self.persist(idx);
        Ok(node_id)
    }

    /// Append a node created from an unassigned page. The page is
    /// consumed: its text becomes the name, its image the first sheet.
    pub fn create_node_from_page(
        &mut self,
        model_id: &str,
        aggregate_id: &str,
        page_id: &str,
    ) -> Result<String, CatalogError> {
        let idx = self.model_index(model_id)?;
        if self.models[idx].aggregate(aggregate_id).is_none() {
            return Err(CatalogError::aggregate_not_found(aggregate_id));
        }
        let page = self
            .pool
            .take(page_id)
            .ok_or_else(|| CatalogError::page_not_found(page_id))?;

        let node = Node::from_page(&page);
        let node_id = node.id.clone();
        let model = &mut self.models[idx];
        if let Some(aggregate) = model.aggregate_mut(aggregate_id) {
            aggregate.nodes.push(node);
        }
        model.touch();
        self.persist(idx);
        Ok(node_id)
    }

    /// Rename a node. Returns `Ok(false)` when the name is unchanged.
    pub fn rename_node(
        &mut self,
        model_id: &str,
        node_id: &str,
        name: &str,
    ) -> Result<bool, CatalogError> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CatalogError::EmptyName);
        }

        let idx = self.model_index(model_id)?;
        let model = &mut self.models[idx];
        let node = model
            .node_mut(node_id)
            .ok_or_else(|| CatalogError::node_not_found(node_id))?;
        if node.name == name {
            return Ok(false);
        }
        node.name = name.to_string();
        model.touch();
        self.persist(idx);
        Ok(true)
    }

    /// Move a node within its aggregate's sequence (splice semantics).
    pub fn reorder_nodes(
        &mut self,
        model_id: &str,
        aggregate_id: &str,
        from: usize,
        to: usize,
    ) -> Result<bool, CatalogError> {
        let idx = self.model_index(model_id)?;
        let model = &mut self.models[idx];
        let aggregate = model
            .aggregate_mut(aggregate_id)
            .ok_or_else(|| CatalogError::aggregate_not_found(aggregate_id))?;

        let moved = move_element(&mut aggregate.nodes, from, to)?;
        if moved {
            model.touch();
            self.persist(idx);
        }
        Ok(moved)
    }

    /// Delete a node, reclaiming its non-synthetic source pages to the
    /// front of the pool.
    pub fn delete_node(
        &mut self,
        model_id: &str,
        node_id: &str,
    ) -> Result<DeleteOutcome, CatalogError> {
        let idx = self.model_index(model_id)?;
        let model = &mut self.models[idx];

        let mut reclaimed = None;
        for aggregate in &mut model.aggregates {
            if let Some(pos) = aggregate.nodes.iter().position(|n| n.id == node_id) {
                let node = aggregate.nodes.remove(pos);
                reclaimed = Some(provenance::reclaim_node(&node));
                break;
            }
        }
        let Some(pages) = reclaimed else {
            return Ok(DeleteOutcome::not_found());
        };

        let count = pages.len();
        model.touch();
        self.pool.offer(pages);
        self.persist(idx);
        tracing::info!("Deleted node {}, reclaimed {} page(s)", node_id, count);
        Ok(DeleteOutcome::existed(count))
    }

    //
    // PARTS AND SHEETS
    //

    /// Parse an unassigned page into parts and append them to a node.
    ///
    /// The page is taken from the pool and recorded in the node's
    /// contributing pages even when the parser yields nothing - an empty
    /// sheet is still a sheet, and the page must not be lost. Returns the
    /// number of parts extracted.
    pub fn add_parts_from_page(
        &mut self,
        model_id: &str,
        node_id: &str,
        page_id: &str,
    ) -> Result<usize, CatalogError> {
        let idx = self.model_index(model_id)?;
        if self.models[idx].node_mut(node_id).is_none() {
            return Err(CatalogError::node_not_found(node_id));
        }
        let page = self
            .pool
            .take(page_id)
            .ok_or_else(|| CatalogError::page_not_found(page_id))?;

        let drafts = parse_parts(&page.text);
        let count = drafts.len();
        tracing::debug!("Extracted {} part(s) from page {}", count, page_id);

        let model = &mut self.models[idx];
        if let Some(node) = model.node_mut(node_id) {
            for draft in drafts {
                node.parts.push(Part {
                    id: Uuid::new_v4().to_string(),
                    scheme_number: draft.scheme_number.to_string(),
                    part_number: draft.part_number,
                    alternate_part_numbers: Vec::new(),
                    description_ru: draft.description_ru,
                    description_uk: draft.description_uk,
                    quantity: draft.quantity,
                    source_page_id: Some(page.id.clone()),
                });
            }
            node.attach_page(page);
        }
        model.touch();
        self.persist(idx);
        Ok(count)
    }

    /// Append a blank part with no source page; it renders as its own
    /// sheet in the grouping.
    pub fn add_manual_part(
        &mut self,
        model_id: &str,
        node_id: &str,
    ) -> Result<String, CatalogError> {
        self.push_blank_part(model_id, node_id, None)
    }

    /// Append a blank part under one of the node's existing sheets.
    pub fn add_manual_part_to_sheet(
        &mut self,
        model_id: &str,
        node_id: &str,
        page_id: &str,
    ) -> Result<String, CatalogError> {
        self.push_blank_part(model_id, node_id, Some(page_id))
    }

    /// Attach a fresh synthetic blank sheet to a node, without consuming a
    /// pool page. Returns the new sheet's page id.
    pub fn add_blank_sheet(
        &mut self,
        model_id: &str,
        node_id: &str,
    ) -> Result<String, CatalogError> {
        let idx = self.model_index(model_id)?;
        let model = &mut self.models[idx];
        let node = model
            .node_mut(node_id)
            .ok_or_else(|| CatalogError::node_not_found(node_id))?;

        let sheet = PdfPage::synthetic("");
        let sheet_id = sheet.id.clone();
        node.attach_page(sheet);
        model.touch();
        self.persist(idx);
        Ok(sheet_id)
    }

    /// Apply a field-level patch to a part. Returns `Ok(false)` for an
    /// empty patch.
    pub fn update_part(
        &mut self,
        model_id: &str,
        part_id: &str,
        patch: &PartUpdate,
    ) -> Result<bool, CatalogError> {
        let idx = self.model_index(model_id)?;
        let model = &mut self.models[idx];
        let part = model
            .part_mut(part_id)
            .ok_or_else(|| CatalogError::part_not_found(part_id))?;
        if patch.is_empty() {
            return Ok(false);
        }
        part.apply(patch);
        model.touch();
        self.persist(idx);
        Ok(true)
    }

    /// Remove a single part. Its source page is NOT reclaimed - other
    /// parts may still reference the same sheet; only whole-sheet or
    /// whole-entity deletion reclaims pages.
    pub fn remove_part(
        &mut self,
        model_id: &str,
        part_id: &str,
    ) -> Result<DeleteOutcome, CatalogError> {
        let idx = self.model_index(model_id)?;
        let model = &mut self.models[idx];
        let Some(node) = model.node_of_part_mut(part_id) else {
            return Ok(DeleteOutcome::not_found());
        };
        node.parts.retain(|p| p.id != part_id);
        model.touch();
        self.persist(idx);
        Ok(DeleteOutcome::existed(0))
    }

    /// Remove a whole sheet from a node: all parts extracted from the page
    /// and the contributing-page record. The page is reclaimed to the
    /// front of the pool unless synthetic.
    pub fn remove_parts_by_page(
        &mut self,
        model_id: &str,
        node_id: &str,
        page_id: &str,
    ) -> Result<DeleteOutcome, CatalogError> {
        let idx = self.model_index(model_id)?;
        let model = &mut self.models[idx];
        let node = model
            .node_mut(node_id)
            .ok_or_else(|| CatalogError::node_not_found(node_id))?;

        let Some(page) = node.detach_page(page_id) else {
            return Ok(DeleteOutcome::not_found());
        };
        node.parts
            .retain(|p| p.source_page_id.as_deref() != Some(page_id));
        model.touch();

        let reclaimed = if page.is_synthetic {
            0
        } else {
            self.pool.offer(vec![page]);
            1
        };
        self.persist(idx);
        Ok(DeleteOutcome::existed(reclaimed))
    }

    /// Append diagram image references to a node; parts and provenance are
    /// unaffected.
    pub fn add_images_to_node(
        &mut self,
        model_id: &str,
        node_id: &str,
        images: Vec<String>,
    ) -> Result<(), CatalogError> {
        let idx = self.model_index(model_id)?;
        let model = &mut self.models[idx];
        let node = model
            .node_mut(node_id)
            .ok_or_else(|| CatalogError::node_not_found(node_id))?;
        node.images.extend(images);
        model.touch();
        self.persist(idx);
        Ok(())
    }

    //
    // INTERNALS
    //

    fn push_blank_part(
        &mut self,
        model_id: &str,
        node_id: &str,
        sheet_page_id: Option<&str>,
    ) -> Result<String, CatalogError> {
        let idx = self.model_index(model_id)?;
        let model = &mut self.models[idx];
        let node = model
            .node_mut(node_id)
            .ok_or_else(|| CatalogError::node_not_found(node_id))?;

        if let Some(page_id) = sheet_page_id {
            if node.contributing_page(page_id).is_none() {
                return Err(CatalogError::page_not_found(page_id));
            }
        }

        let part = Part::blank(sheet_page_id.map(str::to_string));
        let part_id = part.id.clone();
        node.parts.push(part);
        model.touch();
        self.persist(idx);
        Ok(part_id)
    }

    fn model_index(&self, model_id: &str) -> Result<usize, CatalogError> {
        self.models
            .iter()
            .position(|m| m.id == model_id)
            .ok_or_else(|| CatalogError::model_not_found(model_id))
    }

    /// Fire-and-forget save of one model after a structural change.
    fn persist(&mut self, idx: usize) {
        let result = self.store.put(&self.models[idx]);
        let model_id = self.models[idx].id.clone();
        self.record_store_result(result, "persist model", &model_id);
    }

    fn record_store_result(&mut self, result: anyhow::Result<()>, action: &str, id: &str) {
        match result {
            Ok(()) => self.last_save_error = None,
            Err(err) => {
                tracing::warn!("Failed to {} {}: {:#}", action, id, err);
                self.last_save_error = Some(format!("{err:#}"));
            }
        }
    }
}

/// Move one element of an ordered sequence (splice semantics).
fn move_element<T>(items: &mut Vec<T>, from: usize, to: usize) -> Result<bool, CatalogError> {
    let len = items.len();
    if from >= len || to >= len {
        return Err(CatalogError::IndexOutOfRange { from, to, len });
    }
    if from == to {
        return Ok(false);
    }
    let item = items.remove(from);
    items.insert(to, item);
    Ok(true)
}

#[cfg(test)]
#[path = "catalog_service_test.rs"]
mod catalog_service_test;
