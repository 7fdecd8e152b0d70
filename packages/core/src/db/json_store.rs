//! JSON File Store
//!
//! Embedded persistence backend: one pretty-printed `<model-id>.json`
//! document per model under a root directory. Ids are UUIDs, so they are
//! safe to use as file names as-is.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

use crate::db::ModelStore;
use crate::models::Model;

/// Directory-of-JSON-documents store.
///
/// # Examples
///
/// ```rust,no_run
/// use partdesk_core::db::{JsonFileStore, ModelStore};
/// use partdesk_core::models::Model;
///
/// let store = JsonFileStore::new("./data/catalog").unwrap();
/// store.put(&Model::new("КрАЗ-255")).unwrap();
/// assert_eq!(store.list().unwrap().len(), 1);
/// ```
#[derive(Debug)]
pub struct JsonFileStore {
    root: PathBuf,
}

impl JsonFileStore {
    /// Open a store rooted at `root`, creating the directory if needed.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(&root)
            .with_context(|| format!("failed to create store directory {}", root.display()))?;
        Ok(Self { root })
    }

    fn model_path(&self, model_id: &str) -> PathBuf {
        self.root.join(format!("{model_id}.json"))
    }

    fn read_model(path: &Path) -> Result<Model> {
        let bytes = fs::read(path)
            .with_context(|| format!("failed to read model file {}", path.display()))?;
        serde_json::from_slice(&bytes)
            .with_context(|| format!("failed to parse model file {}", path.display()))
    }

    fn write_model(&self, model: &Model) -> Result<()> {
        let path = self.model_path(&model.id);
        let json = serde_json::to_vec_pretty(model).context("failed to serialize model")?;
        fs::write(&path, json)
            .with_context(|| format!("failed to write model file {}", path.display()))
    }
}

impl ModelStore for JsonFileStore {
    fn list(&self) -> Result<Vec<Model>> {
        let entries = fs::read_dir(&self.root)
            .with_context(|| format!("failed to read store directory {}", self.root.display()))?;

        let mut models = Vec::new();
        for entry in entries {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            models.push(Self::read_model(&path)?);
        }
        // Directory iteration order is platform-dependent; keep listings
        // stable across backends.
        models.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(models)
    }

    fn put(&self, model: &Model) -> Result<()> {
        self.write_model(model)
    }

    fn delete(&self, model_id: &str) -> Result<()> {
        let path = self.model_path(model_id);
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(err) => {
                Err(err).with_context(|| format!("failed to delete model file {}", path.display()))
            }
        }
    }

    fn rename(&self, model_id: &str, name: &str) -> Result<()> {
        let path = self.model_path(model_id);
        if !path.exists() {
            return Ok(());
        }
        let mut model = Self::read_model(&path)?;
        model.name = name.to_string();
        self.write_model(&model)
    }
}
