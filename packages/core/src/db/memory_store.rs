//! In-Memory Store
//!
//! Keeps models in a mutex-guarded map. Used by tests and by hosts that
//! want an ephemeral editing session; listings come back ordered by id,
//! matching the file-backed store.

use std::collections::BTreeMap;
use std::sync::Mutex;

use anyhow::Result;

use crate::db::ModelStore;
use crate::models::Model;

/// Ephemeral map-backed store.
#[derive(Debug, Default)]
pub struct MemoryStore {
    models: Mutex<BTreeMap<String, Model>>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

impl ModelStore for MemoryStore {
    fn list(&self) -> Result<Vec<Model>> {
        let models = self.models.lock().expect("model store mutex poisoned");
        Ok(models.values().cloned().collect())
    }

    fn put(&self, model: &Model) -> Result<()> {
        let mut models = self.models.lock().expect("model store mutex poisoned");
        models.insert(model.id.clone(), model.clone());
        Ok(())
    }

    fn delete(&self, model_id: &str) -> Result<()> {
        let mut models = self.models.lock().expect("model store mutex poisoned");
        models.remove(model_id);
        Ok(())
    }

    fn rename(&self, model_id: &str, name: &str) -> Result<()> {
        let mut models = self.models.lock().expect("model store mutex poisoned");
        if let Some(model) = models.get_mut(model_id) {
            model.name = name.to_string();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crud_round_trip() {
        let store = MemoryStore::new();
        let model = Model::new("m");
        store.put(&model).unwrap();
        assert_eq!(store.list().unwrap().len(), 1);

        store.rename(&model.id, "renamed").unwrap();
        assert_eq!(store.list().unwrap()[0].name, "renamed");

        store.delete(&model.id).unwrap();
        store.delete(&model.id).unwrap();
        assert!(store.list().unwrap().is_empty());
    }
}
