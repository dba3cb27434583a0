use std::collections::{HashMap, HashSet};
use std::sync::RwLock;

use async_trait::async_trait;

use larder_core::EntryId;
use larder_pantry::PantryEntry;

use super::{PantryStore, PantryStoreError};

/// In-memory pantry store.
///
/// Intended for tests/dev. Not optimized for performance. Batch atomicity
/// comes from holding the write lock for the whole upsert.
#[derive(Debug, Default)]
pub struct InMemoryPantryStore {
    entries: RwLock<HashMap<EntryId, PantryEntry>>,
}

impl InMemoryPantryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PantryStore for InMemoryPantryStore {
    async fn find_all(&self) -> Result<Vec<PantryEntry>, PantryStoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| PantryStoreError::database("find_all", "lock poisoned"))?;
        Ok(entries.values().cloned().collect())
    }

    async fn find_by_names(&self, names: &[String]) -> Result<Vec<PantryEntry>, PantryStoreError> {
        if names.is_empty() {
            return Ok(vec![]);
        }

        let wanted: HashSet<&str> = names.iter().map(String::as_str).collect();
        let entries = self
            .entries
            .read()
            .map_err(|_| PantryStoreError::database("find_by_names", "lock poisoned"))?;
        Ok(entries
            .values()
            .filter(|entry| wanted.contains(entry.name.as_str()))
            .cloned()
            .collect())
    }

    async fn save_all(
        &self,
        to_save: Vec<PantryEntry>,
    ) -> Result<Vec<PantryEntry>, PantryStoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| PantryStoreError::database("save_all", "lock poisoned"))?;

        let mut saved = Vec::with_capacity(to_save.len());
        for entry in to_save {
            entries.insert(entry.id, entry.clone());
            saved.push(entry);
        }
        Ok(saved)
    }
}
