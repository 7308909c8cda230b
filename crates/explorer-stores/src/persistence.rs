//! Persistence in-memory implementation.

use async_trait::async_trait;
use std::sync::RwLock;

use explorer_core::persistence::{Persistence, PersistenceError};
use explorer_core::types::PersistedExplorer;

/// In-memory persistence backend for development and testing.
///
/// Records keep their insertion order so bulk loads register models in
/// the order they were saved.
pub struct InMemoryPersistence {
    records: RwLock<Vec<PersistedExplorer>>,
}

impl InMemoryPersistence {
    pub fn new() -> Self {
        Self {
            records: RwLock::new(Vec::new()),
        }
    }

    /// Seed the backend with existing records.
    pub fn with_records(records: Vec<PersistedExplorer>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn len(&self) -> usize {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for InMemoryPersistence {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Persistence for InMemoryPersistence {
    async fn get_all(&self) -> Result<Vec<PersistedExplorer>, PersistenceError> {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        Ok(records.clone())
    }

    async fn get(&self, id: &str) -> Result<Option<PersistedExplorer>, PersistenceError> {
        let records = self.records.read().unwrap_or_else(|e| e.into_inner());
        Ok(records.iter().find(|r| r.id == id).cloned())
    }

    async fn create(
        &self,
        mut attrs: PersistedExplorer,
    ) -> Result<PersistedExplorer, PersistenceError> {
        if attrs.id.is_empty() {
            attrs.id = uuid::Uuid::new_v4().to_string();
        }
        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        if records.iter().any(|r| r.id == attrs.id) {
            return Err(PersistenceError::Backend(format!(
                "a record with id '{}' already exists",
                attrs.id
            )));
        }
        records.push(attrs.clone());
        Ok(attrs)
    }

    async fn update(
        &self,
        attrs: PersistedExplorer,
    ) -> Result<PersistedExplorer, PersistenceError> {
        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        match records.iter_mut().find(|r| r.id == attrs.id) {
            Some(existing) => {
                *existing = attrs.clone();
                Ok(attrs)
            }
            None => Err(PersistenceError::NotFound(attrs.id)),
        }
    }

    async fn delete(&self, id: &str) -> Result<(), PersistenceError> {
        let mut records = self.records.write().unwrap_or_else(|e| e.into_inner());
        let before = records.len();
        records.retain(|r| r.id != id);
        if records.len() == before {
            return Err(PersistenceError::NotFound(id.to_string()));
        }
        Ok(())
    }
}
