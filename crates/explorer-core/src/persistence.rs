//! Persistence seam - CRUD over saved explorer models.

use async_trait::async_trait;
use thiserror::Error;

use crate::types::PersistedExplorer;

/// Persistence backend errors
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("persisted model not found: {0}")]
    NotFound(String),

    #[error("persistence backend error: {0}")]
    Backend(String),
}

/// CRUD capability over saved explorer models.
#[async_trait]
pub trait Persistence: Send + Sync {
    /// Fetch every saved model.
    async fn get_all(&self) -> Result<Vec<PersistedExplorer>, PersistenceError>;

    /// Fetch one saved model by id.
    async fn get(&self, id: &str) -> Result<Option<PersistedExplorer>, PersistenceError>;

    /// Create a new saved model. An empty `id` asks the backend to assign one;
    /// the created record (with its final id) is returned.
    async fn create(&self, attrs: PersistedExplorer)
        -> Result<PersistedExplorer, PersistenceError>;

    /// Update an existing saved model.
    async fn update(&self, attrs: PersistedExplorer)
        -> Result<PersistedExplorer, PersistenceError>;

    /// Delete a saved model by id.
    async fn delete(&self, id: &str) -> Result<(), PersistenceError>;
}
