//! ExplorerStore in-memory implementation.
//!
//! Holds the authoritative copy of every explorer model and applies
//! dispatched update records; the orchestrator only reads through the
//! `ExplorerStore` trait.

use chrono::Utc;
use std::collections::HashMap;
use std::sync::RwLock;

use explorer_core::dispatch::{DispatchRecord, ExplorerUpdates};
use explorer_core::store::ExplorerStore;
use explorer_core::types::Explorer;

/// In-memory model store for development and testing.
pub struct InMemoryExplorerStore {
    explorers: RwLock<HashMap<String, Explorer>>,
}

impl InMemoryExplorerStore {
    pub fn new() -> Self {
        Self {
            explorers: RwLock::new(HashMap::new()),
        }
    }

    /// Seed the store with a model directly, bypassing dispatch.
    pub fn insert(&self, explorer: Explorer) {
        let mut explorers = self.explorers.write().unwrap_or_else(|e| e.into_inner());
        explorers.insert(explorer.id.clone(), explorer);
    }

    /// The currently active model, if any.
    pub fn active(&self) -> Option<Explorer> {
        let explorers = self.explorers.read().unwrap_or_else(|e| e.into_inner());
        explorers.values().find(|e| e.active).cloned()
    }

    pub fn len(&self) -> usize {
        let explorers = self.explorers.read().unwrap_or_else(|e| e.into_inner());
        explorers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Apply a dispatched update record to the held state.
    ///
    /// Notice and app-state records are not explorer state and are
    /// ignored here.
    pub fn apply(&self, record: &DispatchRecord) {
        let mut explorers = self.explorers.write().unwrap_or_else(|e| e.into_inner());
        match record {
            DispatchRecord::ExplorerUpdate { id, updates } => {
                if let Some(explorer) = explorers.get_mut(id) {
                    merge_updates(explorer, updates);
                }
            }
            DispatchRecord::ExplorerCreate { attrs } => {
                let explorer = Explorer::from_persisted(attrs);
                explorers.insert(explorer.id.clone(), explorer);
            }
            DispatchRecord::ExplorerCreateBatch { attrs } => {
                for record in attrs {
                    let explorer = Explorer::from_persisted(record);
                    explorers.insert(explorer.id.clone(), explorer);
                }
            }
            DispatchRecord::ExplorerSetActive { id } => {
                for explorer in explorers.values_mut() {
                    explorer.active = explorer.id == *id;
                }
            }
            DispatchRecord::ExplorerRemove { id } => {
                explorers.remove(id);
            }
            DispatchRecord::ExplorerSaving { id } => {
                if let Some(explorer) = explorers.get_mut(id) {
                    explorer.saving = true;
                    explorer.updated_at = Utc::now();
                }
            }
            DispatchRecord::ExplorerSaveSuccess { id }
            | DispatchRecord::ExplorerSaveFail { id } => {
                if let Some(explorer) = explorers.get_mut(id) {
                    explorer.saving = false;
                    explorer.updated_at = Utc::now();
                }
            }
            DispatchRecord::ExplorerDestroying { .. }
            | DispatchRecord::ExplorerDestroyFail { .. }
            | DispatchRecord::NoticeCreate { .. }
            | DispatchRecord::NoticeClearAll
            | DispatchRecord::AppStateUpdate { .. } => {}
        }
    }
}

impl Default for InMemoryExplorerStore {
    fn default() -> Self {
        Self::new()
    }
}

impl ExplorerStore for InMemoryExplorerStore {
    fn get(&self, id: &str) -> Option<Explorer> {
        let explorers = self.explorers.read().unwrap_or_else(|e| e.into_inner());
        explorers.get(id).cloned()
    }
}

fn merge_updates(explorer: &mut Explorer, updates: &ExplorerUpdates) {
    if let Some(loading) = updates.loading {
        explorer.loading = loading;
    }
    if let Some(saving) = updates.saving {
        explorer.saving = saving;
    }
    if let Some(result) = &updates.result {
        explorer.result = Some(result.clone());
    }
    if let Some(name) = &updates.name {
        explorer.name = Some(name.clone());
    }
    if let Some(query) = &updates.query {
        explorer.query = query.clone();
    }
    if let Some(visualization) = &updates.visualization {
        explorer.visualization = visualization.clone();
    }
    explorer.updated_at = Utc::now();
}
