//! Explorer model definitions
//!
//! An Explorer is a saved or in-progress analysis query configuration plus
//! its visualization and last result. The orchestrator only ever reads
//! these through the store seam; all mutation flows through dispatch.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::Query;

/// Chart configuration for a query's result.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Visualization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chart_type: Option<String>,
}

impl Visualization {
    pub fn new(chart_type: impl Into<String>) -> Self {
        Self {
            chart_type: Some(chart_type.into()),
        }
    }
}

/// Type alias for Explorer ID
pub type ExplorerId = String;

/// The raw record shape exchanged with the persistence backend.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PersistedExplorer {
    pub id: ExplorerId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    pub query: Query,
    pub visualization: Visualization,
}

/// A saved or in-progress analysis query plus its visualization and
/// last result.
///
/// State machine: Idle -> Loading -> {Idle-with-result, Idle-with-error}.
/// The `loading` flag is the per-model single-flight lock; it is set and
/// cleared only through the orchestrator's exec/success/error dispatches.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Explorer {
    pub id: ExplorerId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// True while an execution is in flight for this model.
    #[serde(default)]
    pub loading: bool,
    /// True while a save/destroy round-trip is in flight.
    #[serde(default)]
    pub saving: bool,
    /// Whether this model is the currently active one in the workspace.
    #[serde(default)]
    pub active: bool,
    pub query: Query,
    pub visualization: Visualization,
    /// Last successful response payload; absent until an execution succeeds.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Explorer {
    /// Create a fresh model with a generated id.
    pub fn new(query: Query, visualization: Visualization) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: None,
            loading: false,
            saving: false,
            active: false,
            query,
            visualization,
            result: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Materialize a model from a persisted record.
    pub fn from_persisted(record: &PersistedExplorer) -> Self {
        let now = Utc::now();
        Self {
            id: record.id.clone(),
            name: record.name.clone(),
            loading: false,
            saving: false,
            active: false,
            query: record.query.clone(),
            visualization: record.visualization.clone(),
            result: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// The serializable attributes submitted to the persistence backend.
    pub fn to_persisted(&self) -> PersistedExplorer {
        PersistedExplorer {
            id: self.id.clone(),
            name: self.name.clone(),
            query: self.query.clone(),
            visualization: self.visualization.clone(),
        }
    }

    /// Set the display name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }
}
