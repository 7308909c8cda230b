//! Dispatch channel - the sole mutation vocabulary.
//!
//! The orchestrator never mutates model state directly; it announces
//! intents as `DispatchRecord`s on an injected `Dispatcher`, and stores
//! apply them downstream. Records serialize to the exact
//! `{actionType, id, updates|attrs}` wire shape consumed by view-state
//! subscribers.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tokio::sync::broadcast;

use crate::types::{ExplorerId, PersistedExplorer, Query, Visualization};

/// Dispatch errors
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("dispatch channel error: {0}")]
    Channel(String),
}

/// A typed state-update record delivered to subscribers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "actionType")]
pub enum DispatchRecord {
    #[serde(rename = "EXPLORER_UPDATE")]
    ExplorerUpdate {
        id: ExplorerId,
        updates: ExplorerUpdates,
    },
    #[serde(rename = "EXPLORER_CREATE")]
    ExplorerCreate { attrs: PersistedExplorer },
    #[serde(rename = "EXPLORER_CREATE_BATCH")]
    ExplorerCreateBatch { attrs: Vec<PersistedExplorer> },
    #[serde(rename = "EXPLORER_SET_ACTIVE")]
    ExplorerSetActive { id: ExplorerId },
    #[serde(rename = "EXPLORER_REMOVE")]
    ExplorerRemove { id: ExplorerId },
    #[serde(rename = "EXPLORER_SAVING")]
    ExplorerSaving { id: ExplorerId },
    #[serde(rename = "EXPLORER_SAVE_SUCCESS")]
    ExplorerSaveSuccess { id: ExplorerId },
    #[serde(rename = "EXPLORER_SAVE_FAIL")]
    ExplorerSaveFail { id: ExplorerId },
    #[serde(rename = "EXPLORER_DESTROYING")]
    ExplorerDestroying { id: ExplorerId },
    #[serde(rename = "EXPLORER_DESTROY_FAIL")]
    ExplorerDestroyFail { id: ExplorerId },
    #[serde(rename = "NOTICE_CREATE")]
    NoticeCreate { attrs: NoticeAttrs },
    #[serde(rename = "NOTICE_CLEAR_ALL")]
    NoticeClearAll,
    #[serde(rename = "APP_STATE_UPDATE")]
    AppStateUpdate { updates: AppStateUpdates },
}

impl DispatchRecord {
    /// The wire-level action type string for this record.
    pub fn action_type(&self) -> &'static str {
        match self {
            DispatchRecord::ExplorerUpdate { .. } => "EXPLORER_UPDATE",
            DispatchRecord::ExplorerCreate { .. } => "EXPLORER_CREATE",
            DispatchRecord::ExplorerCreateBatch { .. } => "EXPLORER_CREATE_BATCH",
            DispatchRecord::ExplorerSetActive { .. } => "EXPLORER_SET_ACTIVE",
            DispatchRecord::ExplorerRemove { .. } => "EXPLORER_REMOVE",
            DispatchRecord::ExplorerSaving { .. } => "EXPLORER_SAVING",
            DispatchRecord::ExplorerSaveSuccess { .. } => "EXPLORER_SAVE_SUCCESS",
            DispatchRecord::ExplorerSaveFail { .. } => "EXPLORER_SAVE_FAIL",
            DispatchRecord::ExplorerDestroying { .. } => "EXPLORER_DESTROYING",
            DispatchRecord::ExplorerDestroyFail { .. } => "EXPLORER_DESTROY_FAIL",
            DispatchRecord::NoticeCreate { .. } => "NOTICE_CREATE",
            DispatchRecord::NoticeClearAll => "NOTICE_CLEAR_ALL",
            DispatchRecord::AppStateUpdate { .. } => "APP_STATE_UPDATE",
        }
    }
}

/// Partial update payload for an explorer model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExplorerUpdates {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loading: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub saving: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub query: Option<Query>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visualization: Option<Visualization>,
}

impl ExplorerUpdates {
    /// Update that only flips the loading flag.
    pub fn loading(value: bool) -> Self {
        Self {
            loading: Some(value),
            ..Self::default()
        }
    }

    pub fn with_result(mut self, result: Value) -> Self {
        self.result = Some(result);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_query(mut self, query: Query) -> Self {
        self.query = Some(query);
        self
    }

    pub fn with_visualization(mut self, visualization: Visualization) -> Self {
        self.visualization = Some(visualization);
        self
    }
}

/// Severity of a transient user-facing notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NoticeType {
    Error,
    Info,
    Success,
}

/// Payload of a `NOTICE_CREATE` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NoticeAttrs {
    pub text: String,
    #[serde(rename = "type")]
    pub notice_type: NoticeType,
}

impl NoticeAttrs {
    pub fn error(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            notice_type: NoticeType::Error,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            notice_type: NoticeType::Info,
        }
    }

    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            notice_type: NoticeType::Success,
        }
    }
}

/// Partial update payload for global application state.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppStateUpdates {
    #[serde(
        rename = "fetchingPersistedExplorers",
        skip_serializing_if = "Option::is_none"
    )]
    pub fetching_persisted_explorers: Option<bool>,
}

impl AppStateUpdates {
    pub fn fetching_persisted_explorers(value: bool) -> Self {
        Self {
            fetching_persisted_explorers: Some(value),
        }
    }
}

/// Dispatcher trait - the injected dispatch channel.
///
/// Delivery is fire-and-forget and in submission order; dispatching with
/// no live subscribers is not an error.
#[async_trait]
pub trait Dispatcher: Send + Sync {
    /// Announce a state-update record to all subscribers.
    async fn dispatch(&self, record: DispatchRecord) -> Result<(), DispatchError>;

    /// Subscribe to the record stream.
    fn subscribe(&self) -> broadcast::Receiver<DispatchRecord>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_update_record_wire_shape() {
        let record = DispatchRecord::ExplorerUpdate {
            id: "5".to_string(),
            updates: ExplorerUpdates::loading(false).with_result(json!(100)),
        };
        let wire = serde_json::to_value(&record).expect("serialize");
        assert_eq!(
            wire,
            json!({
                "actionType": "EXPLORER_UPDATE",
                "id": "5",
                "updates": { "loading": false, "result": 100 }
            })
        );
    }

    #[test]
    fn test_notice_record_wire_shape() {
        let record = DispatchRecord::NoticeCreate {
            attrs: NoticeAttrs::error("NOPE"),
        };
        let wire = serde_json::to_value(&record).expect("serialize");
        assert_eq!(
            wire,
            json!({
                "actionType": "NOTICE_CREATE",
                "attrs": { "text": "NOPE", "type": "error" }
            })
        );
    }

    #[test]
    fn test_app_state_record_uses_camel_case_key() {
        let record = DispatchRecord::AppStateUpdate {
            updates: AppStateUpdates::fetching_persisted_explorers(false),
        };
        let wire = serde_json::to_value(&record).expect("serialize");
        assert_eq!(
            wire,
            json!({
                "actionType": "APP_STATE_UPDATE",
                "updates": { "fetchingPersistedExplorers": false }
            })
        );
    }

    #[test]
    fn test_clear_all_round_trips_through_the_tag() {
        let wire = serde_json::to_value(DispatchRecord::NoticeClearAll).expect("serialize");
        assert_eq!(wire, json!({ "actionType": "NOTICE_CLEAR_ALL" }));
        let back: DispatchRecord = serde_json::from_value(wire).expect("deserialize");
        assert_eq!(back, DispatchRecord::NoticeClearAll);
    }
}
