//! Explorer action orchestration.
//!
//! `ExplorerActions` is the glue between user intent, the validation
//! rules, the query client and the dispatch channel. It sequences
//! validate -> execute -> dispatch for analysis queries, bulk-loads
//! persisted models, and drives the save/destroy lifecycles. It owns no
//! state of its own: the only write path is dispatching update records.

use std::sync::Arc;

use serde_json::Value;
use thiserror::Error;

use crate::client::{QueryClient, QueryResponse};
use crate::dispatch::{
    AppStateUpdates, DispatchError, DispatchRecord, Dispatcher, ExplorerUpdates, NoticeAttrs,
};
use crate::persistence::Persistence;
use crate::store::ExplorerStore;
use crate::types::{
    format_request_params, AnalysisType, Explorer, ExplorerId, PersistedExplorer,
    EXTRACTION_EVENT_LIMIT,
};
use crate::validation;

/// Action orchestration errors.
///
/// Validation failures are not errors: they surface as notice dispatches
/// or as `EmailExtractionOutcome` values.
#[derive(Debug, Error)]
pub enum ActionError {
    /// Calling exec while an execution is already in flight for the model.
    #[error("calling exec while model loading is true. Explorer id: {0}")]
    AlreadyLoading(ExplorerId),

    #[error("no explorer model with id: {0}")]
    NotFound(ExplorerId),

    #[error(transparent)]
    Dispatch(#[from] DispatchError),
}

/// Completion value of an email extraction run.
#[derive(Debug, Clone, PartialEq)]
pub struct EmailExtractionOutcome {
    pub success: bool,
    pub error: Option<String>,
    pub result: Option<Value>,
}

impl EmailExtractionOutcome {
    fn succeeded(result: Value) -> Self {
        Self {
            success: true,
            error: None,
            result: Some(result),
        }
    }

    fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            result: None,
        }
    }
}

/// The action orchestrator.
///
/// Reads models through the injected store, announces every state change
/// on the injected dispatcher, and never touches model state directly.
pub struct ExplorerActions {
    store: Arc<dyn ExplorerStore>,
    dispatcher: Arc<dyn Dispatcher>,
}

impl ExplorerActions {
    pub fn new(store: Arc<dyn ExplorerStore>, dispatcher: Arc<dyn Dispatcher>) -> Self {
        Self { store, dispatcher }
    }

    fn resolve(&self, id: &str) -> Result<Explorer, ActionError> {
        self.store
            .get(id)
            .ok_or_else(|| ActionError::NotFound(id.to_string()))
    }

    /// Execute the analysis query of the model identified by `id`.
    ///
    /// Fails fast when the model is already loading; a validation failure
    /// is routed through the execution-error path instead of being raised.
    pub async fn exec(&self, client: &dyn QueryClient, id: &str) -> Result<(), ActionError> {
        let explorer = self.resolve(id)?;
        if explorer.loading {
            return Err(ActionError::AlreadyLoading(explorer.id));
        }

        let outcome = validation::run_validations(&validation::explorer(), &explorer.query);
        if !outcome.is_valid {
            let message = outcome
                .last_error
                .unwrap_or_else(|| "The query is invalid.".to_string());
            self.exec_error(&explorer.id, &message).await?;
            return Ok(());
        }

        self.dispatcher
            .dispatch(DispatchRecord::ExplorerUpdate {
                id: explorer.id.clone(),
                updates: ExplorerUpdates::loading(true),
            })
            .await?;

        let mut request = format_request_params(&explorer.query);
        if request.analysis_type == Some(AnalysisType::Extraction) && request.latest.is_none() {
            request.latest = Some(EXTRACTION_EVENT_LIMIT);
        }

        tracing::info!(explorer_id = %explorer.id, "running analysis query");
        match client.run(request).await {
            Ok(response) => self.exec_success(&explorer, response).await?,
            Err(err) => self.exec_error(&explorer.id, &err.to_string()).await?,
        }
        Ok(())
    }

    /// Run the restricted email extraction variant of `explorer`.
    ///
    /// Baseline rules run first; the extraction rules are layered only
    /// when baseline passes. Any validation failure short-circuits with a
    /// failed outcome and no request.
    pub async fn run_email_extraction(
        &self,
        client: &dyn QueryClient,
        explorer: &Explorer,
    ) -> EmailExtractionOutcome {
        let baseline = validation::run_validations(&validation::explorer(), &explorer.query);
        if !baseline.is_valid {
            return EmailExtractionOutcome::failed(
                baseline
                    .last_error
                    .unwrap_or_else(|| "The query is invalid.".to_string()),
            );
        }

        let extraction =
            validation::run_validations(&validation::email_extraction_explorer(), &explorer.query);
        if !extraction.is_valid {
            return EmailExtractionOutcome::failed(
                extraction
                    .last_error
                    .unwrap_or_else(|| "The query is invalid.".to_string()),
            );
        }

        // Derivation strips an empty latest window entirely.
        let request = format_request_params(&explorer.query);
        tracing::info!(explorer_id = %explorer.id, "running email extraction");
        match client.run(request).await {
            Ok(response) => EmailExtractionOutcome::succeeded(response.result),
            Err(err) => EmailExtractionOutcome::failed(err.to_string()),
        }
    }

    /// Load every persisted model, validate and filter them, and register
    /// the valid ones as a single ordered batch.
    ///
    /// Invalid records are logged and dropped, never surfaced to the user.
    /// The fetching flag is cleared unconditionally once the batch step
    /// completes, including for empty and all-invalid batches.
    pub async fn get_persisted(&self, persistence: &dyn Persistence) -> Result<(), ActionError> {
        let records = match persistence.get_all().await {
            Ok(records) => records,
            Err(err) => {
                tracing::error!(error = %err, "failed to fetch persisted explorer models");
                Vec::new()
            }
        };

        let mut valid = Vec::with_capacity(records.len());
        for record in records {
            let query = record.query.sanitized();
            let outcome = validation::run_validations(&validation::explorer(), &query);
            if outcome.is_valid {
                valid.push(PersistedExplorer { query, ..record });
            } else {
                tracing::warn!(
                    id = %record.id,
                    "A persisted explorer model is invalid: {}",
                    serde_json::to_string(&record).unwrap_or_default()
                );
            }
        }

        let batch_result = self.create_batch(valid).await;
        self.dispatcher
            .dispatch(DispatchRecord::AppStateUpdate {
                updates: AppStateUpdates::fetching_persisted_explorers(false),
            })
            .await?;
        batch_result
    }

    /// Handle an execution failure: clear the loading flag and surface the
    /// message as an error notice. This is the only path by which
    /// execution failures become user-visible.
    pub async fn exec_error(&self, id: &str, message: &str) -> Result<(), ActionError> {
        tracing::warn!(explorer_id = %id, error = %message, "query execution failed");
        self.dispatcher
            .dispatch(DispatchRecord::ExplorerUpdate {
                id: id.to_string(),
                updates: ExplorerUpdates::loading(false),
            })
            .await?;
        self.dispatcher
            .dispatch(DispatchRecord::NoticeCreate {
                attrs: NoticeAttrs::error(message),
            })
            .await?;
        Ok(())
    }

    /// Handle an execution success: store the result, clear the loading
    /// flag and any stale notices.
    ///
    /// The chart type is left untouched even when the result shape no
    /// longer fits it; reconciliation is an unresolved upstream question.
    pub async fn exec_success(
        &self,
        explorer: &Explorer,
        response: QueryResponse,
    ) -> Result<(), ActionError> {
        self.dispatcher
            .dispatch(DispatchRecord::ExplorerUpdate {
                id: explorer.id.clone(),
                updates: ExplorerUpdates::loading(false).with_result(response.result),
            })
            .await?;
        self.dispatcher
            .dispatch(DispatchRecord::NoticeClearAll)
            .await?;
        Ok(())
    }

    /// Save the model identified by `source_id` as a new persisted model
    /// under `name`.
    ///
    /// Always exactly three dispatches, creation second; the active model
    /// is never changed.
    pub async fn save_new(
        &self,
        persistence: &dyn Persistence,
        source_id: &str,
        name: &str,
    ) -> Result<(), ActionError> {
        let source = self.resolve(source_id)?;
        self.dispatcher
            .dispatch(DispatchRecord::ExplorerSaving {
                id: source.id.clone(),
            })
            .await?;

        let mut attrs = source.to_persisted();
        attrs.id = String::new();
        attrs.name = Some(name.to_string());

        match persistence.create(attrs).await {
            Ok(created) => {
                let created_id = created.id.clone();
                self.dispatcher
                    .dispatch(DispatchRecord::ExplorerCreate { attrs: created })
                    .await?;
                self.dispatcher
                    .dispatch(DispatchRecord::ExplorerSaveSuccess { id: created_id })
                    .await?;
            }
            Err(err) => {
                self.dispatcher
                    .dispatch(DispatchRecord::ExplorerSaveFail {
                        id: source.id.clone(),
                    })
                    .await?;
                self.dispatcher
                    .dispatch(DispatchRecord::NoticeCreate {
                        attrs: NoticeAttrs::error(err.to_string()),
                    })
                    .await?;
            }
        }
        Ok(())
    }

    /// Persist the current attributes of an already-saved model.
    pub async fn save(&self, persistence: &dyn Persistence, id: &str) -> Result<(), ActionError> {
        let explorer = self.resolve(id)?;
        self.dispatcher
            .dispatch(DispatchRecord::ExplorerSaving {
                id: explorer.id.clone(),
            })
            .await?;

        match persistence.update(explorer.to_persisted()).await {
            Ok(updated) => {
                let mut updates = ExplorerUpdates::default()
                    .with_query(updated.query)
                    .with_visualization(updated.visualization);
                if let Some(name) = updated.name {
                    updates = updates.with_name(name);
                }
                self.dispatcher
                    .dispatch(DispatchRecord::ExplorerUpdate {
                        id: explorer.id.clone(),
                        updates,
                    })
                    .await?;
                self.dispatcher
                    .dispatch(DispatchRecord::ExplorerSaveSuccess { id: explorer.id })
                    .await?;
            }
            Err(err) => {
                self.dispatcher
                    .dispatch(DispatchRecord::ExplorerSaveFail { id: explorer.id })
                    .await?;
                self.dispatcher
                    .dispatch(DispatchRecord::NoticeCreate {
                        attrs: NoticeAttrs::error(err.to_string()),
                    })
                    .await?;
            }
        }
        Ok(())
    }

    /// Remove a persisted model.
    ///
    /// Signals the destroying transitional state; on success the model is
    /// removed from the store, on failure the transitional state is rolled
    /// back and the error surfaced as a notice.
    pub async fn destroy(
        &self,
        persistence: &dyn Persistence,
        id: &str,
    ) -> Result<(), ActionError> {
        self.dispatcher
            .dispatch(DispatchRecord::ExplorerDestroying { id: id.to_string() })
            .await?;

        match persistence.delete(id).await {
            Ok(()) => {
                self.dispatcher
                    .dispatch(DispatchRecord::ExplorerRemove { id: id.to_string() })
                    .await?;
                self.dispatcher
                    .dispatch(DispatchRecord::NoticeCreate {
                        attrs: NoticeAttrs::success("The query has been deleted."),
                    })
                    .await?;
            }
            Err(err) => {
                self.dispatcher
                    .dispatch(DispatchRecord::ExplorerDestroyFail { id: id.to_string() })
                    .await?;
                self.dispatcher
                    .dispatch(DispatchRecord::NoticeCreate {
                        attrs: NoticeAttrs::error(err.to_string()),
                    })
                    .await?;
            }
        }
        Ok(())
    }

    /// Register a single new model.
    pub async fn create(&self, attrs: PersistedExplorer) -> Result<(), ActionError> {
        self.dispatcher
            .dispatch(DispatchRecord::ExplorerCreate { attrs })
            .await?;
        Ok(())
    }

    /// Register many models at once, preserving order.
    pub async fn create_batch(&self, records: Vec<PersistedExplorer>) -> Result<(), ActionError> {
        self.dispatcher
            .dispatch(DispatchRecord::ExplorerCreateBatch { attrs: records })
            .await?;
        Ok(())
    }

    /// Apply a partial update to a model.
    pub async fn update(&self, id: &str, updates: ExplorerUpdates) -> Result<(), ActionError> {
        self.dispatcher
            .dispatch(DispatchRecord::ExplorerUpdate {
                id: id.to_string(),
                updates,
            })
            .await?;
        Ok(())
    }

    /// Make the model identified by `id` the active one.
    pub async fn set_active(&self, id: &str) -> Result<(), ActionError> {
        self.dispatcher
            .dispatch(DispatchRecord::ExplorerSetActive { id: id.to_string() })
            .await?;
        Ok(())
    }

    /// Register a new model and make it active, in that order.
    ///
    /// An empty id is replaced with a generated one so the activation can
    /// name the model it targets.
    pub async fn create_and_activate(
        &self,
        mut attrs: PersistedExplorer,
    ) -> Result<ExplorerId, ActionError> {
        if attrs.id.is_empty() {
            attrs.id = uuid::Uuid::new_v4().to_string();
        }
        let id = attrs.id.clone();
        self.create(attrs).await?;
        self.set_active(&id).await?;
        Ok(id)
    }

    /// Duplicate an existing model under a fresh id and make the copy
    /// active.
    pub async fn duplicate(&self, source_id: &str) -> Result<ExplorerId, ActionError> {
        let source = self.resolve(source_id)?;
        let name = format!(
            "Clone of {}",
            source.name.as_deref().unwrap_or("Untitled query")
        );
        let attrs = PersistedExplorer {
            id: uuid::Uuid::new_v4().to_string(),
            name: Some(name),
            query: source.query.clone(),
            visualization: source.visualization.clone(),
        };
        self.create_and_activate(attrs).await
    }
}
