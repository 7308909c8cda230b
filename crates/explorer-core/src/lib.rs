//! # Explorer Core
//!
//! Action-orchestration layer for an interactive data-exploration
//! workspace.
//!
//! This crate contains:
//! - Explorer / Query / RequestParams type definitions
//! - The dispatch-record vocabulary and the Dispatcher seam
//! - Rule-based query validation
//! - The ExplorerActions orchestrator (exec, email extraction, bulk
//!   load, save/destroy lifecycles)
//!
//! This crate does NOT care about:
//! - How records are rendered
//! - How the query client talks to its backend
//! - Where persisted models are stored

pub mod actions;
pub mod client;
pub mod dispatch;
pub mod persistence;
pub mod store;
pub mod types;
pub mod validation;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::actions::{ActionError, EmailExtractionOutcome, ExplorerActions};
    pub use crate::client::{ClientError, QueryClient, QueryResponse};
    pub use crate::dispatch::{
        AppStateUpdates, DispatchError, DispatchRecord, Dispatcher, ExplorerUpdates, NoticeAttrs,
        NoticeType,
    };
    pub use crate::persistence::{Persistence, PersistenceError};
    pub use crate::store::ExplorerStore;
    pub use crate::types::{
        format_request_params, AnalysisType, Explorer, ExplorerId, Filter, PersistedExplorer,
        Query, RequestParams, Visualization, EXTRACTION_EVENT_LIMIT,
    };
    pub use crate::validation::{
        email_extraction_explorer, explorer, run_validations, Rule, RuleSet, ValidationOutcome,
    };
}

// Re-export key types at crate root
pub use actions::{ActionError, EmailExtractionOutcome, ExplorerActions};
pub use client::{ClientError, QueryClient, QueryResponse};
pub use dispatch::{DispatchError, DispatchRecord, Dispatcher, ExplorerUpdates, NoticeAttrs};
pub use persistence::{Persistence, PersistenceError};
pub use store::ExplorerStore;
pub use types::{AnalysisType, Explorer, ExplorerId, PersistedExplorer, Query, RequestParams};
pub use validation::{run_validations, ValidationOutcome};
