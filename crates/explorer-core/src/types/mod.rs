//! Core type definitions for the explorer workspace
//!
//! This module contains the fundamental types used throughout the system:
//! - Query: a structured analysis request plus its derivation into request params
//! - Explorer: a saved or in-progress query configuration with its last result
//! - PersistedExplorer: the raw record shape exchanged with the persistence backend

mod explorer;
mod query;

pub use explorer::{Explorer, ExplorerId, PersistedExplorer, Visualization};
pub use query::{
    format_request_params, AnalysisType, Filter, Query, RequestParams, EXTRACTION_EVENT_LIMIT,
};
