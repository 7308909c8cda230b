//! Query execution client seam.
//!
//! The transport lives outside this crate; the orchestrator only needs a
//! way to hand derived request parameters to something that answers with
//! a result payload or an error.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::types::RequestParams;

/// Query client errors
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("query request failed: {0}")]
    Request(String),
}

/// Response payload of a successful analysis request.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResponse {
    pub result: Value,
}

impl QueryResponse {
    pub fn new(result: Value) -> Self {
        Self { result }
    }
}

/// Client capable of running an analysis request.
#[async_trait]
pub trait QueryClient: Send + Sync {
    /// Issue the analysis request described by `request`.
    async fn run(&self, request: RequestParams) -> Result<QueryResponse, ClientError>;
}
