//! Query definitions and request-parameter derivation.
//!
//! A `Query` holds raw user intent (string fields may be empty); deriving
//! `RequestParams` is where empty fields are stripped and incomplete
//! filters dropped, so nothing half-formed ever reaches the query client.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Extraction queries without an explicit window are capped to the 100
/// most recent events to bound payload size.
pub const EXTRACTION_EVENT_LIMIT: u64 = 100;

/// Analysis type of a query.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnalysisType {
    Count,
    CountUnique,
    Sum,
    Average,
    Minimum,
    Maximum,
    SelectUnique,
    Median,
    Percentile,
    Extraction,
}

impl AnalysisType {
    /// Whether this analysis type operates on a target property.
    pub fn requires_target_property(self) -> bool {
        !matches!(self, AnalysisType::Count | AnalysisType::Extraction)
    }
}

/// A single event filter. Fields fill in one at a time as the user builds
/// the filter, so any of them may still be missing.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Filter {
    pub property_name: Option<String>,
    pub operator: Option<String>,
    pub property_value: Option<Value>,
}

impl Filter {
    /// Create a complete filter.
    pub fn new(
        property_name: impl Into<String>,
        operator: impl Into<String>,
        property_value: Value,
    ) -> Self {
        Self {
            property_name: Some(property_name.into()),
            operator: Some(operator.into()),
            property_value: Some(property_value),
        }
    }

    /// A filter is complete once all three parts are present and non-empty.
    pub fn is_complete(&self) -> bool {
        has_text(&self.property_name) && has_text(&self.operator) && self.property_value.is_some()
    }
}

/// A structured analysis request as edited by the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Query {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_collection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_type: Option<AnalysisType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_property: Option<String>,
    /// Raw user-entered event window. Empty counts as absent.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,
}

impl Query {
    /// Whether the query specifies a usable event window.
    pub fn has_latest(&self) -> bool {
        has_text(&self.latest)
    }

    /// Copy of the query with empty string fields dropped entirely and
    /// incomplete filters removed.
    pub fn sanitized(&self) -> Query {
        Query {
            event_collection: non_empty(&self.event_collection),
            analysis_type: self.analysis_type,
            target_property: non_empty(&self.target_property),
            latest: non_empty(&self.latest),
            email: non_empty(&self.email),
            timeframe: non_empty(&self.timeframe),
            group_by: non_empty(&self.group_by),
            interval: non_empty(&self.interval),
            filters: self
                .filters
                .iter()
                .filter(|f| f.is_complete())
                .cloned()
                .collect(),
        }
    }
}

/// Derived request parameters sent to the query client.
///
/// Absent fields are skipped during serialization, so an empty `latest`
/// never reaches the wire as a key at all.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RequestParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_collection: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub analysis_type: Option<AnalysisType>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub target_property: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latest: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub group_by: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<String>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub filters: Vec<Filter>,
}

/// Derive request parameters from a query.
pub fn format_request_params(query: &Query) -> RequestParams {
    let clean = query.sanitized();
    RequestParams {
        event_collection: clean.event_collection,
        analysis_type: clean.analysis_type,
        target_property: clean.target_property,
        latest: clean.latest.as_deref().and_then(|v| v.parse::<u64>().ok()),
        email: clean.email,
        timeframe: clean.timeframe,
        group_by: clean.group_by,
        interval: clean.interval,
        filters: clean.filters,
    }
}

fn has_text(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.trim().is_empty())
}

fn non_empty(value: &Option<String>) -> Option<String> {
    value
        .as_deref()
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
