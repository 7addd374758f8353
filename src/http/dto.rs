//! Data Transfer Objects for the HTTP API.
//!
//! These DTOs are used for request/response serialization in the REST API.
//! Most view DTOs are re-exported from the api module since they already
//! derive Serialize/Deserialize.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// Re-export existing DTOs that are already serializable
pub use crate::api::{
    // Assays
    AssayDetail, AssayListData,
    // Breakdown
    BreakdownPoint, BreakdownSeries,
    // Detail
    MatchResult,
    // Map
    MapData, MapMarker, MapViewState,
    // Metadata
    GenomeMetadata, MetadataField, TreeNodeMap,
    // Stats
    DatabaseTotals, StatsData, TreeStats,
    // Summary
    SummaryData, SummaryRow, TopAssay, TopAssaysData,
};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// "ok" when every resource loaded, "degraded" otherwise
    pub status: String,
    /// Version of the API
    pub version: String,
    /// Per-resource load status: "ok" or the load error
    pub resources: BTreeMap<String, String>,
}

/// Query parameters for the top-assays endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct TopQuery {
    /// Number of assays to return (default: 5)
    #[serde(default)]
    pub n: Option<usize>,
}

/// Query parameters for the map endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct MapQuery {
    /// Bucket selection code: "0".."3", "5", "8", or "A" (default: "0")
    #[serde(default)]
    pub bucket: Option<String>,
    /// Inclusive range start (default: 180 days before the end)
    #[serde(default)]
    pub start: Option<NaiveDate>,
    /// Inclusive range end (default: today)
    #[serde(default)]
    pub end: Option<NaiveDate>,
}
