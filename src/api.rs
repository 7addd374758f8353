//! Public API surface for the aggregation service.
//!
//! This file consolidates the DTO types for the HTTP API.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::models::bucket::BucketSelection;
pub use crate::models::bucket::MismatchBucket;
pub use crate::models::dates::DateRange;
pub use crate::services::assays::AssayDetail;
pub use crate::services::assays::AssayListData;
pub use crate::services::breakdown::BreakdownPoint;
pub use crate::services::breakdown::BreakdownSeries;
pub use crate::services::detail::MatchResult;
pub use crate::services::map::MapData;
pub use crate::services::map::MapMarker;
pub use crate::services::map::MapViewState;
pub use crate::services::metadata::GenomeMetadata;
pub use crate::services::metadata::MetadataField;
pub use crate::services::metadata::TreeNodeMap;
pub use crate::services::stats::DatabaseTotals;
pub use crate::services::stats::StatsData;
pub use crate::services::stats::TreeStats;
pub use crate::services::summary::SummaryData;
pub use crate::services::summary::SummaryRow;
pub use crate::services::summary::TopAssay;
pub use crate::services::summary::TopAssaysData;

use serde::{Deserialize, Serialize};

/// Assay identifier (summary-table row name / stats key).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssayId(pub String);

/// Genome identifier (sequence database accession).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GenomeId(pub String);

impl AssayId {
    pub fn new(value: impl Into<String>) -> Self {
        AssayId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl GenomeId {
    pub fn new(value: impl Into<String>) -> Self {
        GenomeId(value.into())
    }

    pub fn value(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for AssayId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
impl std::fmt::Display for GenomeId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for AssayId {
    fn from(value: String) -> Self {
        AssayId(value)
    }
}
impl From<&str> for AssayId {
    fn from(value: &str) -> Self {
        AssayId(value.to_string())
    }
}
impl From<String> for GenomeId {
    fn from(value: String) -> Self {
        GenomeId(value)
    }
}
impl From<&str> for GenomeId {
    fn from(value: &str) -> Self {
        GenomeId(value.to_string())
    }
}
