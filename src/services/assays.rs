//! Assay listing and per-assay definitions.

use serde::{Deserialize, Serialize};

use crate::api::AssayId;
use crate::resources::model::{AssaySequence, StatsFile, SummaryTable};
use crate::services::summary::{build_row, SummaryRow};

/// Assay ids in resource order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssayListData {
    pub assays: Vec<AssayId>,
}

/// One assay's primer/probe definition plus its summary row, when the
/// summary table knows the assay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssayDetail {
    pub assay_id: AssayId,
    pub sequences: AssaySequence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryRow>,
}

pub fn assay_list(stats: &StatsFile) -> AssayListData {
    AssayListData {
        assays: stats
            .tree
            .assay_stats
            .keys()
            .map(|name| AssayId::new(name.clone()))
            .collect(),
    }
}

/// Look up one assay. The summary table is optional so definitions stay
/// servable when that resource failed to load.
pub fn assay_detail(
    stats: &StatsFile,
    summary: Option<&SummaryTable>,
    assay_id: &AssayId,
) -> Option<AssayDetail> {
    let entry = stats.tree.assay_stats.get(assay_id.value())?;
    let summary = summary.and_then(|table| {
        table
            .data
            .iter()
            .find(|row| row.name == assay_id.value())
            .map(build_row)
    });
    Some(AssayDetail {
        assay_id: assay_id.clone(),
        sequences: entry.assay_sequence.clone(),
        summary,
    })
}
