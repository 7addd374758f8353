//! Database totals and tree-wide statistics.

use serde::{Deserialize, Serialize};

use crate::format::group_thousands;
use crate::resources::model::{DbTotals, StatsFile};

/// Sequence database totals with thousands-grouped display forms.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatabaseTotals {
    pub gisaid_total: u64,
    pub gisaid_display: String,
    pub genbank_total: u64,
    pub genbank_display: String,
    pub overlap: u64,
    pub overlap_display: String,
    pub final_db_total: u64,
    pub final_db_display: String,
    /// Passed through as the pipeline wrote it.
    pub final_date: String,
}

/// Tree-wide counters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeStats {
    pub assay_num: u64,
    pub collapsed_genome_num: u64,
    pub collapsed_genome_display: String,
    pub leaf_num: u64,
    pub leaf_display: String,
    /// Assay count times collapsed genome count, the number of
    /// (assay, genome) evaluations behind the dashboard.
    pub result_num: u64,
    pub result_display: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsData {
    pub totals: DatabaseTotals,
    pub tree: TreeStats,
}

pub fn stats_data(totals: &DbTotals, stats: &StatsFile) -> StatsData {
    let assay_num = stats.tree.assay_stats.len() as u64;
    let result_num = assay_num * stats.tree.collapsed_genome_num;
    StatsData {
        totals: DatabaseTotals {
            gisaid_total: totals.gisaid_total,
            gisaid_display: group_thousands(totals.gisaid_total),
            genbank_total: totals.genbank_total,
            genbank_display: group_thousands(totals.genbank_total),
            overlap: totals.overlap,
            overlap_display: group_thousands(totals.overlap),
            final_db_total: totals.final_db_total,
            final_db_display: group_thousands(totals.final_db_total),
            final_date: totals.final_date.clone(),
        },
        tree: TreeStats {
            assay_num,
            collapsed_genome_num: stats.tree.collapsed_genome_num,
            collapsed_genome_display: group_thousands(stats.tree.collapsed_genome_num),
            leaf_num: stats.tree.leaf_num,
            leaf_display: group_thousands(stats.tree.leaf_num),
            result_num,
            result_display: group_thousands(result_num),
        },
    }
}
