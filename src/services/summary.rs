//! Per-assay summary rows and the top-assays ranking.

use serde::{Deserialize, Serialize};

use crate::format;
use crate::models::bucket::{BucketCounts, MismatchBucket};
use crate::resources::model::{SummaryTable, SummaryTableRow};

/// Number of rows feeding the top-assays chart when the caller does not
/// ask for a different cut.
pub const DEFAULT_TOP_N: usize = 5;

/// One derived per-assay summary row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryRow {
    pub name: String,
    /// Unrounded recall, kept full-precision for ordering.
    pub recall: f64,
    /// Recall as a percent, truncated to at most two decimals.
    pub recall_display: String,
    #[serde(flatten)]
    pub counts: BucketCounts,
    /// Three or more mismatches plus failures, the table's last column.
    #[serde(rename = "3_mm_p_fail")]
    pub three_mm_p_fail: u64,
    /// Genomes the assay was evaluated against.
    pub total: u64,
}

/// The full summary table view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryData {
    pub rows: Vec<SummaryRow>,
    /// Pipeline run timestamp, when the resource carries one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub generated_at: Option<String>,
}

/// One stacked-bar segment of a top-chart entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BucketPercent {
    pub bucket: MismatchBucket,
    pub count: u64,
    /// Percent of the row total, truncated like the recall display.
    pub percent: String,
}

/// One entry of the top-assays chart.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopAssay {
    pub name: String,
    pub recall: f64,
    pub recall_display: String,
    /// Segments in canonical bucket order.
    pub buckets: Vec<BucketPercent>,
    pub total: u64,
}

/// Top-N assays by recall.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopAssaysData {
    pub assays: Vec<TopAssay>,
}

/// Derive the summary rows in table order.
pub fn summary_data(table: &SummaryTable) -> SummaryData {
    SummaryData {
        rows: table.data.iter().map(build_row).collect(),
        generated_at: table.timestamp.clone(),
    }
}

/// Top-N rows by recall, descending; ties keep table order.
pub fn top_assays(table: &SummaryTable, n: Option<usize>) -> TopAssaysData {
    let mut ranked: Vec<SummaryRow> = table.data.iter().map(build_row).collect();
    ranked.sort_by(|a, b| b.recall.partial_cmp(&a.recall).unwrap_or(std::cmp::Ordering::Equal));
    ranked.truncate(n.unwrap_or(DEFAULT_TOP_N));
    TopAssaysData {
        assays: ranked.into_iter().map(top_entry).collect(),
    }
}

pub(crate) fn build_row(row: &SummaryTableRow) -> SummaryRow {
    let counts = BucketCounts {
        perfect_match: row.perfect_match,
        one_mm: row.one_mm,
        two_mm: row.two_mm,
        three_mm: row.three_mm,
        four_to_seven_mm: row.four_mm + row.five_mm + row.six_mm + row.seven_mm,
        eight_plus_or_fail: row.eight_mm_p_fail,
    };
    // The pipeline's 3_mm_p_fail is authoritative when present; rows
    // stripped down to the detected buckets still reconstruct it.
    let three_mm_p_fail = row.three_mm_p_fail.unwrap_or_else(|| {
        counts.three_mm + counts.four_to_seven_mm + counts.eight_plus_or_fail
    });
    let total = counts.detected() + three_mm_p_fail;
    let recall = row.recall.unwrap_or_else(|| {
        if total > 0 {
            counts.detected() as f64 / total as f64
        } else {
            0.0
        }
    });
    SummaryRow {
        name: row.name.clone(),
        recall,
        recall_display: format::percent(recall),
        counts,
        three_mm_p_fail,
        total,
    }
}

fn top_entry(row: SummaryRow) -> TopAssay {
    let buckets = MismatchBucket::ALL
        .iter()
        .map(|&bucket| {
            let count = row.counts.get(bucket);
            let ratio = if row.total > 0 {
                count as f64 / row.total as f64
            } else {
                0.0
            };
            BucketPercent {
                bucket,
                count,
                percent: format::percent(ratio),
            }
        })
        .collect();
    TopAssay {
        name: row.name,
        recall: row.recall,
        recall_display: row.recall_display,
        buckets,
        total: row.total,
    }
}
