//! Wire models for the static dashboard resources.
//!
//! The offline pipeline is loose about JSON scalar types: counts and
//! ratios frequently arrive as quoted strings ("recall": "0.9937..."),
//! so the numeric fields here accept either encoding. Unknown fields are
//! ignored throughout; missing required fields surface as decode errors
//! naming the offending path.

use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};

/// Oligo keys used by the per-(assay, genome) detail records.
pub const FORWARD_PRIMER: &str = "Forward Primer";
pub const REVERSE_PRIMER: &str = "Reverse Primer";
pub const PROBE: &str = "Probe";

// ---------------------------------------------------------------------------
// Summary table (summary_table.json)
// ---------------------------------------------------------------------------

/// Top-level summary table file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryTable {
    #[serde(default)]
    pub data: Vec<SummaryTableRow>,
    /// Generation timestamp written by the offline pipeline.
    #[serde(rename = "Timestamp", default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}

/// One per-assay row of the summary table.
///
/// The pipeline emits counts for every mismatch tally it keeps; only the
/// ones the dashboard consumes are modeled here. `recall` and
/// `three_mm_p_fail` are optional so a row can be rebuilt from its counts
/// when the pipeline omitted them.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryTableRow {
    pub name: String,
    #[serde(default, deserialize_with = "de_opt_ratio")]
    pub recall: Option<f64>,
    #[serde(default, deserialize_with = "de_count")]
    pub perfect_match: u64,
    #[serde(rename = "1_mm", default, deserialize_with = "de_count")]
    pub one_mm: u64,
    #[serde(rename = "2_mm", default, deserialize_with = "de_count")]
    pub two_mm: u64,
    #[serde(rename = "3_mm", default, deserialize_with = "de_count")]
    pub three_mm: u64,
    #[serde(rename = "4_mm", default, deserialize_with = "de_count")]
    pub four_mm: u64,
    #[serde(rename = "5_mm", default, deserialize_with = "de_count")]
    pub five_mm: u64,
    #[serde(rename = "6_mm", default, deserialize_with = "de_count")]
    pub six_mm: u64,
    #[serde(rename = "7_mm", default, deserialize_with = "de_count")]
    pub seven_mm: u64,
    /// Eight or more mismatches plus outright failures.
    #[serde(rename = "8_mm_p_fail", default, deserialize_with = "de_count")]
    pub eight_mm_p_fail: u64,
    /// Three or more mismatches plus outright failures; the recall
    /// denominator's complement.
    #[serde(rename = "3_mm_p_fail", default, deserialize_with = "de_opt_count")]
    pub three_mm_p_fail: Option<u64>,
}

// ---------------------------------------------------------------------------
// Per-assay stats (<dataset>.xml.stats.json)
// ---------------------------------------------------------------------------

/// Top-level stats file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StatsFile {
    pub tree: TreeSection,
}

/// Tree-wide counters and per-assay definitions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TreeSection {
    #[serde(default, deserialize_with = "de_count")]
    pub collapsed_genome_num: u64,
    #[serde(default, deserialize_with = "de_count")]
    pub leaf_num: u64,
    /// Rendered-node id to genome accession map.
    #[serde(default)]
    pub nid_to_acc: BTreeMap<String, String>,
    #[serde(default)]
    pub assay_stats: IndexMap<String, AssayStats>,
}

/// Per-assay entry in the stats file.
///
/// The file also carries precomputed month/country rollups; those are
/// superseded by the geo/date resource and not parsed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssayStats {
    pub assay_sequence: AssaySequence,
}

/// Primer/probe triplet defining one assay.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssaySequence {
    pub forward_primer: String,
    pub reverse_primer: String,
    pub probe: String,
}

// ---------------------------------------------------------------------------
// Database totals (db_totals.json)
// ---------------------------------------------------------------------------

/// Sequence database totals at pipeline run time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DbTotals {
    #[serde(rename = "GISAID_tot", default, deserialize_with = "de_count")]
    pub gisaid_total: u64,
    #[serde(rename = "GenBank_tot", default, deserialize_with = "de_count")]
    pub genbank_total: u64,
    #[serde(rename = "final_date", default)]
    pub final_date: String,
    #[serde(rename = "final_db_tot", default, deserialize_with = "de_count")]
    pub final_db_total: u64,
    #[serde(default, deserialize_with = "de_count")]
    pub overlap: u64,
}

// ---------------------------------------------------------------------------
// Country coordinates (country_latlngs.json)
// ---------------------------------------------------------------------------

/// Country key to map coordinates and display name.
pub type CountryCoords = HashMap<String, CountryCoord>;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CountryCoord {
    #[serde(deserialize_with = "de_float")]
    pub latitude: f64,
    #[serde(deserialize_with = "de_float")]
    pub longitude: f64,
    /// Display name, distinct from the lookup key.
    pub country: String,
}

// ---------------------------------------------------------------------------
// Geo/date mismatch results (<dataset>.xml.geo.json)
// ---------------------------------------------------------------------------

/// Assay id to named series. Key order follows the file.
pub type GeoResults = IndexMap<String, GeoAssay>;

/// Series name ("Perfect match", ..., "Total failures") to countries.
pub type GeoAssay = IndexMap<String, GeoSeries>;

/// Country to collection date to count. Dates sort chronologically
/// because they are zero-padded ISO strings.
pub type GeoSeries = IndexMap<String, BTreeMap<String, u64>>;

// ---------------------------------------------------------------------------
// Genome metadata (<dataset>.xml.json)
// ---------------------------------------------------------------------------

/// Genome id to its metadata fields, in file order.
pub type MetadataMap = HashMap<String, IndexMap<String, serde_json::Value>>;

// ---------------------------------------------------------------------------
// Per-(assay, genome) detail (assay_result_json/<assay>/<genome>.json)
// ---------------------------------------------------------------------------

/// Full per-pair match record fetched lazily on demand.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AssayGenomeDetail {
    #[serde(rename = "Thermo", default)]
    pub thermo: BTreeMap<String, OligoThermo>,
    /// Free-form composition summary (amplicon range, GC%, clamps).
    #[serde(rename = "Composition", default)]
    pub composition: serde_json::Map<String, serde_json::Value>,
    #[serde(rename = "Alignments", default)]
    pub alignments: BTreeMap<String, OligoAlignment>,
    #[serde(rename = "Values", default)]
    pub values: BTreeMap<String, OligoValues>,
    #[serde(rename = "Common Name", default, skip_serializing_if = "Option::is_none")]
    pub common_name: Option<String>,
}

/// Thermodynamic constants for one oligo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OligoThermo {
    #[serde(rename = "dG", default, deserialize_with = "de_opt_float")]
    pub dg: Option<f64>,
    #[serde(rename = "dH", default, deserialize_with = "de_opt_float")]
    pub dh: Option<f64>,
    #[serde(rename = "dS", default, deserialize_with = "de_opt_float")]
    pub ds: Option<f64>,
}

/// Alignment strings for one oligo.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OligoAlignment {
    #[serde(rename = "5'", default)]
    pub five_prime: String,
    #[serde(rename = "3'", default)]
    pub three_prime: String,
    #[serde(default)]
    pub pairing: String,
}

/// Per-oligo match values. A negative mismatch count is the pipeline's
/// failure marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OligoValues {
    #[serde(default, deserialize_with = "de_opt_int")]
    pub mismatches: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_int")]
    pub gaps: Option<i64>,
    #[serde(default, deserialize_with = "de_opt_float")]
    pub tm: Option<f64>,
    #[serde(rename = "hairpin tm", default, deserialize_with = "de_opt_float")]
    pub hairpin_tm: Option<f64>,
    #[serde(rename = "homodimer tm", default, deserialize_with = "de_opt_float")]
    pub homodimer_tm: Option<f64>,
}

// ---------------------------------------------------------------------------
// Flexible scalar decoding
// ---------------------------------------------------------------------------

#[derive(Deserialize)]
#[serde(untagged)]
enum MaybeQuoted<T> {
    Value(T),
    Text(String),
}

fn de_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    match MaybeQuoted::<u64>::deserialize(deserializer)? {
        MaybeQuoted::Value(n) => Ok(n),
        MaybeQuoted::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid count '{}'", s))),
    }
}

fn de_opt_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<u64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Value(u64),
        Text(String),
        Null(()),
    }
    match Raw::deserialize(deserializer)? {
        Raw::Value(n) => Ok(Some(n)),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid count '{}'", s))),
        Raw::Null(()) => Ok(None),
    }
}

fn de_opt_int<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Value(i64),
        Text(String),
        Null(()),
    }
    match Raw::deserialize(deserializer)? {
        Raw::Value(n) => Ok(Some(n)),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid integer '{}'", s))),
        Raw::Null(()) => Ok(None),
    }
}

fn de_float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    match MaybeQuoted::<f64>::deserialize(deserializer)? {
        MaybeQuoted::Value(v) => Ok(v),
        MaybeQuoted::Text(s) => s
            .trim()
            .parse()
            .map_err(|_| serde::de::Error::custom(format!("invalid number '{}'", s))),
    }
}

fn de_opt_float<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Value(f64),
        Text(String),
        Null(()),
    }
    match Raw::deserialize(deserializer)? {
        Raw::Value(v) => Ok(Some(v)),
        Raw::Text(s) => s
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("invalid number '{}'", s))),
        Raw::Null(()) => Ok(None),
    }
}

/// Like `de_opt_float`, but a string that fails to parse becomes `None`
/// instead of an error. Used for the wire recall, which falls back to
/// derivation from counts when unusable.
fn de_opt_ratio<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Value(f64),
        Text(String),
        Other(serde::de::IgnoredAny),
    }
    Ok(match Raw::deserialize(deserializer)? {
        Raw::Value(v) => Some(v),
        Raw::Text(s) => s.trim().parse().ok(),
        Raw::Other(_) => None,
    })
}
