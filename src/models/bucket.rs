//! Mismatch buckets and classification.
//!
//! Every (assay, genome) match result lands in exactly one of six buckets.
//! The upstream pipeline encodes outright assay failures as negative
//! mismatch counts, so classification starts from a raw signed value.

use serde::{Deserialize, Serialize};

/// Raw mismatch outcome for one (assay, genome) pair as delivered upstream.
///
/// A negative raw count is the pipeline's marker for an assay failure
/// (no usable alignment), not a count of mismatches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MismatchCount {
    /// Number of mismatched bases, zero or more.
    Count(u32),
    /// Upstream failure marker (negative raw value).
    Failure,
}

impl MismatchCount {
    /// Interpret a raw signed count from the wire.
    pub fn from_raw(raw: i64) -> Self {
        if raw < 0 {
            MismatchCount::Failure
        } else {
            // Counts past u32::MAX saturate; they classify as 8+ either way.
            MismatchCount::Count(u32::try_from(raw).unwrap_or(u32::MAX))
        }
    }
}

impl From<i64> for MismatchCount {
    fn from(raw: i64) -> Self {
        MismatchCount::from_raw(raw)
    }
}

/// Canonical mismatch bucket.
///
/// The variants are mutually exclusive and cover every possible count as
/// well as the failure marker, so classification is total.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum MismatchBucket {
    /// Zero mismatches.
    #[serde(rename = "0")]
    PerfectMatch,
    #[serde(rename = "1")]
    OneMismatch,
    #[serde(rename = "2")]
    TwoMismatches,
    #[serde(rename = "3")]
    ThreeMismatches,
    /// Four to seven mismatches.
    #[serde(rename = "4-7")]
    FourToSeven,
    /// Eight or more mismatches, or an outright assay failure.
    #[serde(rename = "8+")]
    EightPlusOrFailure,
}

impl MismatchBucket {
    /// All buckets in display order.
    pub const ALL: [MismatchBucket; 6] = [
        MismatchBucket::PerfectMatch,
        MismatchBucket::OneMismatch,
        MismatchBucket::TwoMismatches,
        MismatchBucket::ThreeMismatches,
        MismatchBucket::FourToSeven,
        MismatchBucket::EightPlusOrFailure,
    ];

    /// Classify a raw mismatch outcome into its bucket.
    pub fn classify(count: MismatchCount) -> Self {
        match count {
            MismatchCount::Failure => MismatchBucket::EightPlusOrFailure,
            MismatchCount::Count(0) => MismatchBucket::PerfectMatch,
            MismatchCount::Count(1) => MismatchBucket::OneMismatch,
            MismatchCount::Count(2) => MismatchBucket::TwoMismatches,
            MismatchCount::Count(3) => MismatchBucket::ThreeMismatches,
            MismatchCount::Count(4..=7) => MismatchBucket::FourToSeven,
            MismatchCount::Count(_) => MismatchBucket::EightPlusOrFailure,
        }
    }

    /// Short key used in stats payloads ("0", "1", ..., "8+").
    pub fn stat_key(&self) -> &'static str {
        match self {
            MismatchBucket::PerfectMatch => "0",
            MismatchBucket::OneMismatch => "1",
            MismatchBucket::TwoMismatches => "2",
            MismatchBucket::ThreeMismatches => "3",
            MismatchBucket::FourToSeven => "4-7",
            MismatchBucket::EightPlusOrFailure => "8+",
        }
    }

    /// Series name used by the geo/date resource.
    pub fn geo_series(&self) -> &'static str {
        match self {
            MismatchBucket::PerfectMatch => "Perfect match",
            MismatchBucket::OneMismatch => "1 mismatch",
            MismatchBucket::TwoMismatches => "2 mismatches",
            MismatchBucket::ThreeMismatches => "3 mismatches",
            MismatchBucket::FourToSeven => "4-7 mismatches",
            MismatchBucket::EightPlusOrFailure => "8+/failures",
        }
    }

    /// One-character selection code used by the map layer.
    pub fn code(&self) -> &'static str {
        match self {
            MismatchBucket::PerfectMatch => "0",
            MismatchBucket::OneMismatch => "1",
            MismatchBucket::TwoMismatches => "2",
            MismatchBucket::ThreeMismatches => "3",
            MismatchBucket::FourToSeven => "5",
            MismatchBucket::EightPlusOrFailure => "8",
        }
    }

    /// Marker color for this bucket.
    pub fn color(&self) -> &'static str {
        match self {
            MismatchBucket::PerfectMatch => "#4e73df",
            MismatchBucket::OneMismatch => "#858796",
            MismatchBucket::TwoMismatches => "#76b7b2",
            MismatchBucket::ThreeMismatches => "#edc949",
            MismatchBucket::FourToSeven => "#f28e2c",
            MismatchBucket::EightPlusOrFailure => "#e15759",
        }
    }

    /// Human-readable label shown in selectors and marker popups.
    pub fn label(&self) -> &'static str {
        match self {
            MismatchBucket::PerfectMatch => "Perfect Match",
            MismatchBucket::OneMismatch => "1 Mismatch",
            MismatchBucket::TwoMismatches => "2 Mismatches",
            MismatchBucket::ThreeMismatches => "3 Mismatches",
            MismatchBucket::FourToSeven => "4-7 Mismatches",
            MismatchBucket::EightPlusOrFailure => "8+/Failure",
        }
    }
}

/// Bucket choice for the mismatch map: one concrete bucket or the
/// aggregate "Total failures" series the pipeline precomputes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BucketSelection {
    Bucket(MismatchBucket),
    TotalFailures,
}

impl BucketSelection {
    /// Selection code as used in map requests ("0".."8", "A").
    pub fn code(&self) -> &'static str {
        match self {
            BucketSelection::Bucket(b) => b.code(),
            BucketSelection::TotalFailures => "A",
        }
    }

    /// Name of the geo/date series backing this selection.
    pub fn geo_series(&self) -> &'static str {
        match self {
            BucketSelection::Bucket(b) => b.geo_series(),
            BucketSelection::TotalFailures => "Total failures",
        }
    }

    /// Marker color for this selection.
    pub fn color(&self) -> &'static str {
        match self {
            BucketSelection::Bucket(b) => b.color(),
            BucketSelection::TotalFailures => "#db4655",
        }
    }

    /// Human-readable label shown in selectors and marker popups.
    pub fn label(&self) -> &'static str {
        match self {
            BucketSelection::Bucket(b) => b.label(),
            BucketSelection::TotalFailures => "Total failures",
        }
    }
}

impl std::str::FromStr for BucketSelection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "0" => Ok(BucketSelection::Bucket(MismatchBucket::PerfectMatch)),
            "1" => Ok(BucketSelection::Bucket(MismatchBucket::OneMismatch)),
            "2" => Ok(BucketSelection::Bucket(MismatchBucket::TwoMismatches)),
            "3" => Ok(BucketSelection::Bucket(MismatchBucket::ThreeMismatches)),
            "5" => Ok(BucketSelection::Bucket(MismatchBucket::FourToSeven)),
            "8" => Ok(BucketSelection::Bucket(MismatchBucket::EightPlusOrFailure)),
            "A" | "a" => Ok(BucketSelection::TotalFailures),
            other => Err(format!("Unknown bucket selection '{}'", other)),
        }
    }
}

/// Per-bucket tallies for one group (an assay, a month, a country).
///
/// Field names serialize with the summary table's column vocabulary.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BucketCounts {
    #[serde(default)]
    pub perfect_match: u64,
    #[serde(rename = "1_mm", default)]
    pub one_mm: u64,
    #[serde(rename = "2_mm", default)]
    pub two_mm: u64,
    #[serde(rename = "3_mm", default)]
    pub three_mm: u64,
    #[serde(rename = "4_7_mm", default)]
    pub four_to_seven_mm: u64,
    #[serde(rename = "8_mm_p_fail", default)]
    pub eight_plus_or_fail: u64,
}

impl BucketCounts {
    /// Count stored for one bucket.
    pub fn get(&self, bucket: MismatchBucket) -> u64 {
        match bucket {
            MismatchBucket::PerfectMatch => self.perfect_match,
            MismatchBucket::OneMismatch => self.one_mm,
            MismatchBucket::TwoMismatches => self.two_mm,
            MismatchBucket::ThreeMismatches => self.three_mm,
            MismatchBucket::FourToSeven => self.four_to_seven_mm,
            MismatchBucket::EightPlusOrFailure => self.eight_plus_or_fail,
        }
    }

    /// Add `n` results to one bucket.
    pub fn add(&mut self, bucket: MismatchBucket, n: u64) {
        match bucket {
            MismatchBucket::PerfectMatch => self.perfect_match += n,
            MismatchBucket::OneMismatch => self.one_mm += n,
            MismatchBucket::TwoMismatches => self.two_mm += n,
            MismatchBucket::ThreeMismatches => self.three_mm += n,
            MismatchBucket::FourToSeven => self.four_to_seven_mm += n,
            MismatchBucket::EightPlusOrFailure => self.eight_plus_or_fail += n,
        }
    }

    /// Total results across all buckets.
    pub fn total(&self) -> u64 {
        MismatchBucket::ALL.iter().map(|b| self.get(*b)).sum()
    }

    /// Results counted as detected (at most two mismatches).
    pub fn detected(&self) -> u64 {
        self.perfect_match + self.one_mm + self.two_mm
    }
}
