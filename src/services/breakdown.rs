//! Month and country breakdowns derived from the geo/date results.

use std::collections::BTreeMap;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::api::AssayId;
use crate::models::bucket::{BucketCounts, MismatchBucket};
use crate::models::dates::{month_label, parse_date, DateRange};
use crate::resources::model::GeoAssay;

/// One labelled point of a breakdown (a month or a country).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownPoint {
    pub label: String,
    #[serde(flatten)]
    pub counts: BucketCounts,
    pub total: u64,
}

/// A breakdown of one assay's results over months or countries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BreakdownSeries {
    pub assay_id: AssayId,
    pub points: Vec<BreakdownPoint>,
    /// Echoed when the series was date-filtered.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub range: Option<DateRange>,
}

/// Per-month counts in chronological label order. Every dated entry
/// participates; dates that are already month- or year-granular keep
/// their truncated label.
pub fn month_series(assay_id: &AssayId, data: &GeoAssay) -> BreakdownSeries {
    let mut months: BTreeMap<String, BucketCounts> = BTreeMap::new();
    for &bucket in MismatchBucket::ALL.iter() {
        let Some(series) = data.get(bucket.geo_series()) else {
            continue;
        };
        for dates in series.values() {
            for (date, &count) in dates {
                months
                    .entry(month_label(date).to_string())
                    .or_default()
                    .add(bucket, count);
            }
        }
    }
    BreakdownSeries {
        assay_id: assay_id.clone(),
        points: months
            .into_iter()
            .map(|(label, counts)| point(label, counts))
            .collect(),
        range: None,
    }
}

/// Per-country counts, descending by total; ties keep the order countries
/// first appear in the resource. With a range, entries outside it (and
/// entries whose date does not parse) are excluded and countries left at
/// zero are dropped.
pub fn country_series(
    assay_id: &AssayId,
    data: &GeoAssay,
    range: Option<DateRange>,
) -> BreakdownSeries {
    let mut countries: IndexMap<String, BucketCounts> = IndexMap::new();
    for &bucket in MismatchBucket::ALL.iter() {
        let Some(series) = data.get(bucket.geo_series()) else {
            continue;
        };
        for (country, dates) in series {
            let entry = countries.entry(country.clone()).or_default();
            for (date, &count) in dates {
                if in_range(date, range) {
                    entry.add(bucket, count);
                }
            }
        }
    }
    let mut points: Vec<BreakdownPoint> = countries
        .into_iter()
        .map(|(label, counts)| point(label, counts))
        .collect();
    if range.is_some() {
        points.retain(|p| p.total > 0);
    }
    points.sort_by(|a, b| b.total.cmp(&a.total));
    BreakdownSeries {
        assay_id: assay_id.clone(),
        points,
        range,
    }
}

pub(crate) fn in_range(date: &str, range: Option<DateRange>) -> bool {
    match range {
        None => true,
        Some(range) => parse_date(date).is_some_and(|d| range.contains(d)),
    }
}

fn point(label: String, counts: BucketCounts) -> BreakdownPoint {
    let total = counts.total();
    BreakdownPoint {
        label,
        counts,
        total,
    }
}
