//! Map marker projection for one assay, bucket and date window.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::api::AssayId;
use crate::models::bucket::BucketSelection;
use crate::models::dates::DateRange;
use crate::resources::model::{CountryCoords, GeoAssay};
use crate::services::breakdown::in_range;

/// Marker radius multiplier over ln(count + 1).
pub const RADIUS_SCALE: f64 = 10.0;

/// Effective view state echoed with every map response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapViewState {
    pub assay_id: AssayId,
    /// Bucket selection code ("0".."8", or "A" for total failures).
    pub bucket: String,
    pub bucket_label: String,
    pub color: String,
    pub range: DateRange,
}

/// One circle marker.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapMarker {
    /// Country display name from the coordinate lookup.
    pub country: String,
    pub latitude: f64,
    pub longitude: f64,
    pub count: u64,
    pub radius: f64,
}

/// Markers for one view, largest count first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MapData {
    pub view: MapViewState,
    pub markers: Vec<MapMarker>,
}

/// ln(count + 1) scaled into pixels.
pub fn marker_radius(count: u64) -> f64 {
    ((count + 1) as f64).ln() * RADIUS_SCALE
}

/// Project one assay's selected series onto the map. Countries with no
/// in-range results are dropped; countries missing from the coordinate
/// lookup are skipped.
pub fn map_data(
    assay_id: &AssayId,
    data: &GeoAssay,
    selection: BucketSelection,
    range: DateRange,
    coords: &CountryCoords,
) -> MapData {
    let mut totals: IndexMap<&str, u64> = IndexMap::new();
    if let Some(series) = data.get(selection.geo_series()) {
        for (country, dates) in series {
            let entry = totals.entry(country.as_str()).or_insert(0);
            for (date, &count) in dates {
                if in_range(date, Some(range)) {
                    *entry += count;
                }
            }
        }
    }
    totals.retain(|_, total| *total > 0);
    totals.sort_by(|_, a, _, b| b.cmp(a));

    let markers = totals
        .into_iter()
        .filter_map(|(country, count)| match coords.get(country) {
            Some(coord) => Some(MapMarker {
                country: coord.country.clone(),
                latitude: coord.latitude,
                longitude: coord.longitude,
                count,
                radius: marker_radius(count),
            }),
            None => {
                tracing::debug!(country, "no coordinates for country, marker skipped");
                None
            }
        })
        .collect();

    MapData {
        view: MapViewState {
            assay_id: assay_id.clone(),
            bucket: selection.code().to_string(),
            bucket_label: selection.label().to_string(),
            color: selection.color().to_string(),
            range,
        },
        markers,
    }
}
