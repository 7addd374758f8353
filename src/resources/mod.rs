//! Resource layer: fetching and decoding the static dashboard inputs.
//!
//! Every named resource is fetched exactly once at startup and held as an
//! immutable snapshot for the lifetime of the process. A resource that
//! fails to fetch or decode leaves its slot unavailable; the rest of the
//! store keeps serving. Per-(assay, genome) detail records are the one
//! exception: they are fetched on demand, never at startup.

pub mod error;
pub mod fetcher;
pub mod model;

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde::Serialize;

pub use error::{ResourceError, ResourceResult};
pub use fetcher::{FsFetcher, HttpFetcher, ResourceFetcher};

use crate::config::ResourceLocations;
use model::{
    AssayGenomeDetail, CountryCoords, DbTotals, GeoResults, MetadataMap, StatsFile, SummaryTable,
};

/// Stable resource names, used in logs, errors and the health report.
pub mod names {
    pub const SUMMARY: &str = "summary";
    pub const PHYLOGENY: &str = "phylogeny";
    pub const STATS: &str = "assay-stats";
    pub const DB_TOTALS: &str = "db-totals";
    pub const COORDINATES: &str = "coordinates";
    pub const GEO: &str = "geo";
    pub const METADATA: &str = "metadata";
    pub const DETAIL: &str = "detail";
}

/// Load outcome of one resource, as reported by `/health`.
#[derive(Debug, Clone, Serialize)]
pub struct ResourceStatus {
    pub name: &'static str,
    pub ok: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// One loaded-or-failed resource slot.
struct Slot<T> {
    name: &'static str,
    state: Result<Arc<T>, ResourceError>,
}

impl<T> Slot<T> {
    fn new(name: &'static str, state: ResourceResult<T>) -> Self {
        let state = match state {
            Ok(value) => Ok(Arc::new(value)),
            Err(err) => {
                tracing::warn!(resource = name, error = %err, "resource failed to load");
                Err(err)
            }
        };
        Self { name, state }
    }

    fn get(&self) -> ResourceResult<&T> {
        match &self.state {
            Ok(value) => Ok(value.as_ref()),
            Err(_) => Err(ResourceError::Unavailable { name: self.name }),
        }
    }

    fn shared(&self) -> ResourceResult<Arc<T>> {
        match &self.state {
            Ok(value) => Ok(Arc::clone(value)),
            Err(_) => Err(ResourceError::Unavailable { name: self.name }),
        }
    }

    fn status(&self) -> ResourceStatus {
        ResourceStatus {
            name: self.name,
            ok: self.state.is_ok(),
            error: self.state.as_ref().err().map(|err| err.to_string()),
        }
    }
}

/// Immutable snapshot of every startup resource plus the handle used for
/// on-demand detail fetches.
pub struct ResourceStore {
    summary: Slot<SummaryTable>,
    stats: Slot<StatsFile>,
    geo: Slot<GeoResults>,
    metadata: Slot<MetadataMap>,
    coordinates: Slot<CountryCoords>,
    db_totals: Slot<DbTotals>,
    phylogeny: Slot<Vec<u8>>,
    fetcher: Arc<dyn ResourceFetcher>,
    detail_dir: String,
}

impl ResourceStore {
    /// Fetch and decode every startup resource concurrently. Individual
    /// failures are tolerated; the returned store reports them through
    /// `statuses` and the per-resource accessors.
    pub async fn load(fetcher: Arc<dyn ResourceFetcher>, locations: &ResourceLocations) -> Self {
        let (summary, stats, geo, metadata, coordinates, db_totals, phylogeny) = tokio::join!(
            load_json::<SummaryTable>(fetcher.as_ref(), names::SUMMARY, &locations.summary_table),
            load_json::<StatsFile>(fetcher.as_ref(), names::STATS, &locations.assay_stats),
            load_json::<GeoResults>(fetcher.as_ref(), names::GEO, &locations.geo_results),
            load_json::<MetadataMap>(fetcher.as_ref(), names::METADATA, &locations.metadata),
            load_json::<CountryCoords>(
                fetcher.as_ref(),
                names::COORDINATES,
                &locations.country_coords
            ),
            load_json::<DbTotals>(fetcher.as_ref(), names::DB_TOTALS, &locations.db_totals),
            fetcher.fetch(&locations.phylogeny),
        );
        Self {
            summary: Slot::new(names::SUMMARY, summary),
            stats: Slot::new(names::STATS, stats),
            geo: Slot::new(names::GEO, geo),
            metadata: Slot::new(names::METADATA, metadata),
            coordinates: Slot::new(names::COORDINATES, coordinates),
            db_totals: Slot::new(names::DB_TOTALS, db_totals),
            phylogeny: Slot::new(names::PHYLOGENY, phylogeny),
            fetcher,
            detail_dir: locations.detail_dir.trim_end_matches('/').to_string(),
        }
    }

    pub fn summary(&self) -> ResourceResult<&SummaryTable> {
        self.summary.get()
    }

    pub fn stats(&self) -> ResourceResult<&StatsFile> {
        self.stats.get()
    }

    pub fn geo(&self) -> ResourceResult<&GeoResults> {
        self.geo.get()
    }

    pub fn metadata(&self) -> ResourceResult<&MetadataMap> {
        self.metadata.get()
    }

    pub fn coordinates(&self) -> ResourceResult<&CountryCoords> {
        self.coordinates.get()
    }

    pub fn db_totals(&self) -> ResourceResult<&DbTotals> {
        self.db_totals.get()
    }

    /// Raw phyloXML bytes, served through unparsed.
    pub fn phylogeny_xml(&self) -> ResourceResult<Arc<Vec<u8>>> {
        self.phylogeny.shared()
    }

    /// Fetch one per-(assay, genome) match record on demand.
    pub async fn fetch_detail(
        &self,
        assay_id: &str,
        genome_id: &str,
    ) -> ResourceResult<AssayGenomeDetail> {
        let path = format!("{}/{}/{}.json", self.detail_dir, assay_id, genome_id);
        let bytes = self.fetcher.fetch(&path).await?;
        decode(names::DETAIL, &path, &bytes)
    }

    /// Per-resource load outcomes, in a fixed order.
    pub fn statuses(&self) -> Vec<ResourceStatus> {
        vec![
            self.summary.status(),
            self.stats.status(),
            self.geo.status(),
            self.metadata.status(),
            self.coordinates.status(),
            self.db_totals.status(),
            self.phylogeny.status(),
        ]
    }

    /// True when every startup resource loaded.
    pub fn all_loaded(&self) -> bool {
        self.statuses().iter().all(|status| status.ok)
    }
}

async fn load_json<T: DeserializeOwned>(
    fetcher: &dyn ResourceFetcher,
    name: &'static str,
    path: &str,
) -> ResourceResult<T> {
    let bytes = fetcher.fetch(path).await?;
    decode(name, path, &bytes)
}

/// Decode JSON with the failing field path included in the error.
fn decode<T: DeserializeOwned>(name: &'static str, path: &str, bytes: &[u8]) -> ResourceResult<T> {
    let mut deserializer = serde_json::Deserializer::from_slice(bytes);
    serde_path_to_error::deserialize(&mut deserializer).map_err(|err| ResourceError::Decode {
        name,
        path: path.to_string(),
        detail: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::path::Path;

    use super::*;

    fn write(root: &Path, rel: &str, contents: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, contents).unwrap();
    }

    fn seed_minimal(root: &Path) {
        write(
            root,
            "data/summary_table.json",
            r#"{"data": [{"name": "CDC-N1", "recall": 0.99, "perfect_match": 90,
                 "1_mm": 5, "2_mm": 3, "3_mm_p_fail": 2}], "Timestamp": "2020-04-27"}"#,
        );
        write(
            root,
            "data/SARS-CoV-2.xml.stats.json",
            r#"{"tree": {"collapsed_genome_num": 100, "leaf_num": 90,
                 "nid_to_acc": {"17": "EPI_ISL_402125"},
                 "assay_stats": {"CDC-N1": {"assay_sequence": {
                     "forward_primer": "GACC", "reverse_primer": "TCTG", "probe": "ACCC"}}}}}"#,
        );
        write(
            root,
            "data/SARS-CoV-2.xml.geo.json",
            r#"{"CDC-N1": {"Perfect match": {"USA": {"2020-03-11": 7}}}}"#,
        );
        write(root, "data/SARS-CoV-2.xml.json", r#"{"EPI_ISL_402125": {"country": "China"}}"#);
        write(
            root,
            "country_latlngs.json",
            r#"{"USA": {"latitude": 37.09, "longitude": -95.71, "country": "United States"}}"#,
        );
        write(
            root,
            "data/db_totals.json",
            r#"{"GISAID_tot": 10, "GenBank_tot": 2, "final_date": "2020-04-27",
                 "final_db_tot": 11, "overlap": 1}"#,
        );
        write(root, "data/SARS-CoV-2.xml", "<phyloxml></phyloxml>");
    }

    async fn load_store(root: &Path) -> ResourceStore {
        let fetcher: Arc<dyn ResourceFetcher> = Arc::new(FsFetcher::new(root));
        ResourceStore::load(fetcher, &ResourceLocations::default()).await
    }

    #[tokio::test]
    async fn test_load_full_fixture() {
        let dir = tempfile::tempdir().unwrap();
        seed_minimal(dir.path());
        let store = load_store(dir.path()).await;

        assert!(store.all_loaded());
        assert_eq!(store.summary().unwrap().data[0].name, "CDC-N1");
        assert_eq!(store.stats().unwrap().tree.collapsed_genome_num, 100);
        assert!(store.geo().unwrap().contains_key("CDC-N1"));
        assert_eq!(store.db_totals().unwrap().gisaid_total, 10);
        assert_eq!(
            store.phylogeny_xml().unwrap().as_slice(),
            b"<phyloxml></phyloxml>"
        );
    }

    #[tokio::test]
    async fn test_missing_resource_degrades_alone() {
        let dir = tempfile::tempdir().unwrap();
        seed_minimal(dir.path());
        fs::remove_file(dir.path().join("data/db_totals.json")).unwrap();
        let store = load_store(dir.path()).await;

        assert!(!store.all_loaded());
        assert!(matches!(
            store.db_totals(),
            Err(ResourceError::Unavailable { name: "db-totals" })
        ));
        assert!(store.summary().is_ok());
        assert!(store.geo().is_ok());

        let status = store
            .statuses()
            .into_iter()
            .find(|status| status.name == names::DB_TOTALS)
            .unwrap();
        assert!(!status.ok);
        assert!(status.error.is_some());
    }

    #[tokio::test]
    async fn test_decode_error_names_resource_and_path() {
        let dir = tempfile::tempdir().unwrap();
        seed_minimal(dir.path());
        write(dir.path(), "data/summary_table.json", r#"{"data": [{"recall": 0.5}]}"#);
        let store = load_store(dir.path()).await;

        let status = store
            .statuses()
            .into_iter()
            .find(|status| status.name == names::SUMMARY)
            .unwrap();
        let error = status.error.unwrap();
        assert!(error.contains("summary"), "got: {error}");
        assert!(error.contains("summary_table.json"), "got: {error}");
    }

    #[tokio::test]
    async fn test_fetch_detail_on_demand() {
        let dir = tempfile::tempdir().unwrap();
        seed_minimal(dir.path());
        write(
            dir.path(),
            "data/assay_result_json/CDC-N1/EPI_ISL_402125.json",
            r#"{"Values": {"Forward Primer": {"mismatches": 1},
                 "Reverse Primer": {"mismatches": 0},
                 "Probe": {"mismatches": 0}}}"#,
        );
        let store = load_store(dir.path()).await;

        let detail = store.fetch_detail("CDC-N1", "EPI_ISL_402125").await.unwrap();
        assert_eq!(detail.values["Forward Primer"].mismatches, Some(1));

        let missing = store.fetch_detail("CDC-N1", "EPI_ISL_000000").await;
        assert!(missing.unwrap_err().is_not_found());
    }
}
