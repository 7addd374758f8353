//! On-demand per-(assay, genome) match details.
//!
//! Detail records are fetched lazily when a tree node is inspected. The
//! cache keeps at most the record of the detail view currently open;
//! every new view supersedes the previous one, and a fetch that finishes
//! after being superseded is returned to its caller but never written
//! back over newer state.

use parking_lot::Mutex;
use serde::{Deserialize, Serialize};

use crate::api::{AssayId, GenomeId};
use crate::models::bucket::{MismatchBucket, MismatchCount};
use crate::resources::model::{AssayGenomeDetail, FORWARD_PRIMER, PROBE, REVERSE_PRIMER};
use crate::resources::{ResourceResult, ResourceStore};

/// Outcome of resolving one (assay, genome) pair.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchResult {
    pub assay_id: AssayId,
    pub genome_id: GenomeId,
    /// False when the pipeline produced no record for the pair; the
    /// caller renders its not-available placeholder.
    pub available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bucket: Option<MismatchBucket>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<AssayGenomeDetail>,
}

/// Worst mismatch count across the oligos, the pipeline's combination
/// rule: max of forward primer, reverse primer and probe, with a missing
/// probe counting as zero. Primers are required; a record without them
/// has no classifiable count.
pub fn combined_mismatches(detail: &AssayGenomeDetail) -> Option<MismatchCount> {
    let forward = detail.values.get(FORWARD_PRIMER)?.mismatches?;
    let reverse = detail.values.get(REVERSE_PRIMER)?.mismatches?;
    let probe = detail
        .values
        .get(PROBE)
        .and_then(|values| values.mismatches)
        .unwrap_or(0);
    Some(MismatchCount::from_raw(forward.max(reverse).max(probe)))
}

/// Token identifying one detail view generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DetailToken(u64);

#[derive(Default)]
struct CacheState {
    generation: u64,
    entry: Option<MatchResult>,
}

/// Single-entry cache of the current detail view.
#[derive(Default)]
pub struct DetailCache {
    inner: Mutex<CacheState>,
}

impl DetailCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Serve the cached record when it is for the requested pair.
    pub fn cached(&self, assay_id: &AssayId, genome_id: &GenomeId) -> Option<MatchResult> {
        let state = self.inner.lock();
        state
            .entry
            .as_ref()
            .filter(|entry| entry.assay_id == *assay_id && entry.genome_id == *genome_id)
            .cloned()
    }

    /// Open a new detail view: supersede the previous one and hand out
    /// the token its fetch must present to be cached.
    pub fn begin(&self) -> DetailToken {
        let mut state = self.inner.lock();
        state.generation += 1;
        state.entry = None;
        DetailToken(state.generation)
    }

    /// Store a fetched record. Returns false, leaving the cache alone,
    /// when the token's view has been superseded.
    pub fn complete(&self, token: DetailToken, result: &MatchResult) -> bool {
        let mut state = self.inner.lock();
        if token.0 != state.generation {
            return false;
        }
        state.entry = Some(result.clone());
        true
    }
}

/// Resolve one pair: cache hit, or an on-demand fetch. A missing record
/// is not an error; it resolves to an unavailable result.
pub async fn fetch_match_result(
    store: &ResourceStore,
    cache: &DetailCache,
    assay_id: AssayId,
    genome_id: GenomeId,
) -> ResourceResult<MatchResult> {
    if let Some(hit) = cache.cached(&assay_id, &genome_id) {
        return Ok(hit);
    }
    let token = cache.begin();
    let result = match store.fetch_detail(assay_id.value(), genome_id.value()).await {
        Ok(detail) => MatchResult {
            bucket: combined_mismatches(&detail).map(MismatchBucket::classify),
            assay_id,
            genome_id,
            available: true,
            detail: Some(detail),
        },
        Err(err) if err.is_not_found() => MatchResult {
            assay_id,
            genome_id,
            available: false,
            bucket: None,
            detail: None,
        },
        Err(err) => return Err(err),
    };
    if !cache.complete(token, &result) {
        tracing::debug!(
            assay = %result.assay_id,
            genome = %result.genome_id,
            "detail fetch superseded, result not cached"
        );
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use std::fs;
    use std::sync::Arc;

    use crate::config::ResourceLocations;
    use crate::resources::{FsFetcher, ResourceFetcher};

    use super::*;

    fn detail(json: &str) -> AssayGenomeDetail {
        serde_json::from_str(json).unwrap()
    }

    fn result(assay: &str, genome: &str) -> MatchResult {
        MatchResult {
            assay_id: AssayId::new(assay),
            genome_id: GenomeId::new(genome),
            available: true,
            bucket: Some(MismatchBucket::PerfectMatch),
            detail: None,
        }
    }

    #[test]
    fn test_combined_takes_worst_oligo() {
        let d = detail(
            r#"{"Values": {
                "Forward Primer": {"mismatches": 1},
                "Reverse Primer": {"mismatches": 4},
                "Probe": {"mismatches": 2}
            }}"#,
        );
        assert_eq!(combined_mismatches(&d), Some(MismatchCount::Count(4)));
    }

    #[test]
    fn test_combined_missing_probe_counts_as_zero() {
        let d = detail(
            r#"{"Values": {
                "Forward Primer": {"mismatches": 0},
                "Reverse Primer": {"mismatches": 2}
            }}"#,
        );
        assert_eq!(combined_mismatches(&d), Some(MismatchCount::Count(2)));
    }

    #[test]
    fn test_combined_failure_only_when_worst_is_negative() {
        let all_failed = detail(
            r#"{"Values": {
                "Forward Primer": {"mismatches": -1},
                "Reverse Primer": {"mismatches": -1},
                "Probe": {"mismatches": -1}
            }}"#,
        );
        assert_eq!(combined_mismatches(&all_failed), Some(MismatchCount::Failure));

        let partial = detail(
            r#"{"Values": {
                "Forward Primer": {"mismatches": -1},
                "Reverse Primer": {"mismatches": 2}
            }}"#,
        );
        assert_eq!(combined_mismatches(&partial), Some(MismatchCount::Count(2)));
    }

    #[test]
    fn test_combined_requires_both_primers() {
        let d = detail(r#"{"Values": {"Forward Primer": {"mismatches": 1}}}"#);
        assert_eq!(combined_mismatches(&d), None);
    }

    #[test]
    fn test_cache_serves_matching_pair_only() {
        let cache = DetailCache::new();
        let token = cache.begin();
        assert!(cache.complete(token, &result("CDC-N1", "EPI_1")));

        assert!(cache
            .cached(&AssayId::new("CDC-N1"), &GenomeId::new("EPI_1"))
            .is_some());
        assert!(cache
            .cached(&AssayId::new("CDC-N1"), &GenomeId::new("EPI_2"))
            .is_none());
    }

    #[test]
    fn test_superseded_fetch_is_discarded() {
        let cache = DetailCache::new();
        let stale = cache.begin();
        let current = cache.begin();

        assert!(!cache.complete(stale, &result("CDC-N1", "EPI_1")));
        assert!(cache
            .cached(&AssayId::new("CDC-N1"), &GenomeId::new("EPI_1"))
            .is_none());

        assert!(cache.complete(current, &result("CDC-N2", "EPI_2")));
        assert!(cache
            .cached(&AssayId::new("CDC-N2"), &GenomeId::new("EPI_2"))
            .is_some());
    }

    #[test]
    fn test_new_view_clears_previous_record() {
        let cache = DetailCache::new();
        let token = cache.begin();
        cache.complete(token, &result("CDC-N1", "EPI_1"));

        cache.begin();
        assert!(cache
            .cached(&AssayId::new("CDC-N1"), &GenomeId::new("EPI_1"))
            .is_none());
    }

    async fn store_with_detail(root: &std::path::Path) -> ResourceStore {
        let fetcher: Arc<dyn ResourceFetcher> = Arc::new(FsFetcher::new(root));
        ResourceStore::load(fetcher, &ResourceLocations::default()).await
    }

    #[tokio::test]
    async fn test_fetch_builds_available_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data/assay_result_json/CDC-N1");
        fs::create_dir_all(&path).unwrap();
        fs::write(
            path.join("EPI_1.json"),
            r#"{"Values": {
                "Forward Primer": {"mismatches": 1},
                "Reverse Primer": {"mismatches": 0},
                "Probe": {"mismatches": 0}
            }}"#,
        )
        .unwrap();

        let store = store_with_detail(dir.path()).await;
        let cache = DetailCache::new();
        let got = fetch_match_result(&store, &cache, AssayId::new("CDC-N1"), GenomeId::new("EPI_1"))
            .await
            .unwrap();
        assert!(got.available);
        assert_eq!(got.bucket, Some(MismatchBucket::OneMismatch));
        assert!(got.detail.is_some());

        // second request is served from the cache
        assert!(cache
            .cached(&AssayId::new("CDC-N1"), &GenomeId::new("EPI_1"))
            .is_some());
    }

    #[tokio::test]
    async fn test_fetch_missing_record_is_unavailable_not_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_with_detail(dir.path()).await;
        let cache = DetailCache::new();
        let got = fetch_match_result(&store, &cache, AssayId::new("CDC-N1"), GenomeId::new("EPI_9"))
            .await
            .unwrap();
        assert!(!got.available);
        assert_eq!(got.bucket, None);
        assert!(got.detail.is_none());
    }

    #[tokio::test]
    async fn test_fetch_malformed_record_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("data/assay_result_json/CDC-N1");
        fs::create_dir_all(&path).unwrap();
        fs::write(path.join("EPI_1.json"), r#"{"Values": "nope"}"#).unwrap();

        let store = store_with_detail(dir.path()).await;
        let cache = DetailCache::new();
        let got = fetch_match_result(&store, &cache, AssayId::new("CDC-N1"), GenomeId::new("EPI_1"))
            .await;
        assert!(got.is_err());
    }
}
