//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint, fetches the resource
//! snapshots it needs from the shared state and delegates to the
//! service layer for the derivation logic.

use std::collections::BTreeMap;
use std::str::FromStr;

use axum::{
    extract::{Path, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use chrono::{NaiveDate, Utc};

use super::dto::{
    AssayDetail, AssayListData, BreakdownSeries, HealthResponse, MapData, MapQuery, MatchResult,
    StatsData, SummaryData, TopAssaysData, TopQuery, TreeNodeMap,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{AssayId, GenomeId};
use crate::models::bucket::{BucketSelection, MismatchBucket};
use crate::models::dates::{DateRange, DEFAULT_MAP_WINDOW_DAYS};
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Service health plus the load status of every startup resource.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let mut resources = BTreeMap::new();
    for status in state.store.statuses() {
        let text = status.error.unwrap_or_else(|| "ok".to_string());
        resources.insert(status.name.to_string(), text);
    }
    let status = if state.store.all_loaded() {
        "ok"
    } else {
        "degraded"
    };

    Ok(Json(HealthResponse {
        status: status.to_string(),
        version: "v1".to_string(),
        resources,
    }))
}

// =============================================================================
// Summary
// =============================================================================

/// GET /v1/summary
///
/// Every per-assay summary row, in table order.
pub async fn get_summary(State(state): State<AppState>) -> HandlerResult<SummaryData> {
    let table = state.store.summary()?;
    Ok(Json(services::summary::summary_data(table)))
}

/// GET /v1/summary/top?n=
///
/// The top assays by recall with their stacked-bar bucket percents.
pub async fn get_top_assays(
    State(state): State<AppState>,
    Query(query): Query<TopQuery>,
) -> HandlerResult<TopAssaysData> {
    let table = state.store.summary()?;
    Ok(Json(services::summary::top_assays(table, query.n)))
}

// =============================================================================
// Stats
// =============================================================================

/// GET /v1/stats
///
/// Database totals and tree-wide counters.
pub async fn get_stats(State(state): State<AppState>) -> HandlerResult<StatsData> {
    let totals = state.store.db_totals()?;
    let stats = state.store.stats()?;
    Ok(Json(services::stats::stats_data(totals, stats)))
}

// =============================================================================
// Assays
// =============================================================================

/// GET /v1/assays
///
/// Assay ids in resource order.
pub async fn list_assays(State(state): State<AppState>) -> HandlerResult<AssayListData> {
    let stats = state.store.stats()?;
    Ok(Json(services::assays::assay_list(stats)))
}

/// GET /v1/assays/{assay_id}
///
/// One assay's primer/probe sequences plus its summary row.
pub async fn get_assay(
    State(state): State<AppState>,
    Path(assay_id): Path<String>,
) -> HandlerResult<AssayDetail> {
    let assay_id = AssayId::new(assay_id);
    let stats = state.store.stats()?;
    // The summary table is optional here so definitions stay servable
    // when that resource failed to load.
    let summary = state.store.summary().ok();
    services::assays::assay_detail(stats, summary, &assay_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Assay '{assay_id}' not found")))
}

/// GET /v1/assays/{assay_id}/months
///
/// Per-month mismatch counts across the assay's full history.
pub async fn get_assay_months(
    State(state): State<AppState>,
    Path(assay_id): Path<String>,
) -> HandlerResult<BreakdownSeries> {
    let assay_id = AssayId::new(assay_id);
    let geo = state.store.geo()?;
    let data = geo
        .get(assay_id.value())
        .ok_or_else(|| AppError::NotFound(format!("Assay '{assay_id}' not found")))?;
    Ok(Json(services::breakdown::month_series(&assay_id, data)))
}

/// GET /v1/assays/{assay_id}/countries
///
/// Per-country mismatch counts across the assay's full history.
pub async fn get_assay_countries(
    State(state): State<AppState>,
    Path(assay_id): Path<String>,
) -> HandlerResult<BreakdownSeries> {
    let assay_id = AssayId::new(assay_id);
    let geo = state.store.geo()?;
    let data = geo
        .get(assay_id.value())
        .ok_or_else(|| AppError::NotFound(format!("Assay '{assay_id}' not found")))?;
    Ok(Json(services::breakdown::country_series(&assay_id, data, None)))
}

/// GET /v1/assays/{assay_id}/map?bucket=&start=&end=
///
/// Map markers for one bucket selection over a date window.
pub async fn get_assay_map(
    State(state): State<AppState>,
    Path(assay_id): Path<String>,
    Query(query): Query<MapQuery>,
) -> HandlerResult<MapData> {
    let assay_id = AssayId::new(assay_id);
    let geo = state.store.geo()?;
    let coords = state.store.coordinates()?;
    let data = geo
        .get(assay_id.value())
        .ok_or_else(|| AppError::NotFound(format!("Assay '{assay_id}' not found")))?;

    let selection = match query.bucket.as_deref() {
        None => BucketSelection::Bucket(MismatchBucket::PerfectMatch),
        Some(code) => BucketSelection::from_str(code).map_err(AppError::BadRequest)?,
    };
    let range = resolve_range(query.start, query.end)?;

    Ok(Json(services::map::map_data(
        &assay_id, data, selection, range, coords,
    )))
}

/// GET /v1/assays/{assay_id}/genomes/{genome_id}
///
/// The full match record for one (assay, genome) pair, fetched on
/// demand. A pair the pipeline produced no record for resolves to an
/// unavailable result, not an error.
pub async fn get_match_detail(
    State(state): State<AppState>,
    Path((assay_id, genome_id)): Path<(String, String)>,
) -> HandlerResult<MatchResult> {
    let result = services::detail::fetch_match_result(
        state.store.as_ref(),
        state.detail_cache.as_ref(),
        AssayId::new(assay_id),
        GenomeId::new(genome_id),
    )
    .await?;
    Ok(Json(result))
}

// =============================================================================
// Genomes and Tree
// =============================================================================

/// GET /v1/genomes/{genome_id}
///
/// Cleaned metadata fields for one genome.
pub async fn get_genome_metadata(
    State(state): State<AppState>,
    Path(genome_id): Path<String>,
) -> HandlerResult<crate::api::GenomeMetadata> {
    let genome_id = GenomeId::new(genome_id);
    let metadata = state.store.metadata()?;
    services::metadata::genome_metadata(metadata, &genome_id)
        .map(Json)
        .ok_or_else(|| AppError::NotFound(format!("Genome '{genome_id}' not found")))
}

/// GET /v1/tree/nodes
///
/// Rendered-node id to genome accession map.
pub async fn get_tree_nodes(State(state): State<AppState>) -> HandlerResult<TreeNodeMap> {
    let stats = state.store.stats()?;
    Ok(Json(services::metadata::tree_nodes(stats)))
}

/// GET /v1/phylogeny
///
/// The phyloXML document, passed through unparsed.
pub async fn get_phylogeny(State(state): State<AppState>) -> Result<Response, AppError> {
    let xml = state.store.phylogeny_xml()?;
    Ok((
        [(header::CONTENT_TYPE, "application/xml")],
        xml.as_ref().clone(),
    )
        .into_response())
}

fn resolve_range(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Result<DateRange, AppError> {
    let end = end.unwrap_or_else(|| Utc::now().date_naive());
    match start {
        Some(start) => DateRange::new(start, end).ok_or_else(|| {
            AppError::BadRequest(format!("Invalid date range: {start} is after {end}"))
        }),
        None => Ok(DateRange::last_days(DEFAULT_MAP_WINDOW_DAYS, end)),
    }
}
