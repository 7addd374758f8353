//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration - permissive for development, should be restricted in production
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Build the API router with versioned endpoints
    let api_v1 = Router::new()
        // Summary table and top chart
        .route("/summary", get(handlers::get_summary))
        .route("/summary/top", get(handlers::get_top_assays))
        // Database and tree statistics
        .route("/stats", get(handlers::get_stats))
        // Per-assay views
        .route("/assays", get(handlers::list_assays))
        .route("/assays/{assay_id}", get(handlers::get_assay))
        .route("/assays/{assay_id}/months", get(handlers::get_assay_months))
        .route("/assays/{assay_id}/countries", get(handlers::get_assay_countries))
        .route("/assays/{assay_id}/map", get(handlers::get_assay_map))
        .route("/assays/{assay_id}/genomes/{genome_id}", get(handlers::get_match_detail))
        // Genome metadata and tree lookups
        .route("/genomes/{genome_id}", get(handlers::get_genome_metadata))
        .route("/tree/nodes", get(handlers::get_tree_nodes))
        .route("/phylogeny", get(handlers::get_phylogeny));

    // Combine all routes
    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use crate::config::ResourceLocations;
    use crate::resources::{FsFetcher, ResourceFetcher, ResourceStore};

    #[tokio::test]
    async fn test_router_creation() {
        let dir = tempfile::tempdir().unwrap();
        let fetcher: Arc<dyn ResourceFetcher> = Arc::new(FsFetcher::new(dir.path()));
        let store = ResourceStore::load(fetcher, &ResourceLocations::default()).await;
        let state = AppState::new(Arc::new(store));
        let _router = create_router(state);
        // If we got here, router was created successfully
    }
}
