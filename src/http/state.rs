//! Application state for the HTTP server.

use std::sync::Arc;

use crate::resources::ResourceStore;
use crate::services::detail::DetailCache;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Loaded resource snapshots
    pub store: Arc<ResourceStore>,
    /// Current detail view cache
    pub detail_cache: Arc<DetailCache>,
}

impl AppState {
    /// Create a new application state over a loaded resource store.
    pub fn new(store: Arc<ResourceStore>) -> Self {
        Self {
            store,
            detail_cache: Arc::new(DetailCache::new()),
        }
    }
}
