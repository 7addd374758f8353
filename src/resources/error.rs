//! Error types for resource access.

/// Result type for resource operations.
pub type ResourceResult<T> = Result<T, ResourceError>;

/// Error type for fetching and decoding the static dashboard resources.
#[derive(Debug, thiserror::Error)]
pub enum ResourceError {
    /// The resource does not exist on the data host.
    #[error("Resource not found: {path}")]
    NotFound { path: String },

    /// Transport-level fetch failure (connection, status, body).
    #[error("Failed to fetch {path}: {source}")]
    Fetch {
        path: String,
        #[source]
        source: reqwest::Error,
    },

    /// Local filesystem read failure.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The resource was fetched but its content does not match the
    /// expected shape. `detail` names the offending field path.
    #[error("Malformed {name} resource at {path}: {detail}")]
    Decode {
        name: &'static str,
        path: String,
        detail: String,
    },

    /// The resource failed to load at startup and has no value.
    #[error("Resource '{name}' is unavailable")]
    Unavailable { name: &'static str },
}

impl ResourceError {
    /// Whether this error means the resource simply does not exist.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ResourceError::NotFound { .. })
    }
}
