//! Fetch backends for the static resource host.
//!
//! Resources are plain files served either over HTTP or from a local
//! directory. Both backends speak the same trait so the store and the
//! tests can swap them freely.

use std::path::PathBuf;

use async_trait::async_trait;

use super::error::ResourceError;

/// Abstract access to resource files by path relative to the data root.
#[async_trait]
pub trait ResourceFetcher: Send + Sync {
    /// Fetch the raw bytes of one resource.
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, ResourceError>;
}

/// Fetches resources from a remote HTTP host.
pub struct HttpFetcher {
    client: reqwest::Client,
    base_url: String,
}

impl HttpFetcher {
    /// Create a fetcher rooted at `base_url`.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url_for(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }
}

#[async_trait]
impl ResourceFetcher for HttpFetcher {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, ResourceError> {
        let url = self.url_for(path);
        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ResourceError::Fetch {
                path: url.clone(),
                source,
            })?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Err(ResourceError::NotFound { path: url });
        }

        let response = response
            .error_for_status()
            .map_err(|source| ResourceError::Fetch {
                path: url.clone(),
                source,
            })?;

        let bytes = response
            .bytes()
            .await
            .map_err(|source| ResourceError::Fetch { path: url, source })?;

        Ok(bytes.to_vec())
    }
}

/// Fetches resources from a local directory, mirroring the layout the
/// HTTP host serves. Used for development and tests.
pub struct FsFetcher {
    root: PathBuf,
}

impl FsFetcher {
    /// Create a fetcher rooted at a local data directory.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

#[async_trait]
impl ResourceFetcher for FsFetcher {
    async fn fetch(&self, path: &str) -> Result<Vec<u8>, ResourceError> {
        let full_path = self.root.join(path);
        match tokio::fs::read(&full_path).await {
            Ok(bytes) => Ok(bytes),
            Err(source) if source.kind() == std::io::ErrorKind::NotFound => {
                Err(ResourceError::NotFound {
                    path: full_path.display().to_string(),
                })
            }
            Err(source) => Err(ResourceError::Io {
                path: full_path.display().to_string(),
                source,
            }),
        }
    }
}
