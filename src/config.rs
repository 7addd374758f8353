//! Service configuration file support.
//!
//! Configuration comes from a TOML file with `HOST`, `PORT`, `DATA_SOURCE`
//! and `DATA_ROOT` environment overrides for container deployments.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use crate::resources::{FsFetcher, HttpFetcher, ResourceFetcher};

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("Invalid data source '{0}', expected 'http' or 'local'")]
    Source(String),
    #[error("Invalid value for {var}: {value}")]
    EnvOverride { var: &'static str, value: String },
}

/// Top-level service configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub source: SourceSettings,
    #[serde(default)]
    pub resources: ResourceLocations,
}

/// HTTP listener settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    3000
}

/// Where the static resources live.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceSettings {
    /// "http" for a static file host, "local" for a data directory.
    #[serde(rename = "type", default = "default_source_type")]
    pub kind: String,
    /// Base URL or directory the resource paths are resolved against.
    #[serde(default = "default_source_root")]
    pub root: String,
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            kind: default_source_type(),
            root: default_source_root(),
        }
    }
}

fn default_source_type() -> String {
    "local".to_string()
}

fn default_source_root() -> String {
    ".".to_string()
}

/// Resource source backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind {
    Http,
    Local,
}

impl FromStr for SourceKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "http" => Ok(SourceKind::Http),
            "local" | "fs" => Ok(SourceKind::Local),
            other => Err(ConfigError::Source(other.to_string())),
        }
    }
}

/// Paths of the named resources, relative to the source root.
///
/// Defaults match the offline pipeline's output layout.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResourceLocations {
    #[serde(default = "default_summary_table")]
    pub summary_table: String,
    #[serde(default = "default_phylogeny")]
    pub phylogeny: String,
    #[serde(default = "default_metadata")]
    pub metadata: String,
    #[serde(default = "default_assay_stats")]
    pub assay_stats: String,
    #[serde(default = "default_geo_results")]
    pub geo_results: String,
    #[serde(default = "default_db_totals")]
    pub db_totals: String,
    #[serde(default = "default_country_coords")]
    pub country_coords: String,
    /// Directory of per-(assay, genome) detail records.
    #[serde(default = "default_detail_dir")]
    pub detail_dir: String,
}

impl Default for ResourceLocations {
    fn default() -> Self {
        Self {
            summary_table: default_summary_table(),
            phylogeny: default_phylogeny(),
            metadata: default_metadata(),
            assay_stats: default_assay_stats(),
            geo_results: default_geo_results(),
            db_totals: default_db_totals(),
            country_coords: default_country_coords(),
            detail_dir: default_detail_dir(),
        }
    }
}

fn default_summary_table() -> String {
    "data/summary_table.json".to_string()
}

fn default_phylogeny() -> String {
    "data/SARS-CoV-2.xml".to_string()
}

fn default_metadata() -> String {
    "data/SARS-CoV-2.xml.json".to_string()
}

fn default_assay_stats() -> String {
    "data/SARS-CoV-2.xml.stats.json".to_string()
}

fn default_geo_results() -> String {
    "data/SARS-CoV-2.xml.geo.json".to_string()
}

fn default_db_totals() -> String {
    "data/db_totals.json".to_string()
}

fn default_country_coords() -> String {
    "country_latlngs.json".to_string()
}

fn default_detail_dir() -> String {
    "data/assay_result_json".to_string()
}

impl AppConfig {
    /// Load configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            source: e,
        })?;
        toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            source: e,
        })
    }

    /// Load configuration from the default locations, falling back to
    /// built-in defaults when no file exists.
    pub fn from_default_location() -> Result<Self, ConfigError> {
        let search_paths = [
            PathBuf::from("assay-monitor.toml"),
            PathBuf::from("config/assay-monitor.toml"),
            PathBuf::from("../assay-monitor.toml"),
        ];
        for path in search_paths {
            if path.exists() {
                return Self::from_file(&path);
            }
        }
        Ok(Self::default())
    }

    /// Apply `HOST`, `PORT`, `DATA_SOURCE` and `DATA_ROOT` environment
    /// overrides on top of the file configuration.
    pub fn with_env_overrides(mut self) -> Result<Self, ConfigError> {
        if let Ok(host) = std::env::var("HOST") {
            self.server.host = host;
        }
        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port.parse().map_err(|_| ConfigError::EnvOverride {
                var: "PORT",
                value: port,
            })?;
        }
        if let Ok(kind) = std::env::var("DATA_SOURCE") {
            SourceKind::from_str(&kind)?;
            self.source.kind = kind;
        }
        if let Ok(root) = std::env::var("DATA_ROOT") {
            self.source.root = root;
        }
        Ok(self)
    }

    pub fn source_kind(&self) -> Result<SourceKind, ConfigError> {
        SourceKind::from_str(&self.source.kind)
    }

    /// Build the resource fetcher for the configured source.
    pub fn fetcher(&self) -> Result<Arc<dyn ResourceFetcher>, ConfigError> {
        Ok(match self.source_kind()? {
            SourceKind::Http => Arc::new(HttpFetcher::new(self.source.root.clone())),
            SourceKind::Local => Arc::new(FsFetcher::new(self.source.root.clone())),
        })
    }

    /// Listener address string, `host:port`.
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
