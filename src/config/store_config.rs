//! Blob store configuration parsing from environment variables.
//!
//! Selects the storage backend and carries everything an adapter needs to
//! address objects, so no adapter reads process-wide state on its own.

use anyhow::{Context, Result, bail};
use std::env;
use std::path::PathBuf;
use std::str::FromStr;

pub const DEFAULT_BUCKET: &str = "model-monitoring-project-bucket";
const GCS_SCHEME: &str = "gs://";

/// Storage backend selection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Gcs,
    Local,
}

impl FromStr for StoreBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "gcs" => Ok(StoreBackend::Gcs),
            "local" => Ok(StoreBackend::Local),
            _ => bail!("Invalid STORE_BACKEND: {}. Must be 'gcs' or 'local'", s),
        }
    }
}

/// Blob store environment configuration
#[derive(Debug, Clone)]
pub struct StoreEnvConfig {
    pub backend: StoreBackend,
    pub bucket: String,
    pub local_root: PathBuf,
    pub gcs_api_base_url: String,
    pub gcs_access_token: Option<String>,
    pub timeout_secs: u64,
}

impl Default for StoreEnvConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::Local,
            bucket: DEFAULT_BUCKET.to_string(),
            local_root: PathBuf::from("./data"),
            gcs_api_base_url: "https://storage.googleapis.com".to_string(),
            gcs_access_token: None,
            timeout_secs: 30,
        }
    }
}

impl StoreEnvConfig {
    pub fn from_env() -> Result<Self> {
        let defaults = Self::default();

        let backend = match env::var("STORE_BACKEND") {
            Ok(s) => StoreBackend::from_str(&s)?,
            Err(_) => defaults.backend,
        };

        let timeout_secs = match env::var("STORE_TIMEOUT_SECS") {
            Ok(s) => s
                .parse::<u64>()
                .context("Failed to parse STORE_TIMEOUT_SECS")?,
            Err(_) => defaults.timeout_secs,
        };

        Ok(Self {
            backend,
            bucket: env::var("STORE_BUCKET").unwrap_or(defaults.bucket),
            local_root: env::var("STORE_LOCAL_ROOT")
                .map(PathBuf::from)
                .unwrap_or(defaults.local_root),
            gcs_api_base_url: env::var("GCS_API_BASE_URL")
                .map(|u| u.trim_end_matches('/').to_string())
                .unwrap_or(defaults.gcs_api_base_url),
            gcs_access_token: env::var("GCS_ACCESS_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            timeout_secs,
        })
    }

    /// Reduce a configured path to a bucket-relative object key.
    ///
    /// Accepts bare keys (`metrics/current.json`) and full object URIs
    /// (`gs://<bucket>/metrics/current.json`). A URI naming another bucket
    /// is rejected.
    pub fn object_key(&self, path: &str) -> Result<String> {
        let key = match path.strip_prefix(GCS_SCHEME) {
            Some(rest) => {
                let (bucket, key) = rest.split_once('/').unwrap_or((rest, ""));
                if bucket != self.bucket {
                    bail!(
                        "Path {} refers to bucket '{}' but the configured bucket is '{}'",
                        path,
                        bucket,
                        self.bucket
                    );
                }
                key
            }
            None => path,
        };

        let key = key.trim_start_matches('/');
        if key.is_empty() {
            bail!("Path {:?} does not name an object", path);
        }
        Ok(key.to_string())
    }
}
