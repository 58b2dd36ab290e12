//! Configuration module for driftwatch.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: Store, Job, and Observability.

mod job_config;
mod observability_config;
mod store_config;

pub use job_config::{JobEnvConfig, JobFileConfig};
pub use observability_config::{LogFormat, ObservabilityEnvConfig};
pub use store_config::{DEFAULT_BUCKET, StoreBackend, StoreEnvConfig};

use anyhow::{Context, Result};

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub store: StoreEnvConfig,
    pub job: JobEnvConfig,
    pub observability: ObservabilityEnvConfig,
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// Object paths are normalized to bucket-relative keys here, so a bad
    /// path fails the run before any I/O happens.
    pub fn from_env() -> Result<Self> {
        let store = StoreEnvConfig::from_env().context("Failed to load store config")?;
        let job = JobEnvConfig::from_env().context("Failed to load job config")?;
        let observability =
            ObservabilityEnvConfig::from_env().context("Failed to load observability config")?;

        Self::new(store, job, observability)
    }

    pub fn new(
        store: StoreEnvConfig,
        mut job: JobEnvConfig,
        observability: ObservabilityEnvConfig,
    ) -> Result<Self> {
        job.observations_path = store.object_key(&job.observations_path)?;
        job.baseline_path = store.object_key(&job.baseline_path)?;
        job.metrics_output_path = store.object_key(&job.metrics_output_path)?;
        job.comparison_output_path = store.object_key(&job.comparison_output_path)?;
        job.archive_prefix = job
            .archive_prefix
            .map(|prefix| store.object_key(&prefix))
            .transpose()?
            .map(|prefix| prefix.trim_end_matches('/').to_string());

        Ok(Self {
            store,
            job,
            observability,
        })
    }
}
