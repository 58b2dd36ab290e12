//! One invocation of the drift monitor: load, compute, compare, persist.

use crate::application::observation_loader::ObservationLoader;
use crate::config::JobEnvConfig;
use crate::domain::monitoring::{
    ComparisonReport, DriftComparator, MetricVector, MetricsEngine, RunSummary,
};
use crate::domain::ports::{BlobStore, JSON_CONTENT_TYPE, TabularDecoder};
use crate::infrastructure::tabular::CsvDecoder;
use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::sync::Arc;
use tracing::info;
use uuid::Uuid;

pub const METRICS_ARCHIVE_NAME: &str = "current_metrics.json";
pub const COMPARISON_ARCHIVE_NAME: &str = "metrics_comparison.json";

pub struct MonitoringJob {
    store: Arc<dyn BlobStore>,
    decoder: Box<dyn TabularDecoder>,
    loader: ObservationLoader,
    config: JobEnvConfig,
}

impl MonitoringJob {
    pub fn new(
        store: Arc<dyn BlobStore>,
        decoder: Box<dyn TabularDecoder>,
        config: JobEnvConfig,
    ) -> Self {
        let loader = ObservationLoader::new(
            &config.true_column,
            &config.prediction_column,
            config.row_policy,
        );
        Self {
            store,
            decoder,
            loader,
            config,
        }
    }

    /// Job reading observations with the configured CSV delimiter
    pub fn with_csv(store: Arc<dyn BlobStore>, config: JobEnvConfig) -> Self {
        let decoder = Box::new(CsvDecoder::new(config.delimiter));
        Self::new(store, decoder, config)
    }

    /// Run the job once.
    ///
    /// Every input is validated and both artifacts are serialized before the
    /// first write. Archive copies are written before the latest artifacts,
    /// so a failed archive write leaves the previous latest artifacts in place.
    pub async fn run(&self) -> Result<RunSummary> {
        let run_id = Uuid::new_v4();
        let started_at = Utc::now();
        info!("Run {} started", run_id);

        let raw = self
            .store
            .fetch(&self.config.observations_path)
            .await
            .with_context(|| {
                format!("Failed to fetch observations {}", self.config.observations_path)
            })?;
        let table = self
            .decoder
            .decode(&raw)
            .context("Failed to decode observations")?;
        let loaded = self
            .loader
            .load_counted(&table)
            .context("Failed to load observations")?;
        info!(
            "Loaded {} observations ({} rows read, {} skipped)",
            loaded.batch.len(),
            table.len(),
            loaded.skipped_rows
        );

        let current =
            MetricsEngine::compute(&loaded.batch).context("Failed to compute current metrics")?;

        let baseline_raw = self
            .store
            .fetch(&self.config.baseline_path)
            .await
            .with_context(|| format!("Failed to fetch baseline {}", self.config.baseline_path))?;
        let baseline = MetricsEngine::parse_baseline(&baseline_raw)
            .context("Failed to load baseline metrics")?;

        let comparison = DriftComparator::compare(&baseline, &current);

        let artifacts = if self.config.dry_run {
            info!("Dry run: skipping artifact persistence");
            Vec::new()
        } else {
            self.persist(&current, &comparison, started_at).await?
        };

        Ok(RunSummary {
            run_id,
            started_at,
            rows_read: table.len(),
            rows_skipped: loaded.skipped_rows,
            observations: loaded.batch.len(),
            baseline,
            current,
            comparison,
            dry_run: self.config.dry_run,
            artifacts,
        })
    }

    async fn persist(
        &self,
        current: &MetricVector,
        comparison: &ComparisonReport,
        started_at: DateTime<Utc>,
    ) -> Result<Vec<String>> {
        let metrics_json = Self::to_json(current).context("Failed to serialize metrics")?;
        let comparison_json =
            Self::to_json(comparison).context("Failed to serialize comparison")?;

        // Timestamped copies go first: a leftover copy from a failed run is
        // never mistaken for the latest artifacts.
        let mut writes = Vec::with_capacity(4);
        if let Some(prefix) = &self.config.archive_prefix {
            let dir = Self::archive_dir(prefix, started_at);
            writes.push((format!("{}/{}", dir, METRICS_ARCHIVE_NAME), metrics_json.clone()));
            writes.push((
                format!("{}/{}", dir, COMPARISON_ARCHIVE_NAME),
                comparison_json.clone(),
            ));
        }
        writes.push((self.config.metrics_output_path.clone(), metrics_json));
        writes.push((self.config.comparison_output_path.clone(), comparison_json));

        let mut written = Vec::with_capacity(writes.len());
        for (path, content) in writes {
            self.store
                .write(&path, content, JSON_CONTENT_TYPE)
                .await
                .with_context(|| format!("Failed to write {}", path))?;
            info!("Saved {}", path);
            written.push(path);
        }
        Ok(written)
    }

    /// `{prefix}/{YYYYMMDDTHHMMSSZ}`
    pub fn archive_dir(prefix: &str, started_at: DateTime<Utc>) -> String {
        format!("{}/{}", prefix, started_at.format("%Y%m%dT%H%M%SZ"))
    }

    fn to_json<T: Serialize>(value: &T) -> serde_json::Result<Vec<u8>> {
        serde_json::to_vec(value)
    }
}
