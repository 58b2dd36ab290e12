//! Monitoring job configuration parsing from environment variables.
//!
//! Object paths, the observation file layout and the run mode. An optional
//! TOML file (`MONITOR_CONFIG_FILE`) may supply any subset of these values;
//! environment variables that are set win over the file.

use crate::domain::monitoring::{DEFAULT_PREDICTION_COLUMN, DEFAULT_TRUE_COLUMN, RowPolicy};
use anyhow::{Context, Result, bail};
use serde::Deserialize;
use std::env;
use std::fs;
use std::str::FromStr;

/// Values accepted in the optional TOML job file
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct JobFileConfig {
    pub observations_path: Option<String>,
    pub baseline_path: Option<String>,
    pub metrics_output_path: Option<String>,
    pub comparison_output_path: Option<String>,
    pub delimiter: Option<String>,
    pub true_column: Option<String>,
    pub prediction_column: Option<String>,
    pub row_policy: Option<String>,
    pub archive_prefix: Option<String>,
    pub dry_run: Option<bool>,
}

impl JobFileConfig {
    pub fn parse(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse job config TOML")
    }

    fn load_from_env() -> Result<Self> {
        match env::var("MONITOR_CONFIG_FILE") {
            Ok(path) => {
                let content = fs::read_to_string(&path)
                    .with_context(|| format!("Failed to read job config file {}", path))?;
                Self::parse(&content)
            }
            Err(_) => Ok(Self::default()),
        }
    }
}

/// Monitoring job environment configuration
#[derive(Debug, Clone)]
pub struct JobEnvConfig {
    // Inputs
    pub observations_path: String,
    pub baseline_path: String,

    // Outputs
    pub metrics_output_path: String,
    pub comparison_output_path: String,
    pub archive_prefix: Option<String>,

    // Observation layout
    pub delimiter: u8,
    pub true_column: String,
    pub prediction_column: String,
    pub row_policy: RowPolicy,

    pub dry_run: bool,
}

impl Default for JobEnvConfig {
    fn default() -> Self {
        Self {
            observations_path: "predictions/predictions.csv".to_string(),
            baseline_path: "training_metrics/training_metrics.json".to_string(),
            metrics_output_path: "metrics/current_metrics.json".to_string(),
            comparison_output_path: "comparison/metrics_comparison.json".to_string(),
            archive_prefix: None,
            delimiter: b';',
            true_column: DEFAULT_TRUE_COLUMN.to_string(),
            prediction_column: DEFAULT_PREDICTION_COLUMN.to_string(),
            row_policy: RowPolicy::FailFast,
            dry_run: false,
        }
    }
}

impl JobEnvConfig {
    pub fn from_env() -> Result<Self> {
        let file = JobFileConfig::load_from_env()?;
        Self::from_env_with(file)
    }

    /// Resolve every field from env, then `file`, then the default.
    pub fn from_env_with(file: JobFileConfig) -> Result<Self> {
        let defaults = Self::default();

        let delimiter = match Self::pick("MONITOR_DELIMITER", file.delimiter) {
            Some(s) => Self::parse_delimiter(&s)?,
            None => defaults.delimiter,
        };

        let row_policy = match Self::pick("MONITOR_ROW_POLICY", file.row_policy) {
            Some(s) => RowPolicy::from_str(&s)?,
            None => defaults.row_policy,
        };

        let dry_run = match env::var("MONITOR_DRY_RUN") {
            Ok(s) => s
                .parse::<bool>()
                .context("Failed to parse MONITOR_DRY_RUN")?,
            Err(_) => file.dry_run.unwrap_or(defaults.dry_run),
        };

        Ok(Self {
            observations_path: Self::pick("MONITOR_OBSERVATIONS_PATH", file.observations_path)
                .unwrap_or(defaults.observations_path),
            baseline_path: Self::pick("MONITOR_BASELINE_PATH", file.baseline_path)
                .unwrap_or(defaults.baseline_path),
            metrics_output_path: Self::pick("MONITOR_METRICS_OUTPUT_PATH", file.metrics_output_path)
                .unwrap_or(defaults.metrics_output_path),
            comparison_output_path: Self::pick(
                "MONITOR_COMPARISON_OUTPUT_PATH",
                file.comparison_output_path,
            )
            .unwrap_or(defaults.comparison_output_path),
            archive_prefix: Self::pick("MONITOR_ARCHIVE_PREFIX", file.archive_prefix)
                .map(|p| p.trim_matches('/').to_string())
                .filter(|p| !p.is_empty()),
            delimiter,
            true_column: Self::pick("MONITOR_TRUE_COLUMN", file.true_column)
                .unwrap_or(defaults.true_column),
            prediction_column: Self::pick("MONITOR_PREDICTION_COLUMN", file.prediction_column)
                .unwrap_or(defaults.prediction_column),
            row_policy,
            dry_run,
        })
    }

    fn pick(var: &str, file_value: Option<String>) -> Option<String> {
        env::var(var).ok().or(file_value)
    }

    /// Accepts a single ASCII character, or `\t` / `tab` for tabs.
    pub fn parse_delimiter(s: &str) -> Result<u8> {
        match s {
            "\\t" | "\t" | "tab" => return Ok(b'\t'),
            _ => {}
        }
        match s.as_bytes() {
            [b] if b.is_ascii() && *b != b'"' && *b != b'\n' && *b != b'\r' => Ok(*b),
            _ => bail!(
                "Invalid MONITOR_DELIMITER: {:?}. Must be a single ASCII character",
                s
            ),
        }
    }
}
