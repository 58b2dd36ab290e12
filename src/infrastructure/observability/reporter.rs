//! Run summary reporter for driftwatch
//!
//! Emits the outcome of a run as a single structured JSON line on stdout so
//! log shippers can pick it up without parsing human-readable output.

use crate::domain::monitoring::RunSummary;
use tracing::{info, warn};

/// Prefix for the machine-readable summary line
pub const SUMMARY_PREFIX: &str = "MONITOR_JSON:";

pub struct RunReporter {
    enabled: bool,
}

impl RunReporter {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    /// Summary line, or `None` if it could not be serialized
    pub fn render(summary: &RunSummary) -> Option<String> {
        match serde_json::to_string(summary) {
            Ok(json) => Some(format!("{}{}", SUMMARY_PREFIX, json)),
            Err(e) => {
                warn!("Failed to serialize run summary: {}", e);
                None
            }
        }
    }

    pub fn report(&self, summary: &RunSummary) {
        info!(
            "Run {}: mse={:.6} mae={:.6} r2={:.6} | Δmse={:+.6} Δmae={:+.6} Δr2={:+.6}",
            summary.run_id,
            summary.current.mse,
            summary.current.mae,
            summary.current.r2,
            summary.comparison.mse_diff,
            summary.comparison.mae_diff,
            summary.comparison.r2_diff
        );

        if !self.enabled {
            return;
        }
        if let Some(line) = Self::render(summary) {
            println!("{}", line);
        }
    }
}
