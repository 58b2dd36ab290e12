use crate::domain::monitoring::{ComparisonReport, MetricVector};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Outcome of one successful monitoring run.
#[derive(Debug, Clone, Serialize)]
pub struct RunSummary {
    pub run_id: Uuid,
    pub started_at: DateTime<Utc>,
    pub rows_read: usize,
    pub rows_skipped: usize,
    pub observations: usize,
    pub baseline: MetricVector,
    pub current: MetricVector,
    pub comparison: ComparisonReport,
    pub dry_run: bool,
    /// Object keys written by this run, in write order
    pub artifacts: Vec<String>,
}
