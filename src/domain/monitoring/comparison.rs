use crate::domain::monitoring::metric_vector::MetricVector;
use serde::{Deserialize, Serialize};

/// Signed per-metric delta, `baseline - current`.
///
/// Positive values mean the baseline was higher. Whether that is good or bad
/// depends on the metric and is left to whoever consumes the report.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub mse_diff: f64,
    pub mae_diff: f64,
    pub r2_diff: f64,
}

pub struct DriftComparator;

impl DriftComparator {
    pub fn compare(baseline: &MetricVector, current: &MetricVector) -> ComparisonReport {
        ComparisonReport {
            mse_diff: baseline.mse - current.mse,
            mae_diff: baseline.mae - current.mae,
            r2_diff: baseline.r2 - current.r2,
        }
    }
}
