use crate::domain::errors::{BaselineError, MetricsError};
use crate::domain::monitoring::metric_vector::MetricVector;
use crate::domain::monitoring::observation::ObservationBatch;
use serde_json::Value;

/// Regression metric calculations over an observation batch.
pub struct MetricsEngine;

impl MetricsEngine {
    /// Compute MSE, MAE and R² for a batch.
    ///
    /// Sums are accumulated sequentially in f64, so results are
    /// deterministic for a given input order.
    ///
    /// # Errors
    /// * `EmptyBatch` - no observations
    /// * `DegenerateInput` - every ground-truth value is identical, R² undefined
    /// * `NonFinite` - a metric overflowed
    pub fn compute(batch: &ObservationBatch) -> Result<MetricVector, MetricsError> {
        let first = batch.iter().next().ok_or(MetricsError::EmptyBatch)?;

        if batch.iter().all(|o| o.y_true == first.y_true) {
            return Err(MetricsError::DegenerateInput {
                value: first.y_true,
                count: batch.len(),
            });
        }

        let n = batch.len() as f64;
        let mut ss_res = 0.0;
        let mut abs_sum = 0.0;
        let mut true_sum = 0.0;
        for obs in batch.iter() {
            let residual = obs.residual();
            ss_res += residual * residual;
            abs_sum += residual.abs();
            true_sum += obs.y_true;
        }

        let mean_true = true_sum / n;
        let mut ss_tot = 0.0;
        for obs in batch.iter() {
            let diff = obs.y_true - mean_true;
            ss_tot += diff * diff;
        }

        if ss_tot == 0.0 {
            return Err(MetricsError::DegenerateInput {
                value: mean_true,
                count: batch.len(),
            });
        }

        let vector = MetricVector::new(ss_res / n, abs_sum / n, 1.0 - ss_res / ss_tot);

        if let Some((metric, value)) = vector.first_non_finite() {
            return Err(MetricsError::NonFinite { metric, value });
        }

        Ok(vector)
    }

    /// Parse a persisted baseline snapshot (JSON object with `mse`, `mae`, `r2`).
    ///
    /// Extra keys are ignored.
    pub fn parse_baseline(raw: &[u8]) -> Result<MetricVector, BaselineError> {
        let value: Value = serde_json::from_slice(raw).map_err(|e| BaselineError::Malformed {
            reason: format!("invalid JSON: {}", e),
        })?;

        let object = value.as_object().ok_or_else(|| BaselineError::Malformed {
            reason: "expected a JSON object".to_string(),
        })?;

        let read = |key: &'static str| -> Result<f64, BaselineError> {
            let field = object.get(key).ok_or(BaselineError::MissingKey { key })?;
            match field.as_f64() {
                Some(v) if v.is_finite() => Ok(v),
                _ => Err(BaselineError::NonNumeric {
                    key,
                    raw: field.to_string(),
                }),
            }
        };

        Ok(MetricVector::new(read("mse")?, read("mae")?, read("r2")?))
    }
}
